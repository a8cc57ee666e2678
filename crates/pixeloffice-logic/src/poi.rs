//! Points of interest, the fixed floor-plan locations agents walk between.
//!
//! Coordinates were measured against the office background image. The set
//! is immutable once built; agents may share a POI (there is no occupancy
//! tracking or reservation).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{AgentStatus, Direction, Position};

/// What kind of spot a POI is. Decides the status on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoiKind {
    /// A chair: arriving agents sit.
    Seat,
    /// A presentation spot: arriving agents start their first action.
    Stand,
    /// A hangout spot: arriving agents idle.
    Loiter,
}

impl PoiKind {
    pub fn arrival_status(self) -> AgentStatus {
        match self {
            PoiKind::Seat => AgentStatus::Sitting,
            PoiKind::Stand => AgentStatus::Action1,
            PoiKind::Loiter => AgentStatus::Idle,
        }
    }
}

/// A named floor-plan location with a forced arrival facing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "type")]
    pub kind: PoiKind,
    pub direction: Direction,
}

impl PointOfInterest {
    pub fn new(id: impl Into<String>, x: f32, y: f32, kind: PoiKind, direction: Direction) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            kind,
            direction,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// A layout validation problem.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub category: &'static str,
    pub message: String,
}

/// The static registry of POIs for one floor plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiMap {
    points: Vec<PointOfInterest>,
}

impl PoiMap {
    pub fn new(points: Vec<PointOfInterest>) -> Self {
        Self { points }
    }

    /// The conference-room floor plan shipped with the office background.
    pub fn office() -> Self {
        use Direction::*;
        use PoiKind::*;
        Self::new(vec![
            // Conference table, far side (behind the table, facing down)
            PointOfInterest::new("seat_top_1", 36.0, 42.0, Seat, Down),
            PointOfInterest::new("seat_top_2", 50.0, 42.0, Seat, Down),
            PointOfInterest::new("seat_top_3", 64.0, 42.0, Seat, Down),
            // Conference table, near side
            PointOfInterest::new("seat_bottom_1", 36.0, 68.0, Seat, Up),
            PointOfInterest::new("seat_bottom_2", 50.0, 68.0, Seat, Up),
            PointOfInterest::new("seat_bottom_3", 64.0, 68.0, Seat, Up),
            // Table ends
            PointOfInterest::new("seat_left", 27.0, 55.0, Seat, Right),
            PointOfInterest::new("seat_right", 73.0, 55.0, Seat, Left),
            // Glass office desk
            PointOfInterest::new("boss_seat", 91.0, 58.0, Seat, Left),
            PointOfInterest::new("whiteboard", 16.0, 45.0, Stand, Right),
            PointOfInterest::new("glass_door", 78.0, 75.0, Loiter, Up),
            PointOfInterest::new("plant", 12.0, 75.0, Loiter, Right),
        ])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.points.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PointOfInterest> {
        self.points.get(index)
    }

    pub fn by_id(&self, id: &str) -> Option<&PointOfInterest> {
        self.points.iter().find(|p| p.id == id)
    }

    /// First POI within `tolerance` of `pos` on both axes.
    pub fn find_at(&self, pos: Position, tolerance: f32) -> Option<&PointOfInterest> {
        self.points
            .iter()
            .find(|p| p.position().near(&pos, tolerance))
    }

    /// Check ids are unique and every coordinate lies on the floor.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        for p in &self.points {
            if !seen.insert(p.id.as_str()) {
                errors.push(ValidationError {
                    category: "poi_identity",
                    message: format!("Duplicate POI id '{}'", p.id),
                });
            }
            if !p.position().in_floor_bounds() {
                errors.push(ValidationError {
                    category: "poi_bounds",
                    message: format!("POI '{}' at ({}, {}) is off the floor", p.id, p.x, p.y),
                });
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn office_map_is_valid() {
        let map = PoiMap::office();
        assert_eq!(map.len(), 12);
        assert!(map.validate().is_empty());
    }

    #[test]
    fn arrival_status_by_kind() {
        assert_eq!(PoiKind::Seat.arrival_status(), AgentStatus::Sitting);
        assert_eq!(PoiKind::Stand.arrival_status(), AgentStatus::Action1);
        assert_eq!(PoiKind::Loiter.arrival_status(), AgentStatus::Idle);
    }

    #[test]
    fn find_at_uses_tolerance() {
        let map = PoiMap::office();
        let hit = map.find_at(Position::new(36.5, 41.6), 1.0).unwrap();
        assert_eq!(hit.id, "seat_top_1");
        assert!(map.find_at(Position::new(40.0, 42.0), 1.0).is_none());
    }

    #[test]
    fn validate_flags_duplicates_and_bounds() {
        let map = PoiMap::new(vec![
            PointOfInterest::new("a", 10.0, 10.0, PoiKind::Seat, Direction::Up),
            PointOfInterest::new("a", 120.0, 10.0, PoiKind::Loiter, Direction::Up),
        ]);
        let errors = map.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.category == "poi_identity"));
        assert!(errors.iter().any(|e| e.category == "poi_bounds"));
    }

    #[test]
    fn deserializes_type_field() {
        let json = r#"{"id":"sofa","x":5,"y":9,"type":"LOITER","direction":"LEFT"}"#;
        let p: PointOfInterest = serde_json::from_str(json).unwrap();
        assert_eq!(p.kind, PoiKind::Loiter);
        assert_eq!(p.direction, Direction::Left);
    }
}
