//! Straight-line motion toward a target.
//!
//! Each tick a walker either snaps onto its target (closer than the arrival
//! threshold) and takes on the state of the POI found there, or advances
//! `walk_speed` units along the unit vector to the target. There is no
//! pathfinding and no collision avoidance.

use crate::config::SimConfig;
use crate::poi::PoiMap;
use crate::types::{AgentState, AgentStatus, Direction, Position};

/// Facing from a travel delta: the dominant axis wins, ties go vertical.
pub fn facing_from_delta(dx: f32, dy: f32) -> Direction {
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Status and facing for an agent that has just reached `target`.
///
/// Without a POI within tolerance the agent idles and keeps `prior`.
pub fn resolve_arrival(
    target: Position,
    prior: Direction,
    pois: &PoiMap,
    tolerance: f32,
) -> (AgentStatus, Direction) {
    match pois.find_at(target, tolerance) {
        Some(poi) => (poi.kind.arrival_status(), poi.direction),
        None => (AgentStatus::Idle, prior),
    }
}

/// Advance a walking agent by one tick.
///
/// Agents without a target are returned as idle; callers only pass
/// walkers, so this is the degenerate case.
pub fn advance(state: &AgentState, pois: &PoiMap, config: &SimConfig) -> AgentState {
    let Some(target) = state.target else {
        return AgentState {
            status: AgentStatus::Idle,
            ..*state
        };
    };

    let dx = target.x - state.position.x;
    let dy = target.y - state.position.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < config.arrival_threshold {
        let (status, direction) =
            resolve_arrival(target, state.direction, pois, config.poi_tolerance);
        return AgentState {
            position: target,
            direction,
            status,
            target: None,
        };
    }

    let step = config.walk_speed / distance;
    AgentState {
        position: Position::new(state.position.x + dx * step, state.position.y + dy * step),
        direction: facing_from_delta(dx, dy),
        status: AgentStatus::Walking,
        target: Some(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walker(x: f32, y: f32, tx: f32, ty: f32) -> AgentState {
        AgentState {
            position: Position::new(x, y),
            direction: Direction::Down,
            status: AgentStatus::Walking,
            target: Some(Position::new(tx, ty)),
        }
    }

    #[test]
    fn facing_examples() {
        assert_eq!(facing_from_delta(5.0, 1.0), Direction::Right);
        assert_eq!(facing_from_delta(-5.0, 1.0), Direction::Left);
        assert_eq!(facing_from_delta(1.0, 5.0), Direction::Down);
        assert_eq!(facing_from_delta(1.0, -5.0), Direction::Up);
    }

    #[test]
    fn facing_tie_goes_vertical() {
        assert_eq!(facing_from_delta(3.0, 3.0), Direction::Down);
        assert_eq!(facing_from_delta(3.0, -3.0), Direction::Up);
    }

    #[test]
    fn moves_one_unit_toward_target() {
        let config = SimConfig::default();
        let next = advance(&walker(0.0, 0.0, 30.0, 40.0), &PoiMap::office(), &config);
        assert!((next.position.x - 0.6).abs() < 1e-5);
        assert!((next.position.y - 0.8).abs() < 1e-5);
        assert_eq!(next.direction, Direction::Down);
        assert!(next.is_consistent());
    }

    #[test]
    fn snaps_exactly_on_arrival_at_seat() {
        let config = SimConfig::default();
        let next = advance(&walker(36.4, 42.5, 36.0, 42.0), &PoiMap::office(), &config);
        assert_eq!(next.position, Position::new(36.0, 42.0));
        assert_eq!(next.status, AgentStatus::Sitting);
        assert_eq!(next.direction, Direction::Down);
        assert!(next.target.is_none());
    }

    #[test]
    fn stand_and_loiter_arrivals() {
        let config = SimConfig::default();
        let pois = PoiMap::office();

        let at_board = advance(&walker(16.5, 45.0, 16.0, 45.0), &pois, &config);
        assert_eq!(at_board.status, AgentStatus::Action1);
        assert_eq!(at_board.direction, Direction::Right);

        let at_door = advance(&walker(78.0, 75.5, 78.0, 75.0), &pois, &config);
        assert_eq!(at_door.status, AgentStatus::Idle);
        assert_eq!(at_door.direction, Direction::Up);
    }

    #[test]
    fn arrival_off_poi_idles_and_keeps_facing() {
        let config = SimConfig::default();
        let mut s = walker(20.2, 20.0, 20.0, 20.0);
        s.direction = Direction::Left;
        let next = advance(&s, &PoiMap::office(), &config);
        assert_eq!(next.position, Position::new(20.0, 20.0));
        assert_eq!(next.status, AgentStatus::Idle);
        assert_eq!(next.direction, Direction::Left);
    }

    #[test]
    fn walker_without_target_idles() {
        let config = SimConfig::default();
        let mut s = walker(10.0, 10.0, 0.0, 0.0);
        s.target = None;
        let next = advance(&s, &PoiMap::office(), &config);
        assert_eq!(next.status, AgentStatus::Idle);
        assert_eq!(next.position, Position::new(10.0, 10.0));
    }
}
