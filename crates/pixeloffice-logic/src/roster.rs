//! The starting cast and static asset paths.

use crate::poi::{PoiMap, ValidationError};
use crate::types::{Agent, AgentState, AgentStatus, Direction, Position, Role};

/// Floor-plan backdrop image.
pub const BACKGROUND_PATH: &str = "/background/office_map.png";

/// Sprite sheet path for a role.
pub fn sprite_path(role: Role) -> &'static str {
    match role {
        Role::Partner => "/sprites/partner.png",
        Role::Manager => "/sprites/manager.png",
        Role::TechBa => "/sprites/tech_ba.png",
        Role::FinanceBa => "/sprites/finance_ba.png",
        Role::NewGradBa => "/sprites/new_grad_ba.png",
    }
}

fn agent(
    id: &str,
    role: Role,
    name: &str,
    x: f32,
    y: f32,
    direction: Direction,
    status: AgentStatus,
) -> Agent {
    Agent {
        id: id.to_string(),
        role,
        name: name.to_string(),
        state: AgentState::at(Position::new(x, y), direction, status),
    }
}

/// Everyone starts already settled at a POI.
pub fn default_roster() -> Vec<Agent> {
    vec![
        agent("1", Role::Partner, "Boss", 91.0, 58.0, Direction::Left, AgentStatus::Sitting),
        agent("2", Role::Manager, "Alice", 16.0, 45.0, Direction::Right, AgentStatus::Action1),
        agent("3", Role::TechBa, "Bob", 36.0, 42.0, Direction::Down, AgentStatus::Sitting),
        agent("4", Role::FinanceBa, "Charlie", 50.0, 68.0, Direction::Up, AgentStatus::Sitting),
        agent("5", Role::NewGradBa, "David", 12.0, 75.0, Direction::Right, AgentStatus::Idle),
    ]
}

/// Check every agent is anchored on a POI whose arrival state it matches.
pub fn validate_roster(agents: &[Agent], pois: &PoiMap, tolerance: f32) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for a in agents {
        if !a.state.is_consistent() {
            errors.push(ValidationError {
                category: "agent_state",
                message: format!(
                    "Agent '{}' has status {:?} but target {:?}",
                    a.id, a.state.status, a.state.target
                ),
            });
        }
        match pois.find_at(a.state.position, tolerance) {
            None => errors.push(ValidationError {
                category: "agent_anchor",
                message: format!(
                    "Agent '{}' at ({}, {}) is not on a POI",
                    a.id, a.state.position.x, a.state.position.y
                ),
            }),
            Some(poi) => {
                if poi.kind.arrival_status() != a.state.status || poi.direction != a.state.direction {
                    errors.push(ValidationError {
                        category: "agent_anchor",
                        message: format!(
                            "Agent '{}' is {:?}/{:?} but POI '{}' expects {:?}/{:?}",
                            a.id,
                            a.state.status,
                            a.state.direction,
                            poi.id,
                            poi.kind.arrival_status(),
                            poi.direction
                        ),
                    });
                }
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_roster_is_anchored() {
        let errors = validate_roster(&default_roster(), &PoiMap::office(), 1.0);
        assert!(errors.is_empty(), "{:?}", errors);
    }

    #[test]
    fn roster_ids_and_roles_unique() {
        let roster = default_roster();
        let ids: HashSet<_> = roster.iter().map(|a| a.id.as_str()).collect();
        let roles: HashSet<_> = roster.iter().map(|a| a.role).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(roles.len(), Role::ALL.len());
    }

    #[test]
    fn misplaced_agent_is_reported() {
        let mut roster = default_roster();
        roster[0].state.position = Position::new(5.0, 5.0);
        roster[1].state.status = AgentStatus::Sitting;
        let errors = validate_roster(&roster, &PoiMap::office(), 1.0);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.category == "agent_anchor"));
    }

    #[test]
    fn every_role_has_a_sprite() {
        for role in Role::ALL {
            assert!(sprite_path(role).ends_with(".png"));
        }
    }
}
