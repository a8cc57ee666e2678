//! Component definitions for the office simulation.
//!
//! Components are pure data attached to agent entities. Positions reuse
//! [`pixeloffice_logic::types::Position`] directly.

use pixeloffice_logic::types::{Agent, AgentState, AgentStatus, Direction, Position, Role};
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

/// Who an agent is. Never changes after spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub role: Role,
    pub name: String,
}

/// Current facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facing(pub Direction);

/// Current activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status(pub AgentStatus);

/// Movement component - present only while the entity is walking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub target: Position,
}

/// Split an agent into its spawn bundle.
pub fn agent_bundle(agent: &Agent) -> (Identity, Position, Facing, Status) {
    (
        Identity {
            id: agent.id.clone(),
            role: agent.role,
            name: agent.name.clone(),
        },
        agent.state.position,
        Facing(agent.state.direction),
        Status(agent.state.status),
    )
}

/// Spawn an agent, with `Movement` if it is already walking.
pub fn spawn_agent(world: &mut World, agent: &Agent) -> Entity {
    let entity = world.spawn(agent_bundle(agent));
    if let Some(target) = agent.state.target {
        let _ = world.insert_one(entity, Movement { target });
    }
    entity
}

/// Reassemble the per-tick state from components.
pub fn agent_state(
    position: &Position,
    facing: &Facing,
    status: &Status,
    movement: Option<&Movement>,
) -> AgentState {
    AgentState {
        position: *position,
        direction: facing.0,
        status: status.0,
        target: movement.map(|m| m.target),
    }
}
