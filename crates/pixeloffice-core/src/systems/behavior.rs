//! Behavior system - one simulation tick for every agent

use hecs::World;
use pixeloffice_logic::behavior::{update_agent, ErrandDraw, TickOutcome};
use pixeloffice_logic::config::SimConfig;
use pixeloffice_logic::poi::PoiMap;
use pixeloffice_logic::types::{AgentState, Position};
use rand::Rng;

use crate::components::{agent_state, Facing, Identity, Movement, Status};

/// Counts of what happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub errands_started: usize,
    pub moved: usize,
    pub arrived: usize,
}

/// Advance every agent by one tick.
///
/// Each agent's update reads only its own components and the POI map, so
/// results don't depend on iteration order. Entities are still visited in
/// id order so a seeded RNG hands out the same draws every run.
pub fn behavior_system<R: Rng + ?Sized>(
    world: &mut World,
    pois: &PoiMap,
    config: &SimConfig,
    rng: &mut R,
) -> TickStats {
    let mut current: Vec<(hecs::Entity, AgentState)> = world
        .query::<(&Position, &Facing, &Status, Option<&Movement>)>()
        .iter()
        .map(|(entity, (pos, facing, status, movement))| {
            (entity, agent_state(pos, facing, status, movement))
        })
        .collect();
    current.sort_by_key(|(entity, _)| entity.id());

    let mut stats = TickStats::default();
    let mut updates = Vec::with_capacity(current.len());
    for (entity, state) in current {
        let draw = ErrandDraw::roll(rng, pois.len());
        let (next, outcome) = update_agent(&state, draw, pois, config);
        match outcome {
            TickOutcome::Unchanged => continue,
            TickOutcome::StartedErrand => stats.errands_started += 1,
            TickOutcome::Moved => stats.moved += 1,
            TickOutcome::Arrived => stats.arrived += 1,
        }
        updates.push((entity, next, outcome));
    }

    for (entity, next, outcome) in updates {
        apply_state(world, entity, &next);
        if outcome != TickOutcome::Moved {
            log_transition(world, entity, &next, outcome);
        }
    }

    stats
}

/// Write a state back, keeping `Movement` present iff walking.
pub fn apply_state(world: &mut World, entity: hecs::Entity, state: &AgentState) {
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        *pos = state.position;
    }
    if let Ok(mut facing) = world.get::<&mut Facing>(entity) {
        facing.0 = state.direction;
    }
    if let Ok(mut status) = world.get::<&mut Status>(entity) {
        status.0 = state.status;
    }

    match state.target {
        Some(target) => {
            let _ = world.insert_one(entity, Movement { target });
        }
        None => {
            let _ = world.remove_one::<Movement>(entity);
        }
    }
}

fn log_transition(world: &World, entity: hecs::Entity, state: &AgentState, outcome: TickOutcome) {
    let Ok(identity) = world.get::<&Identity>(entity) else {
        return;
    };
    match outcome {
        TickOutcome::StartedErrand => {
            if let Some(t) = state.target {
                log::debug!("{} ({}) heads for ({}, {})", identity.name, identity.id, t.x, t.y);
            }
        }
        TickOutcome::Arrived => log::debug!(
            "{} ({}) arrived: {:?} facing {:?}",
            identity.name,
            identity.id,
            state.status,
            state.direction
        ),
        _ => {}
    }
}
