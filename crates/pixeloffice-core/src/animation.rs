//! Per-agent animation timers.
//!
//! Frame advancement runs on its own clock, separate from the simulation
//! tick: 150 ms per frame while walking and 200 ms during actions by
//! default. Timers live in a registry keyed by entity. [`AnimationRegistry::sync`]
//! starts a timer when an agent enters an animating status, restarts it when
//! the agent switches between two animating statuses, and cancels it when the
//! agent stops animating or disappears.

use hecs::{Entity, World};
use pixeloffice_logic::config::SimConfig;
use pixeloffice_logic::render::animation_interval;
use pixeloffice_logic::types::AgentStatus;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::components::Status;

/// A running frame timer for one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTimer {
    /// Status the timer was started for.
    pub status: AgentStatus,
    pub interval: Duration,
    elapsed: Duration,
    /// Monotonic frame counter; the sprite picks `frame % row_len`.
    pub frame: u64,
}

impl AnimationTimer {
    pub fn new(status: AgentStatus, interval: Duration) -> Self {
        Self {
            status,
            interval,
            elapsed: Duration::ZERO,
            frame: 0,
        }
    }

    fn advance(&mut self, dt: Duration) {
        if self.interval.is_zero() {
            return;
        }
        self.elapsed += dt;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.frame += 1;
        }
    }
}

/// What a [`AnimationRegistry::sync`] pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub started: usize,
    pub cancelled: usize,
}

/// Registry of animation timers keyed by entity.
#[derive(Debug, Default)]
pub struct AnimationRegistry {
    timers: HashMap<Entity, AnimationTimer>,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start, restart or cancel timers to match each agent's status.
    pub fn sync(&mut self, world: &World, config: &SimConfig) -> SyncReport {
        let mut report = SyncReport::default();
        let mut seen = HashSet::new();

        for (entity, status) in world.query::<&Status>().iter() {
            seen.insert(entity);
            match animation_interval(status.0, config) {
                Some(interval) => {
                    let running = self.timers.get(&entity).map(|t| t.status);
                    if running != Some(status.0) {
                        if running.is_some() {
                            report.cancelled += 1;
                        }
                        self.timers
                            .insert(entity, AnimationTimer::new(status.0, interval));
                        report.started += 1;
                    }
                }
                None => {
                    if self.timers.remove(&entity).is_some() {
                        report.cancelled += 1;
                    }
                }
            }
        }

        let before = self.timers.len();
        self.timers.retain(|entity, _| seen.contains(entity));
        report.cancelled += before - self.timers.len();

        report
    }

    /// Advance every running timer by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        for timer in self.timers.values_mut() {
            timer.advance(dt);
        }
    }

    /// Frame counter for an agent; `0` when it isn't animating.
    pub fn frame(&self, entity: Entity) -> u64 {
        self.timers.get(&entity).map_or(0, |t| t.frame)
    }

    pub fn timer(&self, entity: Entity) -> Option<&AnimationTimer> {
        self.timers.get(&entity)
    }

    pub fn is_running(&self, entity: Entity) -> bool {
        self.timers.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_status(world: &mut World, e: Entity, status: AgentStatus) {
        world.get::<&mut Status>(e).unwrap().0 = status;
    }

    #[test]
    fn starts_only_for_animating_statuses() {
        let mut world = World::new();
        let walker = world.spawn((Status(AgentStatus::Walking),));
        let sitter = world.spawn((Status(AgentStatus::Sitting),));
        let actor = world.spawn((Status(AgentStatus::Action1),));

        let mut reg = AnimationRegistry::new();
        let report = reg.sync(&world, &SimConfig::default());
        assert_eq!(report.started, 2);
        assert!(reg.is_running(walker));
        assert!(reg.is_running(actor));
        assert!(!reg.is_running(sitter));
        assert_eq!(reg.timer(walker).unwrap().interval, Duration::from_millis(150));
        assert_eq!(reg.timer(actor).unwrap().interval, Duration::from_millis(200));
    }

    #[test]
    fn advances_on_its_own_interval() {
        let mut world = World::new();
        let walker = world.spawn((Status(AgentStatus::Walking),));
        let mut reg = AnimationRegistry::new();
        reg.sync(&world, &SimConfig::default());

        reg.advance(Duration::from_millis(100));
        assert_eq!(reg.frame(walker), 0);
        reg.advance(Duration::from_millis(100));
        assert_eq!(reg.frame(walker), 1);
        reg.advance(Duration::from_millis(400));
        assert_eq!(reg.frame(walker), 4);
    }

    #[test]
    fn cancels_when_agent_stops_animating() {
        let mut world = World::new();
        let e = world.spawn((Status(AgentStatus::Walking),));
        let config = SimConfig::default();
        let mut reg = AnimationRegistry::new();
        reg.sync(&world, &config);
        reg.advance(Duration::from_millis(450));
        assert_eq!(reg.frame(e), 3);

        set_status(&mut world, e, AgentStatus::Sitting);
        let report = reg.sync(&world, &config);
        assert_eq!(report.cancelled, 1);
        assert!(!reg.is_running(e));
        assert_eq!(reg.frame(e), 0);
    }

    #[test]
    fn switching_animations_restarts_timer() {
        let mut world = World::new();
        let e = world.spawn((Status(AgentStatus::Walking),));
        let config = SimConfig::default();
        let mut reg = AnimationRegistry::new();
        reg.sync(&world, &config);
        reg.advance(Duration::from_millis(300));

        set_status(&mut world, e, AgentStatus::Action1);
        let report = reg.sync(&world, &config);
        assert_eq!(report, SyncReport { started: 1, cancelled: 1 });
        assert_eq!(reg.frame(e), 0);
        assert_eq!(reg.timer(e).unwrap().interval, Duration::from_millis(200));

        // Same status again is a no-op.
        assert_eq!(reg.sync(&world, &config), SyncReport::default());
    }

    #[test]
    fn despawned_agents_lose_their_timer() {
        let mut world = World::new();
        let e = world.spawn((Status(AgentStatus::Action2),));
        let config = SimConfig::default();
        let mut reg = AnimationRegistry::new();
        reg.sync(&world, &config);
        world.despawn(e).unwrap();
        let report = reg.sync(&world, &config);
        assert_eq!(report.cancelled, 1);
        assert!(reg.is_empty());
    }
}
