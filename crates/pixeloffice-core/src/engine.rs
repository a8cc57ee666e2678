//! Simulation engine - main entry point for running the office

use hecs::{Entity, World};
use pixeloffice_logic::config::{ConfigError, SimConfig};
use pixeloffice_logic::poi::{PoiMap, ValidationError};
use pixeloffice_logic::roster::{default_roster, validate_roster};
use pixeloffice_logic::sprite::SpriteGrid;
use pixeloffice_logic::types::{Agent, AgentStatus, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::animation::AnimationRegistry;
use crate::api::{Reply, Transport, TransportError};
use crate::assets::SpriteAssets;
use crate::components::*;
use crate::interaction::{dispatch, InteractionTracker, PendingInteraction};
use crate::systems::*;

/// Main simulation engine
pub struct OfficeSimulation {
    /// ECS world containing all agents
    pub world: World,
    pois: PoiMap,
    config: SimConfig,
    rng: StdRng,
    /// Time not yet consumed by a whole tick.
    accumulator: Duration,
    ticks: u64,
    animations: AnimationRegistry,
    assets: SpriteAssets,
    interactions: InteractionTracker,
}

impl OfficeSimulation {
    /// The reference office with the default cast.
    pub fn new(config: SimConfig) -> Result<Self, SetupError> {
        Self::with_roster(config, PoiMap::office(), &default_roster())
    }

    /// An office with a custom floor plan and cast.
    ///
    /// Rejects a config that fails [`SimConfig::validate`] and any agent
    /// whose status disagrees with its target.
    pub fn with_roster(
        config: SimConfig,
        pois: PoiMap,
        roster: &[Agent],
    ) -> Result<Self, SetupError> {
        config.validate()?;
        if let Some(agent) = roster.iter().find(|a| !a.state.is_consistent()) {
            return Err(SetupError::InconsistentAgent(agent.id.clone()));
        }
        Ok(Self::build(config, pois, roster))
    }

    fn build(config: SimConfig, pois: PoiMap, roster: &[Agent]) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let assets = SpriteAssets::new(SpriteGrid::default(), config.base_frame_width);
        let mut sim = Self {
            world: World::new(),
            pois,
            config,
            rng,
            accumulator: Duration::ZERO,
            ticks: 0,
            animations: AnimationRegistry::new(),
            assets,
            interactions: InteractionTracker::new(),
        };
        for agent in roster {
            spawn_agent(&mut sim.world, agent);
        }
        sim.animations.sync(&sim.world, &sim.config);
        log::info!(
            "Office ready: {} agents, {} points of interest",
            roster.len(),
            sim.pois.len()
        );
        sim
    }

    /// Validate the configured POIs and current agents together.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.pois.validate();
        errors.extend(validate_roster(
            &self.agents(),
            &self.pois,
            self.config.poi_tolerance,
        ));
        errors
    }

    /// Advance by wall-clock `dt`.
    ///
    /// Runs as many fixed ticks as fit in the accumulated time, then moves
    /// the animation clocks forward by the full `dt`. Returns the number of
    /// ticks run.
    pub fn update(&mut self, dt: Duration) -> u32 {
        let step = self.config.tick_interval();
        self.accumulator += dt;
        let mut ran = 0;
        if !step.is_zero() {
            while self.accumulator >= step {
                self.accumulator -= step;
                self.tick();
                ran += 1;
            }
        }
        self.animations.advance(dt);
        ran
    }

    /// Run exactly one simulation tick.
    pub fn tick(&mut self) -> TickStats {
        let stats = behavior_system(&mut self.world, &self.pois, &self.config, &mut self.rng);
        self.animations.sync(&self.world, &self.config);
        self.ticks += 1;
        stats
    }

    /// Ordered sprite draws for the current state.
    pub fn render(&self) -> Vec<AgentSprite> {
        render_system(
            &self.world,
            &self.assets,
            &self.animations,
            &self.interactions,
            &self.config,
        )
    }

    /// Send an agent walking to a POI right away.
    pub fn send_to(&mut self, agent_id: &str, poi_id: &str) -> bool {
        let (Some(entity), Some(poi)) = (self.find(agent_id), self.pois.by_id(poi_id)) else {
            return false;
        };
        let target = poi.position();
        if let Ok(mut status) = self.world.get::<&mut Status>(entity) {
            status.0 = AgentStatus::Walking;
        }
        let _ = self.world.insert_one(entity, Movement { target });
        self.animations.sync(&self.world, &self.config);
        log::debug!("Agent {} sent to {}", agent_id, poi_id);
        true
    }

    pub fn find(&self, agent_id: &str) -> Option<Entity> {
        self.world
            .query::<&Identity>()
            .iter()
            .find(|(_, identity)| identity.id == agent_id)
            .map(|(entity, _)| entity)
    }

    /// Snapshot of one agent.
    pub fn agent(&self, agent_id: &str) -> Option<Agent> {
        self.agents().into_iter().find(|a| a.id == agent_id)
    }

    /// Snapshot of every agent in spawn order.
    pub fn agents(&self) -> Vec<Agent> {
        let mut agents: Vec<(u32, Agent)> = self
            .world
            .query::<(&Identity, &Position, &Facing, &Status, Option<&Movement>)>()
            .iter()
            .map(|(entity, (identity, pos, facing, status, movement))| {
                (
                    entity.id(),
                    Agent {
                        id: identity.id.clone(),
                        role: identity.role,
                        name: identity.name.clone(),
                        state: agent_state(pos, facing, status, movement),
                    },
                )
            })
            .collect();
        agents.sort_by_key(|(id, _)| *id);
        agents.into_iter().map(|(_, a)| a).collect()
    }

    /// Start an interaction. `None` if the agent is unknown or busy.
    pub fn click(&mut self, agent_id: &str) -> Option<PendingInteraction> {
        let entity = self.find(agent_id)?;
        let identity = self.world.get::<&Identity>(entity).ok()?;
        self.interactions.begin(entity, &identity)
    }

    pub fn settle_interaction(
        &mut self,
        pending: PendingInteraction,
        result: &Result<Reply, TransportError>,
    ) {
        self.interactions.settle(pending, result);
    }

    /// Click and complete the request synchronously.
    pub fn click_with<T: Transport + ?Sized>(
        &mut self,
        agent_id: &str,
        transport: &mut T,
    ) -> Option<Result<Reply, TransportError>> {
        let pending = self.click(agent_id)?;
        let result = dispatch(&pending, transport);
        self.settle_interaction(pending, &result);
        Some(result)
    }

    pub fn is_busy(&self, agent_id: &str) -> bool {
        self.find(agent_id)
            .is_some_and(|entity| self.interactions.is_busy(entity))
    }

    /// Stop all timers and drop in-flight interaction flags.
    pub fn teardown(&mut self) {
        self.animations.clear();
        self.interactions.clear();
        self.accumulator = Duration::ZERO;
    }

    pub fn assets(&self) -> &SpriteAssets {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut SpriteAssets {
        &mut self.assets
    }

    pub fn animations(&self) -> &AnimationRegistry {
        &self.animations
    }

    pub fn pois(&self) -> &PoiMap {
        &self.pois
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn agent_count(&self) -> usize {
        self.world.query::<&Identity>().iter().count()
    }

    /// Count agents currently walking
    pub fn walking_count(&self) -> usize {
        self.world.query::<&Movement>().iter().count()
    }
}

impl Default for OfficeSimulation {
    fn default() -> Self {
        Self::build(SimConfig::default(), PoiMap::office(), &default_roster())
    }
}

/// Errors that can occur while setting up a simulation
#[derive(Debug)]
pub enum SetupError {
    Config(ConfigError),
    /// Agent whose status and target disagree.
    InconsistentAgent(String),
}

impl From<ConfigError> for SetupError {
    fn from(e: ConfigError) -> Self {
        SetupError::Config(e)
    }
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Config(e) => write!(f, "Config error: {}", e),
            SetupError::InconsistentAgent(id) => {
                write!(f, "Agent '{}' status and target disagree", id)
            }
        }
    }
}

impl std::error::Error for SetupError {}
