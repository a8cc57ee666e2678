//! Per-tick agent state machine.
//!
//! Walkers keep walking (see [`crate::motion`]). Everyone else rolls once per
//! tick: below `errand_probability` they pick a uniformly random POI from
//! the whole map and start walking there. Occupancy is ignored, so two
//! agents can head for the same chair.
//!
//! Randomness enters as an [`ErrandDraw`] so [`update_agent`] stays a pure
//! function of the agent, the draw and the read-only POI map.

use rand::Rng;

use crate::config::SimConfig;
use crate::motion;
use crate::poi::PoiMap;
use crate::types::{AgentState, AgentStatus};

/// The random values consumed by one agent's tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrandDraw {
    /// Uniform in `[0, 1)`; compared against the errand probability.
    pub chance: f32,
    /// Index into the POI map, already reduced modulo its length.
    pub pick: usize,
}

impl ErrandDraw {
    /// Draw from `rng` for a map of `poi_count` points.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, poi_count: usize) -> Self {
        let chance = rng.gen::<f32>();
        let pick = if poi_count == 0 {
            0
        } else {
            rng.gen_range(0..poi_count)
        };
        Self { chance, pick }
    }

    /// A draw that always starts an errand toward POI `pick`.
    pub fn forced(pick: usize) -> Self {
        Self { chance: 0.0, pick }
    }

    /// A draw that never starts an errand.
    pub fn quiet() -> Self {
        Self { chance: 1.0, pick: 0 }
    }
}

/// What happened to an agent during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Unchanged,
    StartedErrand,
    Moved,
    Arrived,
}

/// Advance one agent by one tick.
pub fn update_agent(
    state: &AgentState,
    draw: ErrandDraw,
    pois: &PoiMap,
    config: &SimConfig,
) -> (AgentState, TickOutcome) {
    if state.status == AgentStatus::Walking {
        let next = motion::advance(state, pois, config);
        let outcome = if next.status == AgentStatus::Walking {
            TickOutcome::Moved
        } else {
            TickOutcome::Arrived
        };
        return (next, outcome);
    }

    if draw.chance < config.errand_probability {
        if let Some(poi) = pois.get(draw.pick) {
            let next = AgentState {
                status: AgentStatus::Walking,
                target: Some(poi.position()),
                ..*state
            };
            return (next, TickOutcome::StartedErrand);
        }
    }

    (*state, TickOutcome::Unchanged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sitting() -> AgentState {
        AgentState::at(Position::new(91.0, 58.0), Direction::Left, AgentStatus::Sitting)
    }

    #[test]
    fn draw_below_threshold_starts_errand_to_poi() {
        let pois = PoiMap::office();
        let config = SimConfig::default();
        for pick in 0..pois.len() {
            let (next, outcome) = update_agent(&sitting(), ErrandDraw::forced(pick), &pois, &config);
            assert_eq!(outcome, TickOutcome::StartedErrand);
            assert_eq!(next.status, AgentStatus::Walking);
            assert_eq!(next.target, Some(pois.get(pick).unwrap().position()));
            // Does not move on the tick it sets off.
            assert_eq!(next.position, sitting().position);
            assert!(next.is_consistent());
        }
    }

    #[test]
    fn draw_above_threshold_changes_nothing() {
        let pois = PoiMap::office();
        let config = SimConfig::default();
        let draw = ErrandDraw {
            chance: 0.005,
            pick: 3,
        };
        let (next, outcome) = update_agent(&sitting(), draw, &pois, &config);
        assert_eq!(outcome, TickOutcome::Unchanged);
        assert_eq!(next, sitting());

        let (next, _) = update_agent(&sitting(), ErrandDraw::quiet(), &pois, &config);
        assert_eq!(next, sitting());
    }

    #[test]
    fn empty_map_never_starts_errand() {
        let pois = PoiMap::default();
        let config = SimConfig::default();
        let (next, outcome) = update_agent(&sitting(), ErrandDraw::forced(0), &pois, &config);
        assert_eq!(outcome, TickOutcome::Unchanged);
        assert_eq!(next, sitting());
    }

    #[test]
    fn walkers_ignore_the_draw() {
        let pois = PoiMap::office();
        let config = SimConfig::default();
        let state = AgentState {
            position: Position::new(50.0, 50.0),
            direction: Direction::Down,
            status: AgentStatus::Walking,
            target: Some(Position::new(36.0, 42.0)),
        };
        let (next, outcome) = update_agent(&state, ErrandDraw::forced(11), &pois, &config);
        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(next.target, Some(Position::new(36.0, 42.0)));
    }

    #[test]
    fn roll_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let d = ErrandDraw::roll(&mut rng, 12);
            assert!((0.0..1.0).contains(&d.chance));
            assert!(d.pick < 12);
        }
        let d = ErrandDraw::roll(&mut rng, 0);
        assert_eq!(d.pick, 0);
    }

    #[test]
    fn errand_rate_matches_probability() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = SimConfig::default();
        let hits = (0..200_000)
            .filter(|_| ErrandDraw::roll(&mut rng, 12).chance < config.errand_probability)
            .count();
        // Expected 1000.
        assert!((700..1300).contains(&hits), "hits={hits}");
    }
}
