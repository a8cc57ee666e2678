//! Render projection - turns the world into ordered sprite draws

use hecs::{Entity, World};
use pixeloffice_logic::config::SimConfig;
use pixeloffice_logic::render::{compose, SpriteDraw};
use pixeloffice_logic::types::{Position, Role};

use crate::animation::AnimationRegistry;
use crate::assets::SpriteAssets;
use crate::components::{agent_state, Facing, Identity, Movement, Status};
use crate::interaction::InteractionTracker;

/// One agent ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSprite {
    pub entity: Entity,
    pub agent_id: String,
    pub role: Role,
    pub name: String,
    pub draw: SpriteDraw,
    /// An interaction request is in flight.
    pub busy: bool,
}

/// Project every renderable agent, back to front.
///
/// Agents whose sprite sheet hasn't loaded are left out. Equal layers keep
/// entity order so the output is stable between frames.
pub fn render_system(
    world: &World,
    assets: &SpriteAssets,
    animations: &AnimationRegistry,
    interactions: &InteractionTracker,
    config: &SimConfig,
) -> Vec<AgentSprite> {
    let mut sprites: Vec<AgentSprite> = world
        .query::<(&Identity, &Position, &Facing, &Status, Option<&Movement>)>()
        .iter()
        .filter_map(|(entity, (identity, pos, facing, status, movement))| {
            let geometry = assets.geometry(identity.role)?;
            let state = agent_state(pos, facing, status, movement);
            let draw = compose(
                &state,
                animations.frame(entity),
                geometry,
                assets.grid(),
                config,
            );
            Some(AgentSprite {
                entity,
                agent_id: identity.id.clone(),
                role: identity.role,
                name: identity.name.clone(),
                draw,
                busy: interactions.is_busy(entity),
            })
        })
        .collect();

    sprites.sort_by_key(|s| (s.draw.layer, s.entity.id()));
    sprites
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::spawn_agent;
    use pixeloffice_logic::render::{LAYER_DEFAULT, LAYER_SEATED_BEHIND, LAYER_SEATED_FRONT};
    use pixeloffice_logic::roster::default_roster;
    use pixeloffice_logic::sprite::SpriteGrid;

    fn office_world() -> World {
        let mut world = World::new();
        for agent in default_roster() {
            spawn_agent(&mut world, &agent);
        }
        world
    }

    fn loaded_assets() -> SpriteAssets {
        let mut assets = SpriteAssets::new(SpriteGrid::default(), 220.0);
        for role in Role::ALL {
            assets.complete(role, 2000, 3000).unwrap();
        }
        assets
    }

    #[test]
    fn draws_sorted_by_layer() {
        let world = office_world();
        let sprites = render_system(
            &world,
            &loaded_assets(),
            &AnimationRegistry::new(),
            &InteractionTracker::new(),
            &SimConfig::default(),
        );
        assert_eq!(sprites.len(), 5);
        let layers: Vec<i32> = sprites.iter().map(|s| s.draw.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);
        assert_eq!(sprites[0].name, "Bob");
        assert_eq!(sprites[0].draw.layer, LAYER_SEATED_BEHIND);
        assert_eq!(sprites[1].name, "Charlie");
        assert_eq!(sprites[1].draw.layer, LAYER_SEATED_FRONT);
        assert!(sprites[2..].iter().all(|s| s.draw.layer == LAYER_DEFAULT));
        assert!(sprites.iter().all(|s| !s.busy));
    }

    #[test]
    fn pending_sheets_are_skipped() {
        let world = office_world();
        let mut assets = SpriteAssets::new(SpriteGrid::default(), 220.0);
        assets.complete(Role::Partner, 2000, 3000).unwrap();
        let sprites = render_system(
            &world,
            &assets,
            &AnimationRegistry::new(),
            &InteractionTracker::new(),
            &SimConfig::default(),
        );
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].role, Role::Partner);
        assert!(sprites[0].draw.flipped);
    }
}
