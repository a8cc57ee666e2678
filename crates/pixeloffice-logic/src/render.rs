//! Sprite selection and draw composition.
//!
//! Maps `(status, direction, animation tick)` to a grid cell, then combines
//! the cell with resolved sheet geometry into a [`SpriteDraw`]: everything
//! a front end needs to place one agent, with no knowledge of the sim.
//!
//! | Status | Row | Frame |
//! |--------|-----|-------|
//! | `Walking` | walk row by facing, LEFT = RIGHT mirrored | `tick % 4` |
//! | `Idle` | walk row by facing | `0` |
//! | `Sitting` | sitting | DOWN 0, UP 1, LEFT/RIGHT 2 (LEFT mirrored) |
//! | `Action1` | actions | `0 + tick % 2` |
//! | `Action2` | actions | `2 + tick % 2` |

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SimConfig;
use crate::sprite::{SpriteGrid, SpriteRenderConfig, SpriteRow};
use crate::types::{AgentState, AgentStatus, Direction, Position};

const WALK_FRAMES: u32 = 4;
const ACTION_FRAMES: u32 = 2;

/// Layer for agents seated behind the table edge.
pub const LAYER_SEATED_BEHIND: i32 = 15;
/// Layer for agents seated with their back to the viewer.
pub const LAYER_SEATED_FRONT: i32 = 25;
pub const LAYER_DEFAULT: i32 = 35;

/// A cell of the sprite grid, possibly mirrored horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteCell {
    pub row_index: u32,
    pub frame_index: u32,
    pub flipped: bool,
}

/// Pick the grid cell for an agent.
pub fn select_cell(
    status: AgentStatus,
    direction: Direction,
    tick: u64,
    grid: &SpriteGrid,
) -> SpriteCell {
    let cycle = |len: u32| (tick % len as u64) as u32;
    match status {
        AgentStatus::Walking | AgentStatus::Idle => {
            let row = match direction {
                Direction::Down => SpriteRow::WalkDown,
                Direction::Up => SpriteRow::WalkUp,
                Direction::Left | Direction::Right => SpriteRow::WalkRight,
            };
            let frame_index = if status == AgentStatus::Walking {
                cycle(WALK_FRAMES)
            } else {
                0
            };
            SpriteCell {
                row_index: grid.row_index(row),
                frame_index,
                flipped: direction == Direction::Left,
            }
        }
        AgentStatus::Sitting => SpriteCell {
            row_index: grid.row_index(SpriteRow::Sitting),
            frame_index: match direction {
                Direction::Down => 0,
                Direction::Up => 1,
                Direction::Left | Direction::Right => 2,
            },
            flipped: direction == Direction::Left,
        },
        AgentStatus::Action1 => SpriteCell {
            row_index: grid.row_index(SpriteRow::Actions),
            frame_index: cycle(ACTION_FRAMES),
            flipped: false,
        },
        AgentStatus::Action2 => SpriteCell {
            row_index: grid.row_index(SpriteRow::Actions),
            frame_index: ACTION_FRAMES + cycle(ACTION_FRAMES),
            flipped: false,
        },
    }
}

/// Frame advance interval for a status, `None` if it doesn't animate.
pub fn animation_interval(status: AgentStatus, config: &SimConfig) -> Option<Duration> {
    match status {
        AgentStatus::Walking => Some(config.walk_frame_interval()),
        AgentStatus::Action1 | AgentStatus::Action2 => Some(config.action_frame_interval()),
        AgentStatus::Idle | AgentStatus::Sitting => None,
    }
}

/// Draw order for an agent; higher draws on top.
pub fn layer(status: AgentStatus, direction: Direction) -> i32 {
    match (status, direction) {
        (AgentStatus::Sitting, Direction::Down) => LAYER_SEATED_BEHIND,
        (AgentStatus::Sitting, Direction::Up) => LAYER_SEATED_FRONT,
        _ => LAYER_DEFAULT,
    }
}

/// Fully composed draw instruction for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDraw {
    /// Anchor on the floor plan, in percent. The sprite is centered on it.
    pub anchor: Position,
    /// Extra uniform scale around the anchor.
    pub scale: f32,
    /// Viewport size in sheet pixels (before `scale`).
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Height actually shown; less than `viewport_height` when clipped.
    pub visible_height: f32,
    /// Size the whole sheet is stretched to behind the viewport.
    pub sheet_width: f32,
    pub sheet_height: f32,
    /// Background position inside the viewport.
    pub offset_x: f32,
    pub offset_y: f32,
    pub flipped: bool,
    pub layer: i32,
    pub cell: SpriteCell,
}

impl SpriteDraw {
    pub fn is_clipped(&self) -> bool {
        self.visible_height < self.viewport_height
    }
}

/// Compose the draw for an agent whose sheet has resolved geometry.
///
/// Agents seated facing down sit behind the table, so only the upper
/// `sitting_clip_ratio` of the frame is shown.
pub fn compose(
    state: &AgentState,
    tick: u64,
    geometry: &SpriteRenderConfig,
    grid: &SpriteGrid,
    config: &SimConfig,
) -> SpriteDraw {
    let cell = select_cell(state.status, state.direction, tick, grid);
    let (offset_x, offset_y) = geometry.background_offset(cell.row_index, cell.frame_index);
    let behind_table =
        state.status == AgentStatus::Sitting && state.direction == Direction::Down;
    let visible_height = if behind_table {
        geometry.frame_height * config.sitting_clip_ratio
    } else {
        geometry.frame_height
    };

    SpriteDraw {
        anchor: state.position,
        scale: config.display_scale,
        viewport_width: geometry.frame_width,
        viewport_height: geometry.frame_height,
        visible_height,
        sheet_width: geometry.sheet_width,
        sheet_height: geometry.sheet_height,
        offset_x,
        offset_y,
        flipped: cell.flipped,
        layer: layer(state.status, state.direction),
        cell,
    }
}
