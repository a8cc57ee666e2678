//! PixelOffice Core - Office Floor Simulation Engine
//!
//! An ECS-based simulation of a small consulting office: a handful of
//! characters sit, stand at the whiteboard, wander to the door and back, and
//! respond to clicks.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Agents
//! - **Components**: Pure data attached to entities (Identity, Position, Facing, Status, Movement)
//! - **Systems**: Logic that queries and updates components
//!
//! Per-agent rules live in `pixeloffice_logic`; this crate owns the world,
//! the clocks, sprite assets and the backend seam.
//!
//! # Example
//!
//! ```rust,no_run
//! use pixeloffice_core::prelude::*;
//! use std::time::Duration;
//!
//! let mut sim = OfficeSimulation::new(SimConfig::default())?;
//! sim.assets_mut().load_dir(std::path::Path::new("public"));
//!
//! loop {
//!     sim.update(Duration::from_millis(16));
//!     for sprite in sim.render() {
//!         // draw sprite.draw
//!         let _ = sprite;
//!     }
//! }
//! # Ok::<(), pixeloffice_core::engine::SetupError>(())
//! ```

pub mod animation;
pub mod api;
pub mod assets;
pub mod components;
pub mod engine;
pub mod interaction;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::OfficeSimulation;
    pub use crate::systems::{AgentSprite, TickStats};
    pub use pixeloffice_logic::config::SimConfig;
    pub use pixeloffice_logic::types::{AgentStatus, Direction, Position, Role};
}
