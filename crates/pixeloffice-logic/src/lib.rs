//! Pure simulation logic for PixelOffice.
//!
//! This crate contains all agent and sprite logic that is independent of
//! the ECS world, asset loading or any rendering backend. Functions take
//! plain data and return results, making them unit-testable and reusable
//! from the engine crate, the headless simtest and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Roles, directions, statuses, percentage-space positions, agents |
//! | [`config`] | Tuning constants (tick, speed, probability, base frame width) |
//! | [`poi`] | Static points of interest on the floor plan |
//! | [`motion`] | Straight-line motion, facing from travel, arrival snapping |
//! | [`behavior`] | Per-tick state machine with injected random draws |
//! | [`sprite`] | Sprite-sheet grid and display-width normalization |
//! | [`render`] | Status/direction/tick to sprite cell, draw composition |
//! | [`roster`] | Initial cast and per-role asset paths |

pub mod behavior;
pub mod config;
pub mod motion;
pub mod poi;
pub mod render;
pub mod roster;
pub mod sprite;
pub mod types;
