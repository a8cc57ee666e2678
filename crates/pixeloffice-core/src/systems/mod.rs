//! Systems - logic that operates on components

mod behavior;
mod render;

pub use behavior::*;
pub use render::*;
