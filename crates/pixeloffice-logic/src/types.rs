//! Core data model: roles, facing, activity status, positions and agents.
//!
//! Positions live in percentage space: `(0, 0)` is the top-left corner of
//! the floor plan and `(100, 100)` the bottom-right.

use serde::{Deserialize, Serialize};

/// Job role of a character. Selects the sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Partner,
    Manager,
    TechBa,
    FinanceBa,
    NewGradBa,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Partner,
        Role::Manager,
        Role::TechBa,
        Role::FinanceBa,
        Role::NewGradBa,
    ];

    /// Wire name, e.g. `"NEW_GRAD_BA"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Partner => "PARTNER",
            Role::Manager => "MANAGER",
            Role::TechBa => "TECH_BA",
            Role::FinanceBa => "FINANCE_BA",
            Role::NewGradBa => "NEW_GRAD_BA",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What an agent is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    /// Standing still.
    Idle,
    /// Travelling toward a target.
    Walking,
    /// Seated at a chair.
    Sitting,
    /// Presenting / pointing at the whiteboard.
    #[serde(rename = "ACTION_1")]
    Action1,
    /// Arms crossed / frustrated.
    #[serde(rename = "ACTION_2")]
    Action2,
}

impl AgentStatus {
    /// True for the two action poses.
    pub fn is_action(self) -> bool {
        matches!(self, AgentStatus::Action1 | AgentStatus::Action2)
    }

    /// True if the sprite cycles frames in this status.
    pub fn is_animated(self) -> bool {
        self == AgentStatus::Walking || self.is_action()
    }
}

/// 2D point in percentage space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True if both axes are within `tolerance` (strict) of `other`.
    pub fn near(&self, other: &Self, tolerance: f32) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }

    /// True if the point lies inside `[0, 100] × [0, 100]`.
    pub fn in_floor_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// The mutable part of an agent, advanced once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub position: Position,
    pub direction: Direction,
    pub status: AgentStatus,
    /// Present only while walking.
    pub target: Option<Position>,
}

impl AgentState {
    /// A stationary agent at `position`.
    pub fn at(position: Position, direction: Direction, status: AgentStatus) -> Self {
        Self {
            position,
            direction,
            status,
            target: None,
        }
    }

    /// `status == Walking` iff a target is set.
    pub fn is_consistent(&self) -> bool {
        (self.status == AgentStatus::Walking) == self.target.is_some()
    }
}

/// One character in the office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub state: AgentState,
}
