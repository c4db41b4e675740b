//! Hex Pong - three-player Pong in a hexagonal arena
//!
//! Core modules:
//! - `sim`: Simulation engine (geometry, collisions, match state machine)
//! - `tuning`: Data-driven game constants and validation
//! - `audio`: Event-to-sound-cue routing for a pluggable audio backend

pub mod audio;
pub mod error;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{ScoreFloor, Station, Tuning};

use glam::Vec2;

/// Engine timing constants
pub mod consts {
    /// Reference tick rate that velocities and paddle steps are expressed in
    pub const REFERENCE_HZ: f32 = 60.0;
    /// Fixed simulation timestep for the host loop
    pub const SIM_DT: f32 = 1.0 / REFERENCE_HZ;
    /// Maximum substeps per tick to bound the work a long frame can cause
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Ball blink period while flashing (ms per visible/hidden half-cycle)
    pub const FLASH_BLINK_MS: f32 = 100.0;
    /// Extra inward margin between a paddle and its wall
    pub const PADDLE_MARGIN: f32 = 5.0;
}

/// Number of players (and paddles) in a match
pub const PLAYER_COUNT: usize = 3;

/// Number of hexagon edges
pub const EDGE_COUNT: usize = 6;

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Scale factor converting elapsed seconds into reference ticks
#[inline]
pub fn frame_scale(dt: f32) -> f32 {
    dt * consts::REFERENCE_HZ
}
