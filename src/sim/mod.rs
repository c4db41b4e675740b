//! Simulation engine
//!
//! All gameplay logic lives here. This module is pure and reproducible:
//! - Time advances only through the `dt` handed to `tick`
//! - Seeded RNG only
//! - Fixed iteration order (paddles P1..P3, walls 0..5)
//! - No rendering, audio or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use arena::{Arena, Segment, compute_edges, goal_wall_index};
pub use autopilot::autopilot_input;
pub use collision::{CollisionResult, ball_segment_collision, reflect_velocity};
pub use snapshot::{BallView, PaddleView, Snapshot, WallView};
pub use state::{Ball, GameEvent, GamePhase, MatchState, Paddle, Player, WallHit};
pub use tick::{Intent, PaddleInput, TickInput, tick};
