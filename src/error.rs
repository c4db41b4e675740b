use thiserror::Error;

/// Rejected engine configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("hexagon radius {hex_radius} does not fit a {window_size}px window")]
    ArenaTooLarge { hex_radius: f32, window_size: f32 },

    #[error("paddle inset leaves no room: apothem {apothem}, inset {inset}")]
    PaddleOutsideArena { apothem: f32, inset: f32 },

    #[error("station {station}: offset limits [{min}, {max}] must bracket 0")]
    InvalidOffsetLimits { station: usize, min: f32, max: f32 },

    #[error("speed multiplier max must be at least 1.0, got {0}")]
    MultiplierBelowOne(f32),

    #[error("speed increment must not be negative, got {0}")]
    NegativeIncrement(f32),

    #[error("flash duration must be a finite, non-negative millisecond count, got {0}")]
    InvalidFlashDuration(f32),

    #[error("station {station}: angle {angle} is not a finite number of degrees")]
    NonFiniteAngle { station: usize, angle: f32 },

    #[error("win score must be at least 1")]
    ZeroWinScore,

    #[error("stations {first} and {second} share goal wall {wall}")]
    SharedGoalWall {
        first: usize,
        second: usize,
        wall: usize,
    },

    #[error("cannot read {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid tuning JSON: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
