//! Data-driven game constants
//!
//! Every number the engine uses lives in [`Tuning`]. Defaults reproduce the
//! classic three-player hexagon layout; a JSON file can override any subset.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_MARGIN;
use crate::error::ConfigError;
use crate::sim::arena::goal_wall_index;
use crate::PLAYER_COUNT;

/// What happens when an own goal would push a score below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ScoreFloor {
    /// Scores may go negative
    #[default]
    Unbounded,
    /// Scores never drop below 0
    Zero,
}

impl ScoreFloor {
    /// Apply the policy to a score after a penalty
    pub fn apply(&self, score: i32) -> i32 {
        match self {
            ScoreFloor::Unbounded => score,
            ScoreFloor::Zero => score.max(0),
        }
    }
}

/// A paddle's fixed place on the hexagon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Angle of the paddle's track center, degrees from the arena center
    pub angle_deg: f32,
    /// Lowest offset (half-paddle-lengths along the tangent)
    pub min_offset: f32,
    /// Highest offset
    pub max_offset: f32,
    /// RGB color for the renderer
    pub color: [u8; 3],
}

impl Station {
    pub fn angle_rad(&self) -> f32 {
        self.angle_deg.to_radians()
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Square window edge length; the arena is centered in it
    pub window_size: f32,
    /// Center-to-vertex hexagon radius
    pub hex_radius: f32,
    pub paddle_length: f32,
    pub paddle_width: f32,
    pub ball_radius: f32,
    /// Base ball speed (pixels per reference tick)
    pub ball_speed: f32,
    /// Offset change per reference tick while a move intent is held
    pub paddle_step: f32,
    /// Paddle stations in fixed player order (P1, P2, P3)
    pub stations: [Station; PLAYER_COUNT],
    pub win_score: u32,
    pub speed_multiplier_max: f32,
    pub speed_increment: f32,
    /// Post-reset grace period during which the ball blinks and holds still
    pub flash_duration_ms: f32,
    pub score_floor: ScoreFloor,
    /// Accept paddle movement in Menu and GameOver
    pub move_paddles_outside_play: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_size: 800.0,
            hex_radius: 266.0,
            paddle_length: 100.0,
            paddle_width: 10.0,
            ball_radius: 10.0,
            ball_speed: 5.0,
            paddle_step: 0.08,

            // Offset limits are hand-tuned per station, not symmetric
            stations: [
                Station {
                    angle_deg: 270.0,
                    min_offset: -1.6,
                    max_offset: 1.6,
                    color: [255, 0, 0],
                },
                Station {
                    angle_deg: 30.0,
                    min_offset: -1.5,
                    max_offset: 1.65,
                    color: [0, 255, 0],
                },
                Station {
                    angle_deg: 150.0,
                    min_offset: -1.65,
                    max_offset: 1.5,
                    color: [0, 0, 255],
                },
            ],

            win_score: 10,
            speed_multiplier_max: 1.8,
            speed_increment: 0.06,
            flash_duration_ms: 500.0,
            score_floor: ScoreFloor::Unbounded,
            move_paddles_outside_play: true,
        }
    }
}

impl Tuning {
    /// Arena center in window coordinates
    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.window_size / 2.0)
    }

    pub fn paddle_half_length(&self) -> f32 {
        self.paddle_length / 2.0
    }

    /// Radius of the circle the paddle tracks are tangent to
    pub fn paddle_track_radius(&self) -> f32 {
        self.apothem() - self.paddle_inset()
    }

    /// Center-to-edge-midpoint distance
    pub fn apothem(&self) -> f32 {
        self.hex_radius * std::f32::consts::FRAC_PI_6.cos()
    }

    fn paddle_inset(&self) -> f32 {
        self.paddle_width / 2.0 + PADDLE_MARGIN
    }

    /// Reject configurations the engine cannot simulate
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("window_size", self.window_size),
            ("hex_radius", self.hex_radius),
            ("paddle_length", self.paddle_length),
            ("paddle_width", self.paddle_width),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
            ("paddle_step", self.paddle_step),
        ];
        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.hex_radius * 2.0 > self.window_size {
            return Err(ConfigError::ArenaTooLarge {
                hex_radius: self.hex_radius,
                window_size: self.window_size,
            });
        }

        if self.paddle_track_radius() <= 0.0 {
            return Err(ConfigError::PaddleOutsideArena {
                apothem: self.apothem(),
                inset: self.paddle_inset(),
            });
        }

        for (i, station) in self.stations.iter().enumerate() {
            if !station.angle_deg.is_finite() {
                return Err(ConfigError::NonFiniteAngle {
                    station: i,
                    angle: station.angle_deg,
                });
            }
            if !(station.min_offset <= 0.0 && station.max_offset >= 0.0) {
                return Err(ConfigError::InvalidOffsetLimits {
                    station: i,
                    min: station.min_offset,
                    max: station.max_offset,
                });
            }
        }

        if !(self.speed_multiplier_max >= 1.0) {
            return Err(ConfigError::MultiplierBelowOne(self.speed_multiplier_max));
        }
        if !(self.speed_increment >= 0.0) {
            return Err(ConfigError::NegativeIncrement(self.speed_increment));
        }
        if !(self.flash_duration_ms >= 0.0 && self.flash_duration_ms.is_finite()) {
            return Err(ConfigError::InvalidFlashDuration(self.flash_duration_ms));
        }
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }

        for first in 0..PLAYER_COUNT {
            let wall = goal_wall_index(self.stations[first].angle_rad());
            for second in first + 1..PLAYER_COUNT {
                if goal_wall_index(self.stations[second].angle_rad()) == wall {
                    return Err(ConfigError::SharedGoalWall {
                        first,
                        second,
                        wall,
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse and validate tuning from JSON; omitted fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let tuning = Tuning {
            hex_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonPositive {
                field: "hex_radius",
                ..
            })
        ));

        let tuning = Tuning {
            ball_speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::NonPositive {
                field: "ball_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_arena_larger_than_window() {
        let tuning = Tuning {
            hex_radius: 500.0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::ArenaTooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_offset_limits() {
        let mut tuning = Tuning::default();
        tuning.stations[1].min_offset = 0.5;
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::InvalidOffsetLimits {
                station: 1,
                min: 0.5,
                max: 1.65
            })
        );
    }

    #[test]
    fn test_rejects_shared_goal_wall() {
        let mut tuning = Tuning::default();
        // 40° falls in the same 60° sector as the 30° station
        tuning.stations[2].angle_deg = 40.0;
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::SharedGoalWall {
                first: 1,
                second: 2,
                wall: 0
            })
        );
    }

    #[test]
    fn test_rejects_bad_speed_ramp() {
        let tuning = Tuning {
            speed_multiplier_max: 0.9,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(ConfigError::MultiplierBelowOne(0.9)));

        let tuning = Tuning {
            speed_increment: -0.1,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(ConfigError::NegativeIncrement(-0.1)));

        let tuning = Tuning {
            win_score: 0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(ConfigError::ZeroWinScore));
    }

    #[test]
    fn test_rejects_bad_flash_duration() {
        let tuning = Tuning {
            flash_duration_ms: -1.0,
            ..Default::default()
        };
        assert_eq!(tuning.validate(), Err(ConfigError::InvalidFlashDuration(-1.0)));

        for bad in [f32::NAN, f32::INFINITY] {
            let tuning = Tuning {
                flash_duration_ms: bad,
                ..Default::default()
            };
            assert!(matches!(tuning.validate(), Err(ConfigError::InvalidFlashDuration(_))));
        }

        // Zero disables the grace period
        let tuning = Tuning {
            flash_duration_ms: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_finite_station_angle() {
        let mut tuning = Tuning::default();
        tuning.stations[2].angle_deg = f32::INFINITY;
        assert_eq!(
            tuning.validate(),
            Err(ConfigError::NonFiniteAngle {
                station: 2,
                angle: f32::INFINITY
            })
        );

        tuning.stations[2].angle_deg = f32::NAN;
        assert!(matches!(tuning.validate(), Err(ConfigError::NonFiniteAngle { station: 2, .. })));
    }

    #[test]
    fn test_from_json_partial_override() {
        let tuning = Tuning::from_json(r#"{ "win_score": 3, "score_floor": "Zero" }"#).unwrap();
        assert_eq!(tuning.win_score, 3);
        assert_eq!(tuning.score_floor, ScoreFloor::Zero);
        assert_eq!(tuning.hex_radius, 266.0);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "paddle_length": -1.0 }"#),
            Err(ConfigError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_stations() {
        let json = Tuning::default().to_json().unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back.stations, Tuning::default().stations);
    }

    #[test]
    fn test_score_floor_policy() {
        assert_eq!(ScoreFloor::Unbounded.apply(-1), -1);
        assert_eq!(ScoreFloor::Zero.apply(-1), 0);
        assert_eq!(ScoreFloor::Zero.apply(4), 4);
    }
}
