//! Match state and core simulation types
//!
//! The match owns the arena, the three paddles and the ball. Nothing here
//! holds a reference back to the match; all cross-entity work happens in
//! `MatchState` methods or in the tick.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Segment, goal_wall_index};
use super::collision::{ball_segment_collision, reflect_velocity};
use crate::consts::FLASH_BLINK_MS;
use crate::error::ConfigError;
use crate::tuning::{Station, Tuning};
use crate::{PLAYER_COUNT, frame_scale, polar_to_cartesian};

/// One of the three seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
    Three,
}

impl Player {
    /// Fixed iteration order; also the tie-break order
    pub const ALL: [Player; PLAYER_COUNT] = [Player::One, Player::Two, Player::Three];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
            Player::Three => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Player::One => "P1",
            Player::Two => "P2",
            Player::Three => "P3",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a start intent
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Someone reached the win score; waits for a restart
    GameOver,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    MatchStarted,
    Paused,
    Resumed,
    PaddleHit {
        player: Player,
    },
    WallBounce {
        wall: usize,
    },
    /// A goal wall was breached. `scorer` is whoever's score was adjusted
    /// (the defender on an own goal), `delta` the actual change applied.
    Scored {
        scorer: Option<Player>,
        conceded_by: Player,
        delta: i32,
    },
    GameOver {
        winner: Player,
    },
    QuitRequested,
}

/// Outcome of testing the ball against the hexagon walls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallHit {
    /// Plain wall nobody defends
    Bounce { wall: usize },
    /// A paddle's goal wall
    Goal { wall: usize },
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub player: Player,
    /// Station angle (radians)
    pub angle: f32,
    /// Position along the track in half-paddle-lengths
    pub offset: f32,
    pub min_offset: f32,
    pub max_offset: f32,
    pub color: [u8; 3],
    pub score: i32,
    center: Vec2,
    track_radius: f32,
    half_length: f32,
}

impl Paddle {
    pub fn new(player: Player, station: &Station, tuning: &Tuning) -> Self {
        Self {
            player,
            angle: station.angle_rad(),
            offset: 0.0,
            min_offset: station.min_offset,
            max_offset: station.max_offset,
            color: station.color,
            score: 0,
            center: tuning.center(),
            track_radius: tuning.paddle_track_radius(),
            half_length: tuning.paddle_half_length(),
        }
    }

    /// Unit direction along the track (positive offset direction)
    #[inline]
    pub fn tangent(&self) -> Vec2 {
        Vec2::from_angle(self.angle + std::f32::consts::FRAC_PI_2)
    }

    /// Track center, inset from the wall so the paddle never clips outside
    #[inline]
    pub fn base_point(&self) -> Vec2 {
        polar_to_cartesian(self.center, self.track_radius, self.angle)
    }

    /// Current paddle line segment
    pub fn endpoints(&self) -> Segment {
        let half = self.tangent() * self.half_length;
        let shift = half * self.offset;
        let base = self.base_point();
        Segment::new(base + half + shift, base - half + shift)
    }

    /// Slide along the track; `direction` is +1.0 or -1.0
    pub fn nudge(&mut self, direction: f32, step: f32) {
        self.offset = (self.offset + direction * step).clamp(self.min_offset, self.max_offset);
    }

    /// Offset that would center the paddle on `point`'s projection
    pub fn offset_toward(&self, point: Vec2) -> f32 {
        (point - self.base_point()).dot(self.tangent()) / self.half_length
    }

    /// Edge this paddle defends
    pub fn goal_wall(&self) -> usize {
        goal_wall_index(self.angle)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per reference tick
    pub vel: Vec2,
    pub radius: f32,
    pub speed_multiplier: f32,
    /// Post-reset grace period: blinking and frozen in place
    pub flashing: bool,
    /// Milliseconds of simulated time since the last reset
    pub flash_elapsed_ms: f32,
    home: Vec2,
    base_speed: f32,
    multiplier_max: f32,
    speed_increment: f32,
    flash_duration_ms: f32,
}

impl Ball {
    /// A ball parked at the arena center, flashing, not yet launched
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.center(),
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
            speed_multiplier: 1.0,
            flashing: true,
            flash_elapsed_ms: 0.0,
            home: tuning.center(),
            base_speed: tuning.ball_speed,
            multiplier_max: tuning.speed_multiplier_max,
            speed_increment: tuning.speed_increment,
            flash_duration_ms: tuning.flash_duration_ms,
        }
    }

    /// Back to center with a random heading and a fresh grace period
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.pos = self.home;
        self.speed_multiplier = 1.0;
        self.set_heading(rng.random_range(0.0..std::f32::consts::TAU));
        self.flashing = true;
        self.flash_elapsed_ms = 0.0;
    }

    /// Point the ball at `angle` with the speed its multiplier implies
    pub fn set_heading(&mut self, angle: f32) {
        self.vel = Vec2::from_angle(angle) * self.target_speed();
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    #[inline]
    pub fn target_speed(&self) -> f32 {
        self.base_speed * self.speed_multiplier
    }

    /// Advance by `dt` seconds
    ///
    /// While flashing only the grace timer runs; the tick in which it
    /// expires still holds the ball in place.
    pub fn advance(&mut self, dt: f32) {
        if self.flashing {
            self.flash_elapsed_ms += dt * 1000.0;
            if self.flash_elapsed_ms > self.flash_duration_ms {
                self.flashing = false;
            }
            return;
        }
        self.pos += self.vel * frame_scale(dt);
    }

    /// Blink state for the renderer
    pub fn is_visible(&self) -> bool {
        !self.flashing || (self.flash_elapsed_ms / FLASH_BLINK_MS).floor() as i64 % 2 == 0
    }

    /// Bounce off `segment` if touching it; returns whether it hit
    pub fn collide_segment(&mut self, segment: &Segment) -> bool {
        let contact = ball_segment_collision(self.pos, self.radius, segment);
        if !contact.hit {
            return false;
        }

        self.vel = reflect_velocity(self.vel, contact.normal);
        // Clear of the segment so the next tick does not hit it again
        self.pos = contact.point + contact.normal * (self.radius + 1.0);
        self.increase_speed();
        true
    }

    /// Ramp the multiplier and rebuild velocity along the current heading
    pub fn increase_speed(&mut self) {
        self.speed_multiplier =
            (self.speed_multiplier + self.speed_increment).min(self.multiplier_max);
        let heading = self.vel.y.atan2(self.vel.x);
        self.set_heading(heading);
    }

    pub fn check_paddle_collision(&mut self, paddle: &Paddle) -> bool {
        self.collide_segment(&paddle.endpoints())
    }

    /// Test walls in index order; the lowest-index hit wins
    pub fn check_wall_collisions(&mut self, arena: &Arena, paddles: &[Paddle]) -> Option<WallHit> {
        for (wall, edge) in arena.edges().iter().enumerate() {
            if self.collide_segment(edge) {
                let owned = paddles.iter().any(|p| p.goal_wall() == wall);
                return Some(if owned {
                    WallHit::Goal { wall }
                } else {
                    WallHit::Bounce { wall }
                });
            }
        }
        None
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub tuning: Tuning,
    pub arena: Arena,
    /// Fixed order P1, P2, P3
    pub paddles: [Paddle; PLAYER_COUNT],
    pub ball: Ball,
    pub last_touched: Option<Player>,
    pub phase: GamePhase,
    pub winner: Option<Player>,
    /// Simulation ticks spent in Playing
    pub time_ticks: u64,
    pub seed: u64,
    quit_requested: bool,
    rng: Pcg32,
}

impl MatchState {
    /// Validate `tuning` and build a match waiting in the menu
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let arena = Arena::from_tuning(&tuning);
        let paddles = Player::ALL.map(|p| Paddle::new(p, &tuning.stations[p.index()], &tuning));
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ball = Ball::new(&tuning);
        ball.reset(&mut rng);

        Ok(Self {
            tuning,
            arena,
            paddles,
            ball,
            last_touched: None,
            phase: GamePhase::Menu,
            winner: None,
            time_ticks: 0,
            seed,
            quit_requested: false,
            rng,
        })
    }

    #[inline]
    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    #[inline]
    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        &mut self.paddles[player.index()]
    }

    pub fn scores(&self) -> [i32; PLAYER_COUNT] {
        self.paddles.each_ref().map(|p| p.score)
    }

    /// Zero the scores, recenter the paddles and serve a fresh ball
    pub fn start_match(&mut self) {
        for paddle in &mut self.paddles {
            paddle.score = 0;
            paddle.offset = 0.0;
        }
        self.last_touched = None;
        self.winner = None;
        self.reset_ball();
        self.phase = GamePhase::Playing;
        log::info!("Match started (seed {})", self.seed);
    }

    pub fn reset_ball(&mut self) {
        self.ball.reset(&mut self.rng);
    }

    /// Paddle whose station point is nearest the ball; first in order wins ties
    pub fn losing_paddle(&self) -> Player {
        let mut losing = Player::One;
        let mut min_dist = f32::INFINITY;
        for paddle in &self.paddles {
            let dist = self.ball.pos.distance(self.arena.station_point(paddle.angle));
            if dist < min_dist {
                min_dist = dist;
                losing = paddle.player;
            }
        }
        losing
    }

    /// Settle a goal-wall breach: adjust scores, clear the toucher, re-serve
    pub fn resolve_goal(&mut self) -> GameEvent {
        let losing = self.losing_paddle();
        let floor = self.tuning.score_floor;

        let (scorer, delta) = match self.last_touched {
            Some(toucher) if toucher == losing => {
                let paddle = self.paddle_mut(toucher);
                let before = paddle.score;
                paddle.score = floor.apply(before - 1);
                (Some(toucher), paddle.score - before)
            }
            Some(toucher) => {
                self.paddle_mut(toucher).score += 1;
                (Some(toucher), 1)
            }
            None => (None, 0),
        };

        log::debug!(
            "Goal against {}: scorer {:?}, delta {}, scores {:?}",
            losing.label(),
            scorer.map(Player::label),
            delta,
            self.scores()
        );

        self.last_touched = None;
        self.reset_ball();

        GameEvent::Scored {
            scorer,
            conceded_by: losing,
            delta,
        }
    }

    /// First paddle in fixed order at or above the win score
    pub fn check_winner(&self) -> Option<Player> {
        let target = i64::from(self.tuning.win_score);
        self.paddles
            .iter()
            .find(|p| i64::from(p.score) >= target)
            .map(|p| p.player)
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Whether the host loop should stop
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
