//! Fixed timestep simulation tick
//!
//! Core game loop step: apply intents, move the ball, resolve collisions
//! (paddles before walls), settle scoring, report events.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GamePhase, MatchState, Player, WallHit};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::{PLAYER_COUNT, frame_scale};

/// A single discrete request from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Slide toward negative offset
    MoveUp(Player),
    /// Slide toward positive offset
    MoveDown(Player),
    Pause,
    Start,
    Quit,
}

/// Held movement keys for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Indexed by `Player::index`
    pub paddles: [PaddleInput; PLAYER_COUNT],
    /// Pause toggle
    pub pause: bool,
    /// Start, restart, or resume
    pub start: bool,
    pub quit: bool,
}

impl TickInput {
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::MoveUp(p) => self.paddles[p.index()].up = true,
            Intent::MoveDown(p) => self.paddles[p.index()].down = true,
            Intent::Pause => self.pause = true,
            Intent::Start => self.start = true,
            Intent::Quit => self.quit = true,
        }
    }
}

impl FromIterator<Intent> for TickInput {
    fn from_iter<I: IntoIterator<Item = Intent>>(iter: I) -> Self {
        let mut input = TickInput::default();
        for intent in iter {
            input.apply(intent);
        }
        input
    }
}

/// Advance the match by `dt` seconds and return what happened
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.quit {
        if !state.quit_requested() {
            log::info!("Quit requested");
            state.request_quit();
            events.push(GameEvent::QuitRequested);
        }
        return events;
    }

    // Phase transitions
    match state.phase {
        GamePhase::Menu | GamePhase::GameOver if input.start => {
            state.start_match();
            events.push(GameEvent::MatchStarted);
        }
        GamePhase::Playing if input.pause => {
            state.phase = GamePhase::Paused;
            log::info!("Paused");
            events.push(GameEvent::Paused);
            return events;
        }
        GamePhase::Paused if input.pause || input.start => {
            state.phase = GamePhase::Playing;
            log::info!("Resumed");
            events.push(GameEvent::Resumed);
        }
        _ => {}
    }

    let paddles_live = match state.phase {
        GamePhase::Playing => true,
        GamePhase::Menu | GamePhase::GameOver => state.tuning.move_paddles_outside_play,
        GamePhase::Paused => false,
    };
    if paddles_live {
        let step = state.tuning.paddle_step * frame_scale(dt);
        for (paddle, held) in state.paddles.iter_mut().zip(input.paddles) {
            if held.down {
                paddle.nudge(1.0, step);
            }
            if held.up {
                paddle.nudge(-1.0, step);
            }
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    // Long frames are split so the ball never travels more than one
    // reference tick per collision pass; time past MAX_SUBSTEPS is dropped.
    let (steps, step_dt) = substeps(dt);
    for _ in 0..steps {
        step_ball(state, step_dt, &mut events);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    events
}

/// Number and length of the physics substeps covering `dt`
fn substeps(dt: f32) -> (u32, f32) {
    let dt = dt.max(0.0);
    // The epsilon keeps a frame of exactly SIM_DT from rounding up to two steps
    let steps = ((dt / SIM_DT - 1e-4).ceil().max(1.0) as u32).min(MAX_SUBSTEPS);
    (steps, (dt / steps as f32).min(SIM_DT))
}

/// Move the ball once and resolve paddles, walls, scoring and the winner
fn step_ball(state: &mut MatchState, dt: f32, events: &mut Vec<GameEvent>) {
    state.ball.advance(dt);

    // Every paddle is tested, even after a hit
    for paddle in &state.paddles {
        if state.ball.check_paddle_collision(paddle) {
            state.last_touched = Some(paddle.player);
            events.push(GameEvent::PaddleHit {
                player: paddle.player,
            });
        }
    }

    match state.ball.check_wall_collisions(&state.arena, &state.paddles) {
        Some(WallHit::Bounce { wall }) => events.push(GameEvent::WallBounce { wall }),
        Some(WallHit::Goal { .. }) => events.push(state.resolve_goal()),
        None => {}
    }

    if let Some(winner) = state.check_winner() {
        state.phase = GamePhase::GameOver;
        state.winner = Some(winner);
        log::info!("{} wins with scores {:?}", winner.label(), state.scores());
        events.push(GameEvent::GameOver { winner });
    }
}
