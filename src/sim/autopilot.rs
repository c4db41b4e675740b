//! Idle/demo mode: computer-driven paddles
//!
//! Each paddle chases the ball's projection onto its track. Used by the
//! headless runner and for attract screens.

use super::state::{GamePhase, MatchState};
use super::tick::TickInput;

/// Build this tick's input for all three paddles
pub fn autopilot_input(state: &MatchState) -> TickInput {
    let mut input = TickInput::default();

    match state.phase {
        GamePhase::Menu => {
            input.start = true;
            return input;
        }
        GamePhase::Paused | GamePhase::GameOver => return input,
        GamePhase::Playing => {}
    }

    // Dead zone of one step keeps paddles from jittering around the target
    let dead_zone = state.tuning.paddle_step;
    for paddle in &state.paddles {
        let target = paddle
            .offset_toward(state.ball.pos)
            .clamp(paddle.min_offset, paddle.max_offset);
        let held = &mut input.paddles[paddle.player.index()];
        if target > paddle.offset + dead_zone {
            held.down = true;
        } else if target < paddle.offset - dead_zone {
            held.up = true;
        }
    }

    input
}
