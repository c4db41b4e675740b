//! Read-only view of a match for renderers and audio
//!
//! Presentation layers pull one of these per frame instead of reaching into
//! the engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arena::Segment;
use super::state::{GamePhase, MatchState, Player};
use crate::PLAYER_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaddleView {
    pub player: Player,
    pub offset: f32,
    pub score: i32,
    pub segment: Segment,
    pub color: [u8; 3],
    /// Where a score label sits, just outside the station
    pub label_pos: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
    pub flashing: bool,
    pub visible: bool,
    pub speed_multiplier: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallView {
    pub index: usize,
    pub segment: Segment,
    /// Defending player, or `None` for a plain bounce wall
    pub owner: Option<Player>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub winner: Option<Player>,
    pub last_touched: Option<Player>,
    pub paddles: [PaddleView; PLAYER_COUNT],
    pub ball: BallView,
    pub walls: Vec<WallView>,
}

/// Distance beyond the hexagon vertex radius for score labels
const LABEL_MARGIN: f32 = 30.0;

impl MatchState {
    pub fn snapshot(&self) -> Snapshot {
        let paddles = self.paddles.each_ref().map(|p| PaddleView {
            player: p.player,
            offset: p.offset,
            score: p.score,
            segment: p.endpoints(),
            color: p.color,
            label_pos: crate::polar_to_cartesian(
                self.arena.center(),
                self.arena.hex_radius() + LABEL_MARGIN,
                p.angle,
            ),
        });

        let walls = self
            .arena
            .edges()
            .iter()
            .enumerate()
            .map(|(index, segment)| WallView {
                index,
                segment: *segment,
                owner: self
                    .paddles
                    .iter()
                    .find(|p| p.goal_wall() == index)
                    .map(|p| p.player),
            })
            .collect();

        Snapshot {
            phase: self.phase,
            winner: self.winner,
            last_touched: self.last_touched,
            paddles,
            ball: BallView {
                pos: self.ball.pos,
                radius: self.ball.radius,
                flashing: self.ball.flashing,
                visible: self.ball.is_visible(),
                speed_multiplier: self.ball.speed_multiplier,
            },
            walls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_snapshot_wall_owners() {
        let state = MatchState::new(Tuning::default(), 1).unwrap();
        let snap = state.snapshot();
        let owners: Vec<_> = snap.walls.iter().map(|w| w.owner).collect();
        assert_eq!(
            owners,
            vec![
                Some(Player::Two),
                None,
                Some(Player::Three),
                None,
                Some(Player::One),
                None
            ]
        );
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = MatchState::new(Tuning::default(), 1).unwrap();
        state.paddle_mut(Player::Two).score = 4;
        state.paddle_mut(Player::Two).offset = -0.5;
        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Menu);
        assert_eq!(snap.paddles[1].score, 4);
        assert_eq!(snap.paddles[1].offset, -0.5);
        assert_eq!(snap.paddles[1].segment, state.paddles[1].endpoints());
        assert_eq!(snap.ball.pos, state.arena.center());
        assert!(snap.ball.flashing);
        assert!(snap.ball.visible);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = MatchState::new(Tuning::default(), 1).unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Menu\""));
    }
}
