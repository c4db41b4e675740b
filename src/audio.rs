//! Sound cue routing
//!
//! The engine never plays audio. This module turns tick events into cues and
//! hands them to whatever backend the host plugs in.

use crate::sim::{GameEvent, Player};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a paddle; each player has their own tone
    PaddleHit(Player),
    /// Ball hits a plain wall
    WallHit,
    /// A goal wall was breached
    Score,
    /// Someone won the match
    Victory,
}

impl SoundEffect {
    /// Asset file name for sample-based backends
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::PaddleHit(Player::One) => "p1.wav",
            SoundEffect::PaddleHit(Player::Two) => "p2.wav",
            SoundEffect::PaddleHit(Player::Three) => "p3.wav",
            SoundEffect::WallHit => "wall.wav",
            SoundEffect::Score => "score.wav",
            SoundEffect::Victory => "win.wav",
        }
    }

    /// Cue for an engine event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PaddleHit { player } => Some(SoundEffect::PaddleHit(*player)),
            GameEvent::WallBounce { .. } => Some(SoundEffect::WallHit),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::GameOver { .. } => Some(SoundEffect::Victory),
            _ => None,
        }
    }
}

/// A backend that can actually make noise
pub trait AudioSink {
    /// Play `effect` at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Silent backend for headless runs or when no mixer is available
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager<NullSink> {
    fn default() -> Self {
        Self::new(NullSink)
    }
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set sound effects volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective output volume
    pub fn volume(&self) -> f32 {
        if self.is_muted() {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.is_muted() {
            return;
        }
        let volume = self.volume();
        self.sink.play(effect, volume);
    }

    /// Play the cue for every event that has one; returns how many played
    pub fn handle_events(&mut self, events: &[GameEvent]) -> usize {
        if self.is_muted() {
            return 0;
        }
        let mut played = 0;
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
            played += 1;
        }
        played
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
