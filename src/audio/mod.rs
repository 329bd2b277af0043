//! Audio cues
//!
//! The game only signals *that* something happened; how it sounds is up to
//! the sink. Sound failures never reach the game logic.

use std::io::Write;

use tracing::warn;

use crate::game::GameEvent;

/// Sounds the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Eat,
    PowerUp,
    RivalCrash,
    GameOver,
}

impl AudioCue {
    /// Cue for an engine event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerAteFood => Some(AudioCue::Eat),
            GameEvent::PlayerPowerUp => Some(AudioCue::PowerUp),
            GameEvent::RivalCrashed { .. } => Some(AudioCue::RivalCrash),
            GameEvent::GameOver { .. } => Some(AudioCue::GameOver),
            _ => None,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Rings the terminal bell for the cues that matter to the player
///
/// The first write error disables it for the rest of the run.
pub struct TerminalBell<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, enabled: true }
    }

    fn ring(&mut self) -> std::io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) {
        if !self.enabled || cue == AudioCue::RivalCrash {
            return;
        }

        if let Err(err) = self.ring() {
            warn!(?cue, "terminal bell failed, muting: {err}");
            self.enabled = false;
        }
    }
}
