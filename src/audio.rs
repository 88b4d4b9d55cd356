//! Sound cue dispatch
//!
//! The simulation only names sounds. This module turns those names into
//! cues and hands them to whatever backend is available. A missing backend,
//! a muted mixer or a failing device all end the same way: the cue is
//! dropped and the game carries on.

use std::io::Write;

use crate::sim::SoundEvent;

/// A playable cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    /// Asset-style name ("climb", "hit", ...)
    pub name: &'static str,
    /// Placeholder tone frequency (Hz)
    pub frequency: f32,
    /// Placeholder tone length (ms)
    pub duration_ms: u32,
}

impl Cue {
    pub fn for_event(event: SoundEvent) -> Self {
        match event {
            SoundEvent::Climb => Cue::new("climb", 440.0, 100),
            SoundEvent::SlipStart => Cue::new("slip", 220.0, 200),
            SoundEvent::Balance => Cue::new("balance", 220.0, 200),
            SoundEvent::Fall => Cue::new("fall", 165.0, 250),
            SoundEvent::Hit => Cue::new("hit", 110.0, 300),
            SoundEvent::Win => Cue::new("win", 660.0, 400),
        }
    }

    const fn new(name: &'static str, frequency: f32, duration_ms: u32) -> Self {
        Self {
            name,
            frequency,
            duration_ms,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Unavailable(String),
    #[error("audio output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can actually make a noise
pub trait SoundBackend {
    fn play(&mut self, cue: &Cue, volume: f32) -> Result<(), AudioError>;
}

/// Rings the terminal bell for the cues worth interrupting the player for
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn rings_for(cue: &Cue) -> bool {
        matches!(cue.name, "hit" | "fall" | "win")
    }
}

impl<W: Write> SoundBackend for TerminalBell<W> {
    fn play(&mut self, cue: &Cue, _volume: f32) -> Result<(), AudioError> {
        if Self::rings_for(cue) {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn SoundBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    dropped: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn SoundBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend - sound cues will be dropped");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            dropped: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues that never reached a backend
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Play a sound event; never fails
    pub fn play(&mut self, event: SoundEvent) {
        let cue = Cue::for_event(event);
        let vol = self.effective_volume();
        let Some(backend) = self.backend.as_mut() else {
            self.dropped += 1;
            return;
        };
        if vol <= 0.0 {
            self.dropped += 1;
            return;
        }

        log::debug!("play {} ({} Hz, {} ms)", cue.name, cue.frequency, cue.duration_ms);
        if let Err(err) = backend.play(&cue, vol) {
            self.dropped += 1;
            log::warn!("Dropped '{}' cue: {}", cue.name, err);
        }
    }

    pub fn play_all(&mut self, events: &[SoundEvent]) {
        for &event in events {
            self.play(event);
        }
    }
}
