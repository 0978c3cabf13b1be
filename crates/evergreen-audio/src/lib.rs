//! Evergreen Audio - Synthesized sound effects and background music
//!
//! - `sfx` — oscillator voices and offline rendering of each effect
//! - `AudioEngine` — output sink, mute, looping music, buffer cache; runs silent without a device
//! - `AudioTrigger` — maps `CardEvent`s to audio commands
//! - `AudioSystem` — engine + trigger, fed the drained event queue each frame
//!
//! Build with the `kira` feature to play through a real output device.

pub mod engine;
pub mod sfx;
pub mod trigger;

pub use engine::{
    AudioEngine, MusicTrack, NullSink, SinkOpener, SoundSink, DEFAULT_MUSIC_VOLUME,
    DEFAULT_SAMPLE_RATE,
};
pub use sfx::{synthesize, SoundEffect};
pub use trigger::{AudioCommand, AudioTrigger};

use evergreen_runtime::CardEvent;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[audio]` configuration table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Start muted
    pub muted: bool,
    pub sample_rate: u32,
    /// Looping background track; none plays when unset
    pub music_path: Option<PathBuf>,
    pub music_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            muted: false,
            sample_rate: DEFAULT_SAMPLE_RATE,
            music_path: None,
            music_volume: DEFAULT_MUSIC_VOLUME,
        }
    }
}

impl AudioConfig {
    pub fn music_track(&self) -> Option<MusicTrack> {
        self.music_path
            .as_ref()
            .map(|path| MusicTrack::looping(path.clone(), self.music_volume))
    }
}

/// Top-level audio system integrating engine and triggers
pub struct AudioSystem {
    pub engine: AudioEngine,
    pub trigger: AudioTrigger,
}

impl Default for AudioSystem {
    fn default() -> Self {
        Self::new(AudioEngine::new())
    }
}

impl AudioSystem {
    pub fn new(engine: AudioEngine) -> Self {
        Self {
            engine,
            trigger: AudioTrigger::new(),
        }
    }

    /// Build on the default backend and apply `config`
    pub fn from_config(config: &AudioConfig) -> Self {
        let mut engine = AudioEngine::with_sample_rate(config.sample_rate);
        if let Some(track) = config.music_track() {
            engine = engine.with_music(track);
        }
        engine.set_muted(config.muted);
        Self::new(engine)
    }

    /// Forward a user gesture so a suspended output and the music can start
    pub fn unlock(&mut self) -> bool {
        self.engine.unlock()
    }

    /// Run the commands for a batch of events. Returns how many effects played.
    pub fn process_events(&mut self, events: &[CardEvent]) -> usize {
        let mut played = 0;
        for command in self.trigger.process(events) {
            match command {
                AudioCommand::Play(effect) => {
                    if self.engine.play(effect) {
                        played += 1;
                    }
                }
                AudioCommand::SetMuted(muted) => self.engine.set_muted(muted),
            }
        }
        played
    }
}
