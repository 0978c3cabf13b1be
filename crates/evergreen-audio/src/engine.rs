//! Audio engine: sink management, mute, background music and buffer caching
//!
//! The engine never fails a caller. If no output can be opened it runs
//! silent, and it retries opening on every [`AudioEngine::unlock`], which
//! hosts call on each user gesture. The same call (re)starts the background
//! track until it is playing.

use crate::sfx::{synthesize, SoundEffect};
use evergreen_core::Result;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_MUSIC_VOLUME: f32 = 0.25;

/// A background track streamed from disk
#[derive(Debug, Clone, PartialEq)]
pub struct MusicTrack {
    pub path: PathBuf,
    /// Linear amplitude, 0.0–1.0
    pub volume: f32,
    pub looping: bool,
}

impl MusicTrack {
    pub fn looping(path: impl Into<PathBuf>, volume: f32) -> Self {
        Self {
            path: path.into(),
            volume,
            looping: true,
        }
    }
}

/// Something that can play a mono buffer
pub trait SoundSink {
    fn play(&mut self, samples: Arc<[f32]>, sample_rate: u32) -> Result<()>;

    /// Start streaming a background track. Sinks that cannot stream ignore it.
    fn start_music(&mut self, _track: &MusicTrack) -> Result<()> {
        Ok(())
    }

    /// Pause or resume the track started by [`SoundSink::start_music`]
    fn set_music_paused(&mut self, _paused: bool) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Opens a sink; called once at construction and again on unlock until it
/// succeeds.
pub type SinkOpener = Box<dyn FnMut() -> Result<Box<dyn SoundSink>>>;

/// Discards everything; counts what it was asked to play
#[derive(Debug, Default)]
pub struct NullSink {
    played: usize,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> usize {
        self.played
    }
}

impl SoundSink for NullSink {
    fn play(&mut self, _samples: Arc<[f32]>, _sample_rate: u32) -> Result<()> {
        self.played += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MusicState {
    Stopped,
    Playing,
    Paused,
}

pub struct AudioEngine {
    sink: Option<Box<dyn SoundSink>>,
    opener: SinkOpener,
    muted: bool,
    sample_rate: u32,
    cache: HashMap<SoundEffect, Arc<[f32]>>,
    music: Option<MusicTrack>,
    music_state: MusicState,
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine {
    /// Engine on the default backend: Kira when built with the `kira`
    /// feature, otherwise a [`NullSink`].
    pub fn new() -> Self {
        Self::with_sample_rate(DEFAULT_SAMPLE_RATE)
    }

    /// Default backend rendering effects at `sample_rate`
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self::with_opener(default_opener(), sample_rate)
    }

    /// Engine that never produces sound
    pub fn silent() -> Self {
        Self::with_opener(
            Box::new(|| Ok(Box::new(NullSink::new()) as Box<dyn SoundSink>)),
            DEFAULT_SAMPLE_RATE,
        )
    }

    pub fn with_opener(mut opener: SinkOpener, sample_rate: u32) -> Self {
        let sink = match opener() {
            Ok(sink) => {
                info!("[audio] output ready ({})", sink.name());
                Some(sink)
            }
            Err(e) => {
                warn!("[audio] no output available ({e}), running silent");
                None
            }
        };
        Self {
            sink,
            opener,
            muted: false,
            sample_rate,
            cache: HashMap::new(),
            music: None,
            music_state: MusicState::Stopped,
        }
    }

    /// Background track to start on the first unmuted [`AudioEngine::unlock`]
    pub fn with_music(mut self, track: MusicTrack) -> Self {
        self.music = Some(track);
        self
    }

    pub fn music(&self) -> Option<&MusicTrack> {
        self.music.as_ref()
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_state == MusicState::Playing
    }

    /// Whether an output is open
    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    /// Retry opening the output if it is missing, then start the background
    /// track unless muted. Returns whether an output is available afterwards.
    pub fn unlock(&mut self) -> bool {
        if self.sink.is_none() {
            match (self.opener)() {
                Ok(sink) => {
                    info!("[audio] output unlocked ({})", sink.name());
                    self.sink = Some(sink);
                }
                Err(e) => {
                    debug!("[audio] unlock failed: {e}");
                    return false;
                }
            }
        }
        if !self.muted {
            self.resume_music();
        }
        true
    }

    /// Mute pauses the background track; unmute unlocks and resumes it.
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        debug!("[audio] muted = {muted}");
        self.muted = muted;
        if muted {
            self.pause_music();
        } else {
            self.unlock();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Play an effect. Returns true if it reached the output.
    ///
    /// Muted or silent engines skip the effect; sink errors are logged and
    /// swallowed.
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        if self.muted {
            return false;
        }
        let Some(sink) = self.sink.as_mut() else {
            return false;
        };

        let sample_rate = self.sample_rate;
        let samples = self
            .cache
            .entry(effect)
            .or_insert_with(|| synthesize(effect, sample_rate).into())
            .clone();

        match sink.play(samples, sample_rate) {
            Ok(()) => true,
            Err(e) => {
                warn!("[audio] failed to play '{}': {e}", effect.name());
                false
            }
        }
    }

    /// Whether the effect's buffer has been rendered already
    pub fn is_cached(&self, effect: SoundEffect) -> bool {
        self.cache.contains_key(&effect)
    }

    fn resume_music(&mut self) {
        let (Some(sink), Some(track)) = (self.sink.as_mut(), self.music.as_ref()) else {
            return;
        };
        let result = match self.music_state {
            MusicState::Playing => return,
            MusicState::Paused => sink.set_music_paused(false),
            MusicState::Stopped => sink.start_music(track),
        };
        match result {
            Ok(()) => {
                debug!("[audio] music playing ({})", track.path.display());
                self.music_state = MusicState::Playing;
            }
            Err(e) => warn!("[audio] background music failed: {e}"),
        }
    }

    fn pause_music(&mut self) {
        if self.music_state != MusicState::Playing {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        match sink.set_music_paused(true) {
            Ok(()) => self.music_state = MusicState::Paused,
            Err(e) => warn!("[audio] failed to pause music: {e}"),
        }
    }
}

#[cfg(not(feature = "kira"))]
fn default_opener() -> SinkOpener {
    Box::new(|| Ok(Box::new(NullSink::new()) as Box<dyn SoundSink>))
}

#[cfg(feature = "kira")]
fn default_opener() -> SinkOpener {
    Box::new(|| Ok(Box::new(kira_sink::KiraSink::open()?) as Box<dyn SoundSink>))
}

#[cfg(feature = "kira")]
pub use kira_sink::KiraSink;

#[cfg(feature = "kira")]
mod kira_sink {
    use super::{MusicTrack, SoundSink};
    use evergreen_core::{EvergreenError, Result};
    use kira::sound::static_sound::{StaticSoundData, StaticSoundSettings};
    use kira::sound::streaming::{StreamingSoundData, StreamingSoundHandle};
    use kira::sound::FromFileError;
    use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Frame, Tween};
    use std::sync::Arc;

    /// Plays buffers through Kira's default output device
    pub struct KiraSink {
        manager: AudioManager<DefaultBackend>,
        music: Option<StreamingSoundHandle<FromFileError>>,
    }

    impl KiraSink {
        pub fn open() -> Result<Self> {
            let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
                .map_err(|e| EvergreenError::AudioError(format!("no device available: {e}")))?;
            Ok(Self {
                manager,
                music: None,
            })
        }
    }

    /// Convert linear amplitude (0.0–1.0) to decibels
    fn amplitude_to_db(amplitude: f32) -> Decibels {
        if amplitude <= 0.0 {
            Decibels(-60.0)
        } else {
            Decibels((20.0 * amplitude.log10()).max(-60.0))
        }
    }

    impl SoundSink for KiraSink {
        fn play(&mut self, samples: Arc<[f32]>, sample_rate: u32) -> Result<()> {
            let frames: Arc<[Frame]> = samples.iter().map(|s| Frame::from_mono(*s)).collect();
            let data = StaticSoundData {
                sample_rate,
                frames,
                settings: StaticSoundSettings::default(),
                slice: None,
            };
            self.manager
                .play(data)
                .map_err(|e| EvergreenError::AudioError(format!("playback failed: {e}")))?;
            Ok(())
        }

        fn start_music(&mut self, track: &MusicTrack) -> Result<()> {
            let mut data = StreamingSoundData::from_file(&track.path)
                .map_err(|e| {
                    EvergreenError::AudioError(format!(
                        "Failed to open music '{}': {e}",
                        track.path.display()
                    ))
                })?
                .volume(amplitude_to_db(track.volume));
            if track.looping {
                data = data.loop_region(..);
            }
            let handle = self
                .manager
                .play(data)
                .map_err(|e| EvergreenError::AudioError(format!("music playback failed: {e}")))?;
            self.music = Some(handle);
            Ok(())
        }

        fn set_music_paused(&mut self, paused: bool) -> Result<()> {
            if let Some(handle) = self.music.as_mut() {
                if paused {
                    handle.pause(Tween::default());
                } else {
                    handle.resume(Tween::default());
                }
            }
            Ok(())
        }

        fn name(&self) -> &str {
            "kira"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evergreen_core::EvergreenError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records buffer lengths and music calls; optionally fails everything
    struct RecordingSink {
        plays: Rc<RefCell<Vec<usize>>>,
        music: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl SoundSink for RecordingSink {
        fn play(&mut self, samples: Arc<[f32]>, _sample_rate: u32) -> Result<()> {
            if self.fail {
                return Err(EvergreenError::AudioError("device lost".into()));
            }
            self.plays.borrow_mut().push(samples.len());
            Ok(())
        }

        fn start_music(&mut self, track: &MusicTrack) -> Result<()> {
            if self.fail {
                return Err(EvergreenError::AudioError("autoplay blocked".into()));
            }
            self.music
                .borrow_mut()
                .push(format!("start {} {}", track.path.display(), track.volume));
            Ok(())
        }

        fn set_music_paused(&mut self, paused: bool) -> Result<()> {
            let call = if paused { "pause" } else { "resume" };
            self.music.borrow_mut().push(call.to_string());
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    type Log<T> = Rc<RefCell<Vec<T>>>;

    fn recording_opener(fail: bool) -> (SinkOpener, Log<usize>, Log<String>) {
        let plays: Log<usize> = Rc::new(RefCell::new(Vec::new()));
        let music: Log<String> = Rc::new(RefCell::new(Vec::new()));
        let (plays_shared, music_shared) = (plays.clone(), music.clone());
        let opener: SinkOpener = Box::new(move || {
            Ok(Box::new(RecordingSink {
                plays: plays_shared.clone(),
                music: music_shared.clone(),
                fail,
            }) as Box<dyn SoundSink>)
        });
        (opener, plays, music)
    }

    fn recording_engine(fail: bool) -> (AudioEngine, Log<usize>) {
        let (opener, plays, _) = recording_opener(fail);
        (AudioEngine::with_opener(opener, 1000), plays)
    }

    fn music_engine(fail: bool) -> (AudioEngine, Log<String>) {
        let (opener, _, music) = recording_opener(fail);
        let engine = AudioEngine::with_opener(opener, 1000)
            .with_music(MusicTrack::looping("jingle.ogg", DEFAULT_MUSIC_VOLUME));
        (engine, music)
    }

    #[test]
    fn plays_and_caches() {
        let (mut engine, plays) = recording_engine(false);
        assert!(engine.is_available());
        assert!(!engine.is_cached(SoundEffect::Reveal));

        assert!(engine.play(SoundEffect::Reveal));
        assert!(engine.play(SoundEffect::Reveal));
        assert!(engine.is_cached(SoundEffect::Reveal));
        assert_eq!(*plays.borrow(), vec![1500, 1500]);
    }

    #[test]
    fn muted_engine_skips_effects() {
        let (mut engine, plays) = recording_engine(false);
        engine.set_muted(true);
        assert!(!engine.play(SoundEffect::Explosion));
        assert!(plays.borrow().is_empty());

        engine.set_muted(false);
        assert!(engine.play(SoundEffect::Explosion));
        assert_eq!(plays.borrow().len(), 1);
    }

    #[test]
    fn sink_errors_are_swallowed() {
        let (mut engine, _) = recording_engine(true);
        assert!(!engine.play(SoundEffect::MagicReset));
        assert!(engine.is_available());
    }

    #[test]
    fn unlock_retries_failed_open() {
        let attempts = Rc::new(RefCell::new(0));
        let counter = attempts.clone();
        let opener: SinkOpener = Box::new(move || {
            *counter.borrow_mut() += 1;
            if *counter.borrow() < 3 {
                Err(EvergreenError::AudioError("suspended".into()))
            } else {
                Ok(Box::new(NullSink::new()) as Box<dyn SoundSink>)
            }
        });

        let mut engine = AudioEngine::with_opener(opener, 1000);
        assert!(!engine.is_available());
        assert!(!engine.play(SoundEffect::Reveal));

        assert!(!engine.unlock());
        assert!(engine.unlock());
        assert!(engine.is_available());
        assert!(engine.unlock());
        assert_eq!(*attempts.borrow(), 3);
        assert!(engine.play(SoundEffect::Reveal));
    }

    #[test]
    fn music_starts_on_unlock() {
        let (mut engine, music) = music_engine(false);
        assert!(music.borrow().is_empty());
        assert!(!engine.is_music_playing());

        assert!(engine.unlock());
        assert!(engine.is_music_playing());
        assert!(engine.unlock());
        assert_eq!(*music.borrow(), vec!["start jingle.ogg 0.25".to_string()]);
    }

    #[test]
    fn muted_unlock_leaves_music_stopped() {
        let (mut engine, music) = music_engine(false);
        engine.set_muted(true);
        assert!(engine.unlock());
        assert!(!engine.is_music_playing());
        assert!(music.borrow().is_empty());

        engine.set_muted(false);
        assert!(engine.is_music_playing());
        assert_eq!(music.borrow().len(), 1);
    }

    #[test]
    fn mute_pauses_and_unmute_resumes_music() {
        let (mut engine, music) = music_engine(false);
        engine.unlock();

        engine.set_muted(true);
        assert!(!engine.is_music_playing());
        engine.set_muted(true);
        engine.unlock();

        engine.set_muted(false);
        assert!(engine.is_music_playing());
        assert_eq!(
            *music.borrow(),
            vec![
                "start jingle.ogg 0.25".to_string(),
                "pause".to_string(),
                "resume".to_string(),
            ]
        );
    }

    #[test]
    fn blocked_music_retries_on_next_unlock() {
        let (mut engine, _) = music_engine(true);
        assert!(engine.unlock());
        assert!(!engine.is_music_playing());
        assert!(engine.unlock());
        assert!(!engine.is_music_playing());
        assert!(engine.is_available());
    }

    #[test]
    fn engine_without_track_ignores_music() {
        let (mut engine, _) = recording_engine(false);
        assert!(engine.music().is_none());
        engine.unlock();
        engine.set_muted(true);
        engine.set_muted(false);
        assert!(!engine.is_music_playing());
    }

    #[test]
    fn null_sink_counts_plays() {
        let mut sink = NullSink::new();
        sink.play(Arc::from(vec![0.0f32; 4]), 1000).unwrap();
        sink.play(Arc::from(Vec::new()), 1000).unwrap();
        assert_eq!(sink.played(), 2);
        assert_eq!(sink.name(), "null");
    }

    #[test]
    fn silent_engine_accepts_everything() {
        let mut engine = AudioEngine::silent();
        assert!(engine.is_available());
        assert!(engine.play(SoundEffect::Explosion));
        assert_eq!(engine.sample_rate(), DEFAULT_SAMPLE_RATE);
    }
}
