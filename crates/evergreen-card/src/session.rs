//! Card session
//!
//! Owns the explode trigger and every stateful part of the card. A host
//! forwards pointer input, calls [`CardSession::frame`] once per rendered
//! frame, then reads [`CardSession::overlay`] and [`CardSession::render`].

use crate::config::{CardConfig, CardSection};
use evergreen_animation::DelayTimer;
use evergreen_audio::AudioSystem;
use evergreen_core::Result;
use evergreen_runtime::{
    CardEvent, EventBus, ExplodeTrigger, FrameClock, FrameContext, FrameSystem, TapGesture,
};
use evergreen_scene::{SceneRenderer, TreeScene};
use evergreen_wish::{create_provider, WishJob, WishProvider, WishRequest};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything the 2D overlay needs for this frame
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub title: String,
    pub subtitle: String,
    /// Title block; hidden while exploded
    pub header_visible: bool,
    /// "Tap to open" prompt; hidden while exploded
    pub hint: String,
    pub hint_visible: bool,
    pub headline: String,
    /// Revealed message, `None` until the reveal delay has passed
    pub message: Option<String>,
    pub signature: String,
    pub watch_again_label: String,
    pub watch_again_visible: bool,
    pub muted: bool,
}

pub struct CardSession {
    card: CardSection,
    wish_request: WishRequest,
    scene: TreeScene,
    clock: FrameClock,
    trigger: ExplodeTrigger,
    gesture: TapGesture,
    events: EventBus,
    audio: AudioSystem,
    provider: Option<Arc<dyn WishProvider>>,
    wish_job: Option<WishJob>,
    wish: Option<String>,
    message_timer: DelayTimer,
    message_visible: bool,
    muted: bool,
}

impl CardSession {
    /// Build a session from config alone: default audio backend and the
    /// configured wish provider.
    pub fn from_config(config: CardConfig) -> Result<Self> {
        let audio = AudioSystem::from_config(&config.audio);
        let provider = if config.card.wish_enabled {
            match create_provider(&config.wish.provider, &config.wish) {
                Ok(provider) => Some(provider),
                Err(e) => {
                    warn!("[card] wish text disabled: {e}");
                    None
                }
            }
        } else {
            None
        };
        Self::new(config, audio, provider)
    }

    pub fn new(
        config: CardConfig,
        audio: AudioSystem,
        provider: Option<Arc<dyn WishProvider>>,
    ) -> Result<Self> {
        config.validate()?;
        let scene = TreeScene::new(config.scene.clone())?;
        Ok(Self::assemble(config, scene, audio, provider))
    }

    /// Like [`CardSession::new`] with every scene random choice drawn from `rng`
    pub fn with_rng<R: Rng + ?Sized>(
        config: CardConfig,
        audio: AudioSystem,
        provider: Option<Arc<dyn WishProvider>>,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let scene = TreeScene::with_rng(config.scene.clone(), rng)?;
        Ok(Self::assemble(config, scene, audio, provider))
    }

    fn assemble(
        config: CardConfig,
        scene: TreeScene,
        mut audio: AudioSystem,
        provider: Option<Arc<dyn WishProvider>>,
    ) -> Self {
        let muted = config.audio.muted;
        audio.engine.set_muted(muted);
        if !muted {
            // Autoplay attempt; platforms that block it get another try on
            // the first gesture.
            audio.unlock();
        }
        info!(
            "[card] session ready ({} elements, wish {})",
            scene.element_count(),
            provider.as_ref().map(|p| p.name()).unwrap_or("off")
        );
        Self {
            message_timer: DelayTimer::new(config.card.message_delay),
            wish_request: config.wish.request(),
            card: config.card,
            scene,
            clock: FrameClock::new(),
            trigger: ExplodeTrigger::new(),
            gesture: TapGesture::new(),
            events: EventBus::new(),
            audio,
            provider,
            wish_job: None,
            wish: None,
            message_visible: false,
            muted,
        }
    }

    // ── Input ──

    /// Pointer pressed anywhere on the card. Unless muted, also a chance to
    /// start audio output and music that the platform kept suspended.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if !self.muted {
            self.audio.unlock();
        }
        self.gesture.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.gesture.pointer_move(x, y);
    }

    /// Pointer released. A tap (no drag) on the assembled tree explodes it.
    /// Returns true if this release exploded the tree.
    pub fn pointer_up(&mut self) -> bool {
        if self.gesture.pointer_up() && !self.trigger.is_exploded() {
            return self.explode();
        }
        false
    }

    /// Explode the tree. Returns true on the assembled → exploded edge.
    pub fn explode(&mut self) -> bool {
        if !self.trigger.explode() {
            return false;
        }
        self.events.push(CardEvent::Exploded);
        self.message_timer.arm();
        self.start_wish();
        true
    }

    /// Reassemble the tree and hide the message. Returns true on the
    /// exploded → assembled edge.
    pub fn watch_again(&mut self) -> bool {
        if !self.trigger.reset() {
            return false;
        }
        self.events.push(CardEvent::Reset);
        self.message_timer.disarm();
        self.message_visible = false;
        true
    }

    /// Flip mute. Returns the new mute state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.events.push(CardEvent::MuteChanged(self.muted));
        if !self.muted {
            self.audio.unlock();
        }
        self.muted
    }

    fn start_wish(&mut self) {
        if self.wish.is_some() || self.wish_job.is_some() {
            return;
        }
        if let Some(provider) = &self.provider {
            debug!("[card] requesting wish from {}", provider.name());
            self.wish_job = Some(WishJob::spawn(provider.clone(), self.wish_request.clone()));
        }
    }

    // ── Frame ──

    /// Advance by a host-measured `dt` (seconds). Returns the events emitted
    /// since the previous frame, after audio has handled them.
    pub fn frame(&mut self, dt: f64) -> Vec<CardEvent> {
        self.clock.advance_by(dt);
        self.step()
    }

    /// Advance from the wall clock
    pub fn tick(&mut self) -> Vec<CardEvent> {
        self.clock.tick();
        self.step()
    }

    fn step(&mut self) -> Vec<CardEvent> {
        let ctx: FrameContext = self.trigger.context(&self.clock);
        self.scene.advance(&ctx);

        if self.message_timer.tick(ctx.dt) {
            self.message_visible = true;
            self.events.push(CardEvent::MessageRevealed);
        }

        if let Some(job) = self.wish_job.as_mut() {
            if let Some(text) = job.poll() {
                debug!("[card] wish ready");
                self.wish = Some(text.clone());
                self.wish_job = None;
                self.events.push(CardEvent::WishReady(text));
            }
        }

        let events = self.events.drain();
        if !events.is_empty() {
            self.audio.process_events(&events);
        }
        events
    }

    // ── Output ──

    pub fn overlay(&self) -> OverlayState {
        let exploded = self.trigger.is_exploded();
        let message = self.message_visible.then(|| {
            self.wish
                .clone()
                .unwrap_or_else(|| self.card.greeting.clone())
        });
        OverlayState {
            title: self.card.title.clone(),
            subtitle: self.card.subtitle.clone(),
            header_visible: !exploded,
            hint: self.card.hint.clone(),
            hint_visible: !exploded,
            headline: self.card.headline.clone(),
            message,
            signature: self.card.signature.clone(),
            watch_again_label: self.card.watch_again_label.clone(),
            watch_again_visible: self.message_visible,
            muted: self.muted,
        }
    }

    pub fn render<S: SceneRenderer + ?Sized>(&self, renderer: &mut S) {
        self.scene.render(renderer);
    }

    pub fn scene(&self) -> &TreeScene {
        &self.scene
    }

    pub fn is_exploded(&self) -> bool {
        self.trigger.is_exploded()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn audio(&self) -> &AudioSystem {
        &self.audio
    }

    /// The resolved wish, once the background request has finished
    pub fn wish(&self) -> Option<&str> {
        self.wish.as_deref()
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.total_time
    }
}
