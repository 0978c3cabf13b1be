//! Maps card events to audio commands

use crate::sfx::SoundEffect;
use evergreen_runtime::CardEvent;

/// What the audio system should do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play(SoundEffect),
    SetMuted(bool),
}

/// Fixed event → sound table
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioTrigger;

impl AudioTrigger {
    pub fn new() -> Self {
        Self
    }

    pub fn command_for(&self, event: &CardEvent) -> Option<AudioCommand> {
        match event {
            CardEvent::Exploded => Some(AudioCommand::Play(SoundEffect::Explosion)),
            CardEvent::Reset => Some(AudioCommand::Play(SoundEffect::MagicReset)),
            CardEvent::MessageRevealed => Some(AudioCommand::Play(SoundEffect::Reveal)),
            CardEvent::MuteChanged(muted) => Some(AudioCommand::SetMuted(*muted)),
            CardEvent::WishReady(_) => None,
        }
    }

    /// Commands for a batch of events, in event order
    pub fn process(&self, events: &[CardEvent]) -> Vec<AudioCommand> {
        events.iter().filter_map(|e| self.command_for(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_event() {
        let trigger = AudioTrigger::new();
        let commands = trigger.process(&[
            CardEvent::Exploded,
            CardEvent::WishReady("hi".into()),
            CardEvent::MessageRevealed,
            CardEvent::MuteChanged(true),
            CardEvent::Reset,
        ]);
        assert_eq!(
            commands,
            vec![
                AudioCommand::Play(SoundEffect::Explosion),
                AudioCommand::Play(SoundEffect::Reveal),
                AudioCommand::SetMuted(true),
                AudioCommand::Play(SoundEffect::MagicReset),
            ]
        );
    }
}
