//! Sound effect synthesis
//!
//! Each effect is a handful of oscillator voices with a frequency ramp and a
//! gain envelope. [`synthesize`] renders them offline into a mono buffer that
//! any sink can play.

use std::f32::consts::TAU;

/// Gain the exponential decays bottom out at
const DECAY_FLOOR: f32 = 0.001;

/// Cues fired by the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Low thrum plus a run of wind chimes
    Explosion,
    /// Rising swell when the tree reassembles
    MagicReset,
    /// Short bright chirp when the message appears
    Reveal,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [
        SoundEffect::Explosion,
        SoundEffect::MagicReset,
        SoundEffect::Reveal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Explosion => "explosion",
            SoundEffect::MagicReset => "magic_reset",
            SoundEffect::Reveal => "reveal",
        }
    }

    /// The voices making up this effect
    pub fn voices(&self) -> Vec<Voice> {
        match self {
            SoundEffect::Explosion => {
                let mut voices = vec![Voice {
                    waveform: Waveform::Sine,
                    frequency: Ramp::Exponential {
                        from: 120.0,
                        to: 40.0,
                        duration: 1.5,
                    },
                    gain: Envelope::Decay {
                        peak: 0.8,
                        duration: 2.0,
                    },
                    start: 0.0,
                    stop: 2.0,
                }];
                for (i, freq) in [880.0, 1174.0, 1318.0, 1760.0, 2093.0].into_iter().enumerate() {
                    let start = i as f32 * 0.08;
                    voices.push(Voice {
                        waveform: Waveform::Triangle,
                        frequency: Ramp::Hold(freq),
                        gain: Envelope::Decay {
                            peak: 0.1,
                            duration: 1.2,
                        },
                        start,
                        stop: start + 1.2,
                    });
                }
                voices
            }
            SoundEffect::MagicReset => vec![Voice {
                waveform: Waveform::Sine,
                frequency: Ramp::Linear {
                    from: 300.0,
                    to: 600.0,
                    duration: 1.5,
                },
                gain: Envelope::Swell {
                    peak: 0.2,
                    attack: 0.5,
                    release: 1.5,
                },
                start: 0.0,
                stop: 2.0,
            }],
            SoundEffect::Reveal => vec![Voice {
                waveform: Waveform::Sine,
                frequency: Ramp::Exponential {
                    from: 800.0,
                    to: 1200.0,
                    duration: 0.2,
                },
                gain: Envelope::Decay {
                    peak: 0.3,
                    duration: 1.5,
                },
                start: 0.0,
                stop: 1.5,
            }],
        }
    }

    /// Length of the rendered buffer, in seconds
    pub fn duration(&self) -> f32 {
        self.voices().iter().map(|v| v.stop).fold(0.0, f32::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

impl Waveform {
    /// Sample at `phase` (cycles, any real number)
    fn sample(&self, phase: f32) -> f32 {
        let p = phase - phase.floor();
        match self {
            Waveform::Sine => (p * TAU).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
        }
    }
}

/// Frequency over time, measured from the voice's own start
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ramp {
    Hold(f32),
    Linear { from: f32, to: f32, duration: f32 },
    Exponential { from: f32, to: f32, duration: f32 },
}

impl Ramp {
    pub fn value_at(&self, t: f32) -> f32 {
        match *self {
            Ramp::Hold(v) => v,
            Ramp::Linear { from, to, duration } => {
                let k = ramp_fraction(t, duration);
                from + (to - from) * k
            }
            Ramp::Exponential { from, to, duration } => {
                let k = ramp_fraction(t, duration);
                from * (to / from).powf(k)
            }
        }
    }
}

/// Gain over time, measured from the voice's own start
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// Exponential fall from `peak` to the floor over `duration`
    Decay { peak: f32, duration: f32 },
    /// Linear rise to `peak` at `attack`, linear fall to silence at `release`
    Swell { peak: f32, attack: f32, release: f32 },
}

impl Envelope {
    pub fn gain_at(&self, t: f32) -> f32 {
        match *self {
            Envelope::Decay { peak, duration } => {
                let k = ramp_fraction(t, duration);
                peak * (DECAY_FLOOR / peak).powf(k)
            }
            Envelope::Swell {
                peak,
                attack,
                release,
            } => {
                if t <= 0.0 {
                    0.0
                } else if t < attack {
                    peak * t / attack
                } else if t < release {
                    peak * (1.0 - (t - attack) / (release - attack))
                } else {
                    0.0
                }
            }
        }
    }
}

fn ramp_fraction(t: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (t / duration).clamp(0.0, 1.0)
    }
}

/// One oscillator with its envelopes, active in `[start, stop)` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub frequency: Ramp,
    pub gain: Envelope,
    pub start: f32,
    pub stop: f32,
}

/// Render `effect` into mono samples in [-1, 1].
///
/// A zero sample rate yields an empty buffer.
pub fn synthesize(effect: SoundEffect, sample_rate: u32) -> Vec<f32> {
    if sample_rate == 0 {
        return Vec::new();
    }
    let rate = sample_rate as f32;
    let len = (effect.duration() * rate).ceil() as usize;
    let mut buffer = vec![0.0f32; len];

    for voice in effect.voices() {
        let first = (voice.start * rate).round() as usize;
        let last = ((voice.stop * rate).round() as usize).min(len);
        let mut phase = 0.0f32;
        for (n, sample) in buffer[first.min(last)..last].iter_mut().enumerate() {
            let t = n as f32 / rate;
            *sample += voice.waveform.sample(phase) * voice.gain.gain_at(t);
            phase += voice.frequency.value_at(t) / rate;
            if phase >= 1.0 {
                phase -= phase.floor();
            }
        }
    }

    for sample in &mut buffer {
        *sample = sample.clamp(-1.0, 1.0);
    }
    buffer
}
