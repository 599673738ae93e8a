//! Synthesized notification chimes.
//!
//! Chimes are short sequences of sine tones generated at play time, so the
//! binary carries no audio assets.

use std::time::Duration;

/// One tone in a chime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in hertz (0 for a rest)
    pub frequency: f32,
    /// Length of the tone
    pub duration: Duration,
}

impl Tone {
    const fn new(frequency: f32, millis: u64) -> Self {
        Self {
            frequency,
            duration: Duration::from_millis(millis),
        }
    }

    /// Returns true if this tone is silence.
    pub fn is_rest(&self) -> bool {
        self.frequency <= 0.0
    }
}

const SOFT_TONES: &[Tone] = &[Tone::new(660.0, 180), Tone::new(880.0, 260)];

const ALERT_TONES: &[Tone] = &[
    Tone::new(988.0, 150),
    Tone::new(0.0, 80),
    Tone::new(988.0, 150),
    Tone::new(0.0, 80),
    Tone::new(1319.0, 320),
];

/// A named chime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chime {
    /// Two gentle rising notes
    Soft,
    /// Repeated high notes for loud reminders
    Alert,
}

impl Chime {
    /// Returns the chime's name.
    pub fn name(&self) -> &'static str {
        match self {
            Chime::Soft => "soft",
            Chime::Alert => "alert",
        }
    }

    /// Returns the tones that make up the chime.
    pub fn tones(&self) -> &'static [Tone] {
        match self {
            Chime::Soft => SOFT_TONES,
            Chime::Alert => ALERT_TONES,
        }
    }

    /// Total playing time.
    pub fn total_duration(&self) -> Duration {
        self.tones().iter().map(|tone| tone.duration).sum()
    }
}
