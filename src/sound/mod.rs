//! Sound playback for loud notifications.
//!
//! This module provides audio notification capabilities, including:
//!
//! - Synthesized chimes (no bundled audio files)
//! - Non-blocking playback through rodio
//! - Graceful degradation when audio is unavailable
//!
//! # Usage
//!
//! ```rust,no_run
//! use eyerest::sound::{Chime, RodioSoundPlayer};
//!
//! // Create a player (may fail if no audio device)
//! let player = RodioSoundPlayer::new().expect("audio init");
//! player.play(Chime::Alert).expect("playback failed");
//! ```

mod chime;
mod error;
mod player;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use chime::{Chime, Tone};
pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a chime without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, chime: Chime) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, chime: Chime) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, chime)
    }
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Arc<P> {
    fn play(&self, chime: Chime) -> Result<(), SoundError> {
        P::play(self, chime)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<Chime>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<Chime> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, chime: Chime) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(chime);
        Ok(())
    }
}
