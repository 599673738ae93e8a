//! Sound player implementation using rodio.
//!
//! This module provides the `RodioSoundPlayer` which uses the rodio v0.20
//! audio library to synthesize and play chimes.

use rodio::source::{SineWave, Source, Zero};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::chime::Chime;
use super::error::SoundError;

/// Output volume for synthesized tones.
const CHIME_VOLUME: f32 = 0.25;

/// Sample rate used for rests between tones.
const REST_SAMPLE_RATE: u32 = 48_000;

/// A sound player that uses rodio for audio playback.
///
/// Sound playback is non-blocking; chimes continue playing in the background.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a chime.
    ///
    /// # Errors
    ///
    /// Returns an error if no sink can be created on the output stream.
    pub fn play(&self, chime: Chime) -> Result<(), SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        for tone in chime.tones() {
            if tone.is_rest() {
                sink.append(Zero::<f32>::new(1, REST_SAMPLE_RATE).take_duration(tone.duration));
            } else {
                sink.append(
                    SineWave::new(tone.frequency)
                        .take_duration(tone.duration)
                        .amplify(CHIME_VOLUME),
                );
            }
        }
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!("Playing {} chime (detached)", chime.name());
        Ok(())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            None
        }
    }
}
