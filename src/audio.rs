use color_eyre::eyre::WrapErr;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source, source::SineWave};
use std::time::Duration;

/// Audio manager for playing sound effects.
///
/// Effects are synthesized tones, so there is nothing to load from disk.
pub struct AudioManager {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl AudioManager {
    /// Open the default output device
    pub fn new() -> color_eyre::Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().wrap_err("failed to open audio output")?;
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Open the default output device, or run silently if there is none
    pub fn try_open() -> Option<Self> {
        match Self::new() {
            Ok(audio) => Some(audio),
            Err(err) => {
                log::warn!("continuing without audio: {err:#}");
                None
            }
        }
    }

    /// Short low blip when the player loses a life
    pub fn play_hit_sound(&self) {
        self.play_tones(&[(220.0, Duration::from_millis(120))], 0.2);
    }

    /// Longer falling pair of tones for game over
    pub fn play_game_over_sound(&self) {
        self.play_tones(
            &[
                (330.0, Duration::from_millis(200)),
                (165.0, Duration::from_millis(400)),
            ],
            0.2,
        );
    }

    /// Queue tones back to back on one sink
    fn play_tones(&self, tones: &[(f32, Duration)], volume: f32) {
        // Ignore errors for sound playback - don't want to crash the game
        if let Ok(sink) = Sink::try_new(&self.stream_handle) {
            sink.set_volume(volume);
            for &(frequency, duration) in tones {
                sink.append(SineWave::new(frequency).take_duration(duration));
            }
            sink.detach();
        }
    }
}
