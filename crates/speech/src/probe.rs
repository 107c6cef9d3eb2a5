//! Best-effort sanity check of uploaded recordings.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{config::AudioProfile, error::SpeechResult};

#[derive(Debug, Clone, PartialEq)]
pub struct AudioMetadata {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub float_samples: bool,
    pub duration_secs: f64,
}

impl AudioMetadata {
    /// Whether the recording has the layout the recognizer will be told to expect.
    pub fn matches(&self, profile: &AudioProfile) -> bool {
        self.sample_rate == profile.sample_rate_hertz
            && self.channels == profile.audio_channel_count
            && self.bits_per_sample == 16
            && !self.float_samples
    }
}

#[async_trait]
pub trait FormatProber: Send + Sync {
    async fn probe(&self, path: &Path) -> SpeechResult<AudioMetadata>;
}

/// Reads the RIFF/WAVE header.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavProber;

#[async_trait]
impl FormatProber for WavProber {
    async fn probe(&self, path: &Path) -> SpeechResult<AudioMetadata> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || read_wav_header(&path)).await?
    }
}

fn read_wav_header(path: &Path) -> SpeechResult<AudioMetadata> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let duration_secs = if spec.sample_rate == 0 {
        0.0
    } else {
        f64::from(reader.duration()) / f64::from(spec.sample_rate)
    };

    Ok(AudioMetadata {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        float_samples: spec.sample_format == hound::SampleFormat::Float,
        duration_secs,
    })
}
