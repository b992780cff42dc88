use std::path::{Path, PathBuf};

use thiserror::Error;

use super::audio_segment::AudioSegment;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("no audio stream in {0}")]
    NoAudioStream(PathBuf),
    #[error("ffmpeg: {0}")]
    Ffmpeg(#[from] ffmpeg_next::Error),
}

/// Domain interface for decoding an audio file into PCM for inference.
pub trait AudioReader: Send + Sync {
    /// Decode the best audio stream to mono at `target_sample_rate`.
    fn read_audio(&self, path: &Path, target_sample_rate: u32) -> Result<AudioSegment, DecodeError>;
}
