use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use super::decoding_options::DecodingOptionsError;
use super::transcript::Transcript;
use crate::audio::domain::audio_reader::DecodeError;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("failed to load speech model: {0}")]
    ModelLoad(String),
    #[error("invalid decoding options: {0}")]
    Options(#[from] DecodingOptionsError),
    #[error("failed to decode normalized audio: {0}")]
    Audio(#[from] DecodeError),
    #[error("speech model failed: {0}")]
    Model(String),
    #[error("transcription did not finish within {0:?}")]
    Timeout(Duration),
    #[error("transcription worker stopped without a result")]
    WorkerLost,
}

/// Domain interface for speech-to-text.
///
/// Implementations must be safe to call from several threads; an engine
/// whose model is not reentrant serializes calls internally.
pub trait TranscriptionEngine: Send + Sync {
    fn transcribe(&self, audio_path: &Path) -> Result<Transcript, InferenceError>;
}
