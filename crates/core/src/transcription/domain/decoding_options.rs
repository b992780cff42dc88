use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{DEFAULT_BEAM_SIZE, DEFAULT_LANGUAGE};

#[derive(Error, Debug, PartialEq)]
pub enum DecodingOptionsError {
    #[error("a fixed language is required, got '{0}'")]
    Language(String),
    #[error("beam size must be at least 1")]
    BeamSize,
    #[error("best-of ({best_of}) must equal beam size ({beam_size})")]
    BestOf { best_of: u32, beam_size: u32 },
}

/// Decoder settings for the speech model. The task is always transcription
/// in one fixed language; translation and language detection are not
/// supported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodingOptions {
    /// ISO 639-1 code, e.g. `en`.
    pub language: String,
    pub beam_size: u32,
    /// Candidate count, kept equal to `beam_size`. Beam search decodes
    /// `beam_size` candidates itself, so this has no separate effect.
    pub best_of: u32,
    /// Inference threads; 0 picks from available parallelism.
    pub threads: u32,
}

impl Default for DecodingOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            beam_size: DEFAULT_BEAM_SIZE,
            best_of: DEFAULT_BEAM_SIZE,
            threads: 0,
        }
    }
}

impl DecodingOptions {
    pub fn validate(&self) -> Result<(), DecodingOptionsError> {
        let lang = self.language.trim();
        if lang.is_empty() || lang.eq_ignore_ascii_case("auto") {
            return Err(DecodingOptionsError::Language(self.language.clone()));
        }
        if self.beam_size == 0 {
            return Err(DecodingOptionsError::BeamSize);
        }
        if self.best_of != self.beam_size {
            return Err(DecodingOptionsError::BestOf {
                best_of: self.best_of,
                beam_size: self.beam_size,
            });
        }
        Ok(())
    }

    /// Language code as the model expects it.
    pub fn language_code(&self) -> String {
        self.language.trim().to_ascii_lowercase()
    }

    pub fn effective_threads(&self) -> u32 {
        if self.threads > 0 {
            return self.threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(1)
            .min(8)
    }
}
