use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::media::domain::audio_normalizer::NormalizationProfile;
use crate::shared::constants::{
    APP_DIR_NAME, AUDIO_EXTENSIONS, DEFAULT_MAX_DURATION_SECS, DEFAULT_PROBE_TIMEOUT_SECS,
    DEFAULT_TRANSCODE_TIMEOUT_SECS, WHISPER_MODEL_NAME, WHISPER_MODEL_URL,
};
use crate::transcription::domain::decoding_options::{DecodingOptions, DecodingOptionsError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("max_duration_secs must be a positive number, got {0}")]
    MaxDuration(f64),
    #[error("accepted_extensions must not be empty")]
    NoExtensions,
    #[error(transparent)]
    Decoding(#[from] DecodingOptionsError),
}

/// Everything the transcription pipeline can be tuned with.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Longest accepted source; longer inputs are rejected before any work.
    pub max_duration_secs: f64,
    pub accepted_extensions: Vec<String>,
    pub decoding: DecodingOptions,
    pub normalization: NormalizationProfile,
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub probe_timeout_secs: u64,
    pub transcode_timeout_secs: u64,
    /// No deadline when unset.
    pub inference_timeout_secs: Option<u64>,
    pub model_name: String,
    pub model_url: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_duration_secs: DEFAULT_MAX_DURATION_SECS,
            accepted_extensions: AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            decoding: DecodingOptions::default(),
            normalization: NormalizationProfile::default(),
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            transcode_timeout_secs: DEFAULT_TRANSCODE_TIMEOUT_SECS,
            inference_timeout_secs: None,
            model_name: WHISPER_MODEL_NAME.to_string(),
            model_url: WHISPER_MODEL_URL.to_string(),
        }
    }
}

impl PipelineConfig {
    /// `<config dir>/Scribe/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given (it must exist and parse). Otherwise the
    /// file at [`Self::default_path`] is used when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => {
                log::debug!("Loading config from {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_duration_secs.is_finite() && self.max_duration_secs > 0.0) {
            return Err(ConfigError::MaxDuration(self.max_duration_secs));
        }
        if self.accepted_extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        self.decoding.validate()?;
        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn transcode_timeout(&self) -> Duration {
        Duration::from_secs(self.transcode_timeout_secs)
    }

    pub fn inference_timeout(&self) -> Option<Duration> {
        self.inference_timeout_secs.map(Duration::from_secs)
    }
}
