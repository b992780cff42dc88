use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("could not run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with code {code:?}: {stderr}")]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("{tool} did not finish within {secs}s")]
    Timeout { tool: String, secs: u64 },
    #[error("transcoder produced no output at {0}")]
    MissingOutput(PathBuf),
}

/// Canonical encoding every source is converted to before inference:
/// mono, low bitrate, speech-tuned codec, metadata stripped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationProfile {
    pub channels: u16,
    pub bitrate_kbps: u32,
    pub codec: String,
    /// Encoder tuning passed as `-application` (opus: voip, audio, lowdelay).
    pub application: Option<String>,
    /// Container extension of the normalized file.
    pub extension: String,
}

impl Default for NormalizationProfile {
    fn default() -> Self {
        Self {
            channels: 1,
            bitrate_kbps: 12,
            codec: "libopus".to_string(),
            application: Some("voip".to_string()),
            extension: "ogg".to_string(),
        }
    }
}

impl NormalizationProfile {
    /// File name of the normalized copy inside a run workspace.
    pub fn output_file_name(&self) -> String {
        format!("normalized.{}", self.extension)
    }
}

/// Domain interface for transcoding arbitrary input audio into the
/// canonical form. `dest` is owned by the caller and must not be shared
/// between concurrent runs.
pub trait AudioNormalizer: Send + Sync {
    fn normalize(&self, source: &Path, dest: &Path) -> Result<(), TranscodeError>;
}
