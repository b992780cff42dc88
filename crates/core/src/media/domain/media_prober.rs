use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("input file not found: {0}")]
    NotFound(PathBuf),
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
    #[error("unreadable probe output: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("container reports no usable duration")]
    MissingDuration,
}

/// Domain interface for read-only inspection of a media file.
pub trait MediaProber: Send + Sync {
    /// Duration of the media in seconds.
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError>;
}
