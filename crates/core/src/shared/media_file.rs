use std::path::{Path, PathBuf};

/// A reference to on-disk audio or video bytes, with the duration filled in
/// once the file has been probed.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaFile {
    path: PathBuf,
    duration: Option<f64>,
}

impl MediaFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            duration: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Lowercased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }
}
