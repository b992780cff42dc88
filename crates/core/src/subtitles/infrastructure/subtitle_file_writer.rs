use std::fs;
use std::path::{Path, PathBuf};

use crate::subtitles::domain::subtitle_document::SubtitleDocument;
use crate::subtitles::domain::subtitle_writer::{RenderError, SubtitleWriter};

/// Writes documents as UTF-8 files named after their format.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSubtitleWriter;

impl SubtitleWriter for FileSubtitleWriter {
    fn write(&self, dir: &Path, document: &SubtitleDocument) -> Result<PathBuf, RenderError> {
        let path = dir.join(document.format.file_name());
        fs::write(&path, document.content.as_bytes()).map_err(|source| RenderError::Write {
            format: document.format,
            path: path.clone(),
            source,
        })?;
        log::debug!("Wrote {} ({} bytes)", path.display(), document.content.len());
        Ok(path)
    }
}
