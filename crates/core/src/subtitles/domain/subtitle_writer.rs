use std::path::{Path, PathBuf};

use thiserror::Error;

use super::subtitle_document::{SubtitleDocument, SubtitleFormat};
use super::{srt, txt, vtt};
use crate::transcription::domain::segment::Segment;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write {format} file {path}: {source}")]
    Write {
        format: SubtitleFormat,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders `segments` in the requested format.
pub fn render(format: SubtitleFormat, segments: &[Segment]) -> Option<SubtitleDocument> {
    match format {
        SubtitleFormat::Srt => srt::render(segments),
        SubtitleFormat::Vtt => vtt::render(segments),
        SubtitleFormat::Txt => txt::render(segments),
    }
}

/// Domain interface for persisting rendered documents.
pub trait SubtitleWriter: Send + Sync {
    /// Writes `document` into `dir` and returns the path of the new file.
    fn write(&self, dir: &Path, document: &SubtitleDocument) -> Result<PathBuf, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_dispatches_by_format() {
        let segments = vec![Segment::new(0.0, 1.0, "hi").unwrap()];
        for &format in SubtitleFormat::ALL {
            let doc = render(format, &segments).unwrap();
            assert_eq!(doc.format, format);
        }
    }

    #[test]
    fn test_render_empty_yields_none_for_every_format() {
        for &format in SubtitleFormat::ALL {
            assert!(render(format, &[]).is_none(), "{format} should render nothing");
        }
    }
}
