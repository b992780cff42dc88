use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::subtitles::domain::subtitle_document::SubtitleFormat;
use crate::subtitles::domain::subtitle_writer::RenderError;
use crate::transcription::domain::segment::Segment;
use crate::transcription::domain::transcript::Transcript;

/// Everything a completed run produced.
///
/// The bundle owns the run's scratch directory: every path it hands out
/// stays valid until the bundle is dropped, after which the directory and
/// its files are removed. Use [`persist_to`](Self::persist_to) to keep them.
#[derive(Debug)]
pub struct TranscriptionBundle {
    pub transcript: Transcript,
    pub normalized_audio: PathBuf,
    pub srt_path: Option<PathBuf>,
    pub vtt_path: Option<PathBuf>,
    pub txt_path: Option<PathBuf>,
    /// Formats that rendered but could not be stored. Other formats are
    /// unaffected.
    pub render_failures: Vec<RenderError>,
    workspace: TempDir,
}

impl TranscriptionBundle {
    pub(crate) fn new(workspace: TempDir, transcript: Transcript, normalized_audio: PathBuf) -> Self {
        Self {
            transcript,
            normalized_audio,
            srt_path: None,
            vtt_path: None,
            txt_path: None,
            render_failures: Vec::new(),
            workspace,
        }
    }

    pub fn text(&self) -> &str {
        &self.transcript.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.transcript.segments
    }

    pub fn workspace_dir(&self) -> &Path {
        self.workspace.path()
    }

    pub fn subtitle_path(&self, format: SubtitleFormat) -> Option<&Path> {
        match format {
            SubtitleFormat::Srt => self.srt_path.as_deref(),
            SubtitleFormat::Vtt => self.vtt_path.as_deref(),
            SubtitleFormat::Txt => self.txt_path.as_deref(),
        }
    }

    pub(crate) fn set_subtitle_path(&mut self, format: SubtitleFormat, path: PathBuf) {
        match format {
            SubtitleFormat::Srt => self.srt_path = Some(path),
            SubtitleFormat::Vtt => self.vtt_path = Some(path),
            SubtitleFormat::Txt => self.txt_path = Some(path),
        }
    }

    /// All files produced by the run, normalized audio first.
    pub fn artifacts(&self) -> Vec<&Path> {
        let mut files = vec![self.normalized_audio.as_path()];
        files.extend(
            SubtitleFormat::ALL
                .iter()
                .filter_map(|&format| self.subtitle_path(format)),
        );
        files
    }

    /// Copies every artifact into `dir` (created if missing) and returns the
    /// new paths. The originals are still removed when the bundle drops.
    pub fn persist_to(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;
        let mut copied = Vec::new();
        for source in self.artifacts() {
            let Some(name) = source.file_name() else {
                continue;
            };
            let dest = dir.join(name);
            fs::copy(source, &dest)?;
            copied.push(dest);
        }
        Ok(copied)
    }
}
