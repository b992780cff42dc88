//! SubRip rendering.

use super::subtitle_document::{SubtitleDocument, SubtitleFormat};
use super::timestamp::srt_timestamp;
use crate::transcription::domain::segment::Segment;

/// Renders numbered cues: index, time range, text, blank line.
/// Returns `None` for an empty sequence.
pub fn render(segments: &[Segment]) -> Option<SubtitleDocument> {
    if segments.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(segments.len() * 4);
    for (i, seg) in segments.iter().enumerate() {
        lines.push((i + 1).to_string());
        lines.push(format!(
            "{} --> {}",
            srt_timestamp(seg.start),
            srt_timestamp(seg.end)
        ));
        lines.push(seg.text.trim().to_string());
        lines.push(String::new());
    }

    Some(SubtitleDocument::new(SubtitleFormat::Srt, lines.join("\n")))
}
