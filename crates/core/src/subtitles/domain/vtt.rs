//! WebVTT rendering.

use super::subtitle_document::{SubtitleDocument, SubtitleFormat};
use super::timestamp::vtt_timestamp;
use crate::transcription::domain::segment::Segment;

pub const HEADER: &str = "WEBVTT";

/// Renders a `WEBVTT` header followed by unnumbered cues.
/// Returns `None` for an empty sequence.
pub fn render(segments: &[Segment]) -> Option<SubtitleDocument> {
    if segments.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(2 + segments.len() * 3);
    lines.push(HEADER.to_string());
    lines.push(String::new());
    for seg in segments {
        lines.push(format!(
            "{} --> {}",
            vtt_timestamp(seg.start),
            vtt_timestamp(seg.end)
        ));
        lines.push(seg.text.trim().to_string());
        lines.push(String::new());
    }

    Some(SubtitleDocument::new(SubtitleFormat::Vtt, lines.join("\n")))
}
