//! Plain text with one `[start --> end] text` line per segment.

use super::subtitle_document::{SubtitleDocument, SubtitleFormat};
use super::timestamp::srt_timestamp;
use crate::transcription::domain::segment::Segment;

pub fn render(segments: &[Segment]) -> Option<SubtitleDocument> {
    if segments.is_empty() {
        return None;
    }

    let content = segments
        .iter()
        .map(|seg| {
            format!(
                "[{} --> {}] {}",
                srt_timestamp(seg.start),
                srt_timestamp(seg.end),
                seg.text.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    Some(SubtitleDocument::new(SubtitleFormat::Txt, content))
}
