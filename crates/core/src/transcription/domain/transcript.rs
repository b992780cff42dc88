use serde::Serialize;

use super::segment::Segment;

/// Full recognized text plus the segments it came from.
///
/// The engine produces `text` and the segment texts independently, so they
/// agree only up to whitespace. Nothing here reconciles them.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Transcript {
    pub text: String,
    pub segments: Vec<Segment>,
}

impl Transcript {
    pub fn new(text: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            text: text.into(),
            segments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment texts joined by single spaces.
    pub fn segment_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Compares `text` with the segment texts after collapsing whitespace.
    pub fn is_consistent(&self) -> bool {
        collapse_whitespace(&self.text) == collapse_whitespace(&self.segment_text())
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
