use serde::{Deserialize, Serialize};

/// One recognized utterance: a time span in seconds plus its text.
///
/// Invariants: `start >= 0`, `end > start`, `text` trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    /// Builds a segment, trimming `text`. Returns `None` when the span or
    /// text would break the invariants.
    pub fn new(start: f64, end: f64, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || !start.is_finite() || !end.is_finite() {
            return None;
        }
        if start < 0.0 || end <= start {
            return None;
        }
        Some(Self {
            start,
            end,
            text: text.to_string(),
        })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// True when every segment has a positive span and starts are non-decreasing.
pub fn is_ordered(segments: &[Segment]) -> bool {
    segments.iter().all(|s| s.end > s.start)
        && segments.windows(2).all(|w| w[0].start <= w[1].start)
}
