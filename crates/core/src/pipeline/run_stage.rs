use std::fmt;

/// Stages of one transcription run. Runs only move forward:
/// `Received → Probed → {Rejected | Normalized} → Transcribed → Rendered → Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Received,
    Probed,
    Rejected,
    Normalized,
    Transcribed,
    Rendered,
    Completed,
}

impl RunStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStage::Rejected | RunStage::Completed)
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunStage::Received => "received",
            RunStage::Probed => "probed",
            RunStage::Rejected => "rejected",
            RunStage::Normalized => "normalized",
            RunStage::Transcribed => "transcribed",
            RunStage::Rendered => "rendered",
            RunStage::Completed => "completed",
        };
        f.write_str(name)
    }
}
