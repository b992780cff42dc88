use std::fmt;

/// Output formats rendered from a segment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
    /// One `[start --> end] text` line per segment.
    Txt,
}

impl SubtitleFormat {
    pub const ALL: &'static [SubtitleFormat] = &[SubtitleFormat::Srt, SubtitleFormat::Vtt, SubtitleFormat::Txt];

    pub fn extension(self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
            SubtitleFormat::Txt => "txt",
        }
    }

    /// File name used when the document is written to a run directory.
    pub fn file_name(self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "subtitles.srt",
            SubtitleFormat::Vtt => "subtitles.vtt",
            SubtitleFormat::Txt => "transcript.txt",
        }
    }
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubtitleFormat::Srt => write!(f, "SRT"),
            SubtitleFormat::Vtt => write!(f, "VTT"),
            SubtitleFormat::Txt => write!(f, "TXT"),
        }
    }
}

/// A rendered subtitle file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleDocument {
    pub format: SubtitleFormat,
    pub content: String,
}

impl SubtitleDocument {
    pub fn new(format: SubtitleFormat, content: String) -> Self {
        Self { format, content }
    }
}
