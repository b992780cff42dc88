pub mod srt;
pub mod subtitle_document;
pub mod subtitle_writer;
pub mod timestamp;
pub mod txt;
pub mod vtt;
