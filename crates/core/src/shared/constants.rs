pub const WHISPER_MODEL_NAME: &str = "ggml-large-v3.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-large-v3.bin";
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Longest accepted source, in seconds (90 minutes).
pub const DEFAULT_MAX_DURATION_SECS: f64 = 5400.0;

pub const AUDIO_EXTENSIONS: &[&str] = &["m4a", "mp3", "ogg", "wav", "aac", "flac"];

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_BEAM_SIZE: u32 = 5;

pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TRANSCODE_TIMEOUT_SECS: u64 = 600;

pub const APP_DIR_NAME: &str = "Scribe";
