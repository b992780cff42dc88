pub mod decoding_options;
pub mod segment;
pub mod transcript;
pub mod transcription_engine;
