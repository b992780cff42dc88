pub mod duration_policy;
pub mod pipeline_logger;
pub mod run_outcome;
pub mod run_stage;
pub mod transcribe_use_case;
pub mod transcription_bundle;
