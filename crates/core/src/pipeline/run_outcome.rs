use std::path::PathBuf;

use thiserror::Error;

use super::duration_policy::PolicyRejection;
use super::transcription_bundle::TranscriptionBundle;
use crate::media::domain::audio_normalizer::TranscodeError;
use crate::media::domain::media_prober::ProbeError;
use crate::transcription::domain::transcription_engine::InferenceError;

/// Failures that end a run. None of them leave partial artifacts behind.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),
    #[error("unsupported input type {extension:?} for {path}")]
    UnsupportedInput {
        path: PathBuf,
        extension: Option<String>,
    },
    #[error("probe failed: {0}")]
    Probe(#[from] ProbeError),
    #[error("failed to create run workspace: {0}")]
    Workspace(#[source] std::io::Error),
    #[error("normalization failed: {0}")]
    Transcode(#[from] TranscodeError),
    #[error("transcription failed: {0}")]
    Inference(#[from] InferenceError),
}

impl PipelineError {
    /// Short message fit for an end user; details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::MissingInput(_) => "No audio file uploaded.".to_string(),
            PipelineError::UnsupportedInput { extension, .. } => match extension {
                Some(ext) => format!("Unsupported file type '.{ext}'. Please upload an audio file."),
                None => "Unsupported file type. Please upload an audio file.".to_string(),
            },
            PipelineError::Probe(_) => "The uploaded file could not be read as audio.".to_string(),
            PipelineError::Workspace(_) => "Temporary storage is unavailable. Please try again.".to_string(),
            PipelineError::Transcode(_) => "The uploaded audio could not be converted.".to_string(),
            PipelineError::Inference(InferenceError::Timeout(_)) => {
                "Transcription took too long and was stopped.".to_string()
            }
            PipelineError::Inference(_) => "Transcription failed.".to_string(),
        }
    }
}

/// Terminal result of one run.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(TranscriptionBundle),
    Rejected(PolicyRejection),
    Failed(PipelineError),
}

impl RunOutcome {
    /// Human-readable status for rejected or failed runs.
    pub fn message(&self) -> Option<String> {
        match self {
            RunOutcome::Completed(_) => None,
            RunOutcome::Rejected(rejection) => Some(rejection.to_string()),
            RunOutcome::Failed(err) => Some(err.user_message()),
        }
    }

    pub fn bundle(&self) -> Option<&TranscriptionBundle> {
        match self {
            RunOutcome::Completed(bundle) => Some(bundle),
            _ => None,
        }
    }

    pub fn into_bundle(self) -> Option<TranscriptionBundle> {
        match self {
            RunOutcome::Completed(bundle) => Some(bundle),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}
