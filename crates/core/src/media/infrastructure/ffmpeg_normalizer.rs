use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::media::domain::audio_normalizer::{
    AudioNormalizer, NormalizationProfile, TranscodeError,
};
use crate::media::infrastructure::process_runner::{run_with_deadline, RunError};

/// Transcodes any ffmpeg-readable input to the normalization profile by
/// running the `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct FfmpegNormalizer {
    binary: PathBuf,
    profile: NormalizationProfile,
    timeout: Option<Duration>,
}

impl FfmpegNormalizer {
    pub fn new(binary: impl Into<PathBuf>, profile: NormalizationProfile) -> Self {
        Self {
            binary: binary.into(),
            profile,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn profile(&self) -> &NormalizationProfile {
        &self.profile
    }

    fn tool_name(&self) -> String {
        self.binary.display().to_string()
    }

    fn args(&self, source: &Path, dest: &Path) -> Vec<OsString> {
        let p = &self.profile;
        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-nostdin".into(),
            "-hide_banner".into(),
            "-i".into(),
            source.into(),
            // Drop video and every container/stream tag.
            "-vn".into(),
            "-map_metadata".into(),
            "-1".into(),
            "-ac".into(),
            p.channels.to_string().into(),
            "-c:a".into(),
            p.codec.as_str().into(),
            "-b:a".into(),
            format!("{}k", p.bitrate_kbps).into(),
        ];
        if let Some(app) = &p.application {
            args.push("-application".into());
            args.push(app.as_str().into());
        }
        args.push(dest.into());
        args
    }
}

impl Default for FfmpegNormalizer {
    fn default() -> Self {
        Self::new("ffmpeg", NormalizationProfile::default())
    }
}

impl AudioNormalizer for FfmpegNormalizer {
    fn normalize(&self, source: &Path, dest: &Path) -> Result<(), TranscodeError> {
        log::info!("Normalizing {} -> {}", source.display(), dest.display());

        let mut cmd = Command::new(&self.binary);
        cmd.args(self.args(source, dest));

        let output = run_with_deadline(&mut cmd, self.timeout).map_err(|e| match e {
            RunError::Spawn(source) | RunError::Wait(source) => TranscodeError::Spawn {
                tool: self.tool_name(),
                source,
            },
            RunError::Timeout(limit) => TranscodeError::Timeout {
                tool: self.tool_name(),
                secs: limit.as_secs(),
            },
        })?;

        if !output.success() {
            return Err(TranscodeError::Failed {
                tool: self.tool_name(),
                code: output.code(),
                stderr: output.stderr_tail(),
            });
        }

        // A zero exit with an empty file still means nothing usable reached
        // the model.
        let written = std::fs::metadata(dest).map(|m| m.len()).unwrap_or(0);
        if written == 0 {
            return Err(TranscodeError::MissingOutput(dest.to_path_buf()));
        }

        log::debug!("Normalized audio: {written} bytes");
        Ok(())
    }
}
