use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use serde::Deserialize;

use crate::media::domain::media_prober::{MediaProber, ProbeError};
use crate::media::infrastructure::process_runner::{run_with_deadline, RunError};

/// Reads the container duration with `ffprobe -show_format`.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    binary: PathBuf,
    timeout: Option<Duration>,
}

#[derive(Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Deserialize)]
struct ProbeFormat {
    // ffprobe prints numbers as strings ("12.345000"), or "N/A".
    duration: Option<String>,
}

impl FfprobeProber {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn tool_name(&self) -> String {
        self.binary.display().to_string()
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(path);
        cmd
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl MediaProber for FfprobeProber {
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError> {
        if !path.is_file() {
            return Err(ProbeError::NotFound(path.to_path_buf()));
        }

        let output = run_with_deadline(&mut self.command(path), self.timeout).map_err(|e| match e {
            RunError::Spawn(source) | RunError::Wait(source) => ProbeError::Spawn {
                tool: self.tool_name(),
                source,
            },
            RunError::Timeout(limit) => ProbeError::Timeout {
                tool: self.tool_name(),
                secs: limit.as_secs(),
            },
        })?;

        if !output.success() {
            return Err(ProbeError::Failed {
                tool: self.tool_name(),
                code: output.code(),
                stderr: output.stderr_tail(),
            });
        }

        let duration = parse_duration(&output.stdout)?;
        log::debug!("Probed {}: {duration:.3}s", path.display());
        Ok(duration)
    }
}

fn parse_duration(stdout: &[u8]) -> Result<f64, ProbeError> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout)?;
    parsed
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or(ProbeError::MissingDuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_duration_from_string_field() {
        let json = br#"{ "format": { "filename": "a.mp3", "duration": "3661.500000" } }"#;
        assert_relative_eq!(parse_duration(json).unwrap(), 3661.5);
    }

    #[test]
    fn test_parse_duration_not_available() {
        let json = br#"{ "format": { "duration": "N/A" } }"#;
        assert!(matches!(parse_duration(json), Err(ProbeError::MissingDuration)));
    }

    #[test]
    fn test_parse_duration_missing_format() {
        // ffprobe -v quiet prints an empty object for unrecognized input
        assert!(matches!(parse_duration(b"{}"), Err(ProbeError::MissingDuration)));
    }

    #[test]
    fn test_parse_duration_garbage() {
        assert!(matches!(parse_duration(b"not json"), Err(ProbeError::Parse(_))));
    }

    #[test]
    fn test_parse_duration_rejects_negative() {
        let json = br#"{ "format": { "duration": "-1.0" } }"#;
        assert!(parse_duration(json).is_err());
    }

    #[test]
    fn test_missing_input_file() {
        let prober = FfprobeProber::default();
        let err = prober
            .probe_duration(Path::new("/nonexistent/input.mp3"))
            .unwrap_err();
        assert!(matches!(err, ProbeError::NotFound(_)));
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let input = NamedTempFile::new().unwrap();
        let prober = FfprobeProber::new("/nonexistent/ffprobe-xyz");
        let err = prober.probe_duration(input.path()).unwrap_err();
        assert!(matches!(err, ProbeError::Spawn { .. }));
    }

    #[test]
    fn test_command_passes_path_as_single_argument() {
        let prober = FfprobeProber::default();
        let path = Path::new("/tmp/my \"talk\"; echo.mp3");
        let cmd = prober.command(path);
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args.last().copied(), Some(path.as_os_str()));
        assert!(args.contains(&std::ffi::OsStr::new("-show_format")));
    }

    #[test]
    #[ignore] // Requires ffprobe on PATH
    fn test_unrecognized_container_fails() {
        let mut input = NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut input, b"definitely not media").unwrap();
        let result = FfprobeProber::default().probe_duration(input.path());
        assert!(result.is_err());
    }
}
