use std::collections::HashMap;
use std::time::Instant;

use super::run_stage::RunStage;

/// Cross-cutting logger for pipeline orchestration events.
///
/// Keeps the use case independent of where progress ends up (log output,
/// a UI, nothing at all in tests).
pub trait PipelineLogger: Send {
    /// The run has entered `stage`.
    fn stage(&mut self, stage: RunStage);

    /// Record how long a named pipeline step took.
    fn timing(&mut self, step: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. source duration, segment count).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn stage(&mut self, _stage: RunStage) {}
    fn timing(&mut self, _step: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger backed by the `log` crate that also keeps step timings and
/// metrics for an end-of-run summary.
pub struct LogPipelineLogger {
    timings: HashMap<String, f64>,
    metrics: HashMap<String, f64>,
    stages: Vec<RunStage>,
    start_time: Instant,
}

impl LogPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            stages: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Stages visited so far, in order.
    pub fn stages(&self) -> &[RunStage] {
        &self.stages
    }

    pub fn timing_for(&self, step: &str) -> Option<f64> {
        self.timings.get(step).copied()
    }

    pub fn metric_for(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    /// Returns the formatted summary string, or `None` if nothing ran.
    pub fn summary_string(&self) -> Option<String> {
        let last = self.stages.last()?;
        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;

        let mut lines = vec![format!(
            "Run summary ({last}, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut steps: Vec<_> = self.timings.iter().collect();
        steps.sort_by(|a, b| a.0.cmp(b.0));
        for (step, ms) in steps {
            let pct = if elapsed_ms > 0.0 {
                ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {step:12}: {ms:9.0}ms  ({pct:4.1}%)"));
        }

        let mut names: Vec<_> = self.metrics.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in names {
            lines.push(format!("  {name}: {value:.1}"));
        }

        if let (Some(audio), Some(infer)) = (
            self.metrics.get("source_duration_secs"),
            self.timings.get("transcribe"),
        ) {
            if *infer > 0.0 {
                let speed = audio / (infer / 1000.0);
                lines.push(format!("  Speed: {speed:.2}x realtime"));
            }
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn stage(&mut self, stage: RunStage) {
        log::debug!("Stage: {stage}");
        self.stages.push(stage);
    }

    fn timing(&mut self, step: &str, duration_ms: f64) {
        *self.timings.entry(step.to_string()).or_default() += duration_ms;
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.insert(name.to_string(), value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
