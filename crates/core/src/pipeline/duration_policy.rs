use std::fmt;

/// Upper bound on source duration, checked before any transcoding or
/// inference. The rejection message is derived from the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationPolicy {
    max_duration_secs: f64,
}

/// A source was longer than the policy allows. This is a normal outcome of
/// a run, not a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRejection {
    pub duration_secs: f64,
    pub max_duration_secs: f64,
}

impl DurationPolicy {
    pub fn new(max_duration_secs: f64) -> Self {
        Self { max_duration_secs }
    }

    pub fn max_duration_secs(&self) -> f64 {
        self.max_duration_secs
    }

    /// Rejects durations strictly above the ceiling; the ceiling itself passes.
    pub fn check(&self, duration_secs: f64) -> Result<(), PolicyRejection> {
        if duration_secs > self.max_duration_secs {
            return Err(PolicyRejection {
                duration_secs,
                max_duration_secs: self.max_duration_secs,
            });
        }
        Ok(())
    }
}

impl fmt::Display for PolicyRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Audio file is too long. Please upload a file that is less than {} long.",
            describe_limit(self.max_duration_secs)
        )
    }
}

fn describe_limit(secs: f64) -> String {
    if secs < 60.0 {
        return plural(secs, "second");
    }
    let minutes = secs / 60.0;
    if minutes.fract() == 0.0 {
        plural(minutes, "minute")
    } else {
        format!("{minutes:.1} minutes")
    }
}

fn plural(value: f64, unit: &str) -> String {
    if value == 1.0 {
        format!("1 {unit}")
    } else {
        format!("{value} {unit}s")
    }
}
