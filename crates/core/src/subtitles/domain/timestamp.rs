//! `HH:MM:SS<sep>mmm` formatting shared by every subtitle format.

pub const SRT_SEPARATOR: char = ',';
pub const VTT_SEPARATOR: char = '.';

/// Relative tolerance for binary representation error: 1.001 s scales to
/// 1000.9999… ms and must still format as `.001`, while 1.9999999995 s must
/// stay at `.999`.
const REPRESENTATION_ULPS: f64 = 4.0 * f64::EPSILON;

/// Formats `seconds` as `HH:MM:SS<sep>mmm`.
///
/// Fractions beyond the millisecond are truncated, never rounded, so a value
/// can't roll over into the next second. Hours grow past two digits as
/// needed. Negative and NaN inputs format as zero.
pub fn format_timestamp(seconds: f64, separator: char) -> String {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        let ms = seconds * 1000.0;
        (ms + ms * REPRESENTATION_ULPS).floor() as u64
    } else {
        0
    };

    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    format!("{hours:02}:{minutes:02}:{secs:02}{separator}{millis:03}")
}

pub fn srt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds, SRT_SEPARATOR)
}

pub fn vtt_timestamp(seconds: f64) -> String {
    format_timestamp(seconds, VTT_SEPARATOR)
}
