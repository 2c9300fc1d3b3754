//! Formatting and parsing of video running times.
//!
//! Durations are stored as display strings (`mm:ss` below one hour,
//! `hh:mm:ss` at or above) because that is what the record shows verbatim
//! in every surface.  The parser inverts the format so the admin list can
//! sort on the numeric value instead of the lexicographic string.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DurationError {
    #[error("Invalid duration string: {0:?}")]
    Invalid(String),
}

/// Format a number of seconds as `mm:ss`, or `hh:mm:ss` from one hour up.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Parse a `mm:ss` or `hh:mm:ss` string back into seconds.
pub fn parse_duration(s: &str) -> Result<u64, DurationError> {
    let invalid = || DurationError::Invalid(s.to_string());

    let parts: Vec<&str> = s.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    for part in &parts {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u64 = part.parse().map_err(|_| invalid())?;
        total = total * 60 + value;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_below_one_hour() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(59), "00:59");
        assert_eq!(format_duration(754), "12:34");
        assert_eq!(format_duration(3599), "59:59");
    }

    #[test]
    fn formats_from_one_hour() {
        assert_eq!(format_duration(3600), "01:00:00");
        assert_eq!(format_duration(3600 + 754), "01:12:34");
    }

    #[test]
    fn parse_inverts_format() {
        for secs in [0, 59, 754, 3599, 3600, 3600 * 5 + 17] {
            assert_eq!(parse_duration(&format_duration(secs)), Ok(secs));
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        for s in ["", "12", "a:b", "1:2:3:4", "12:"] {
            assert!(parse_duration(s).is_err(), "{s:?} should not parse");
        }
    }
}
