use std::fmt;
use std::str::FromStr;

use crate::errors::ConversionError;

// @module: Time code parsing and WebVTT timestamp rendering

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// A non-negative point in time, held as whole milliseconds.
///
/// TRS files store times as fractional seconds (`"12.345"`). Parsing rounds
/// the value to whole microseconds and then truncates it to milliseconds, so
/// the rendered form is always `HH:MM:SS.mmm` with exactly three fractional
/// digits. Hours are zero-padded to two digits and grow past that for long
/// recordings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp {
    millis: u64,
}

impl Timestamp {
    /// Create a timestamp from a millisecond count
    pub fn from_millis(millis: u64) -> Self {
        Timestamp { millis }
    }

    /// Milliseconds since the start of the recording
    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Render `"<self> --> <end>"`
    pub fn range(&self, end: &Timestamp) -> String {
        format!("{} --> {}", self, end)
    }
}

impl FromStr for Timestamp {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds: f64 = s
            .trim()
            .parse()
            .map_err(|_| ConversionError::Format(s.to_string()))?;

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(ConversionError::Format(s.to_string()));
        }

        let micros = (seconds * 1_000_000.0).round();
        if micros >= u64::MAX as f64 {
            return Err(ConversionError::Format(s.to_string()));
        }

        Ok(Timestamp {
            millis: micros as u64 / 1_000,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hours = self.millis / MS_PER_HOUR;
        let minutes = (self.millis % MS_PER_HOUR) / MS_PER_MINUTE;
        let seconds = (self.millis % MS_PER_MINUTE) / MS_PER_SECOND;
        let millis = self.millis % MS_PER_SECOND;

        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

/// Convert a seconds time code (`ssss[.sss]`) into `HH:MM:SS.mmm`
pub fn format_time(time: &str) -> Result<String, ConversionError> {
    Ok(time.parse::<Timestamp>()?.to_string())
}

/// Generate a WebVTT cue timing line `HH:MM:SS.mmm --> HH:MM:SS.mmm`
pub fn generate_timestamp(start_time: &str, end_time: &str) -> Result<String, ConversionError> {
    let start: Timestamp = start_time.parse()?;
    let end: Timestamp = end_time.parse()?;
    Ok(start.range(&end))
}
