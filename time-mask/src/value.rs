//! The `HH:MM` time value and its arithmetic.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::warn;

const HOUR_MAX: u8 = 12;
const MINUTE_MAX: u8 = 59;

/// Error returned when field text does not match the `HH:MM` wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// The text is not five characters of `HH:MM` with a colon at index 2.
    #[error("expected five characters in the form HH:MM, got {0:?}")]
    Malformed(String),
    /// The hour part parsed but is above 12.
    #[error("hour {0} is outside 00-12")]
    HourOutOfRange(u8),
    /// The minute part parsed but is above 59.
    #[error("minute {0} is outside 00-59")]
    MinuteOutOfRange(u8),
}

/// A 12-hour clock time as displayed by the masked field.
///
/// The committed range is hours 1-12 and minutes 0-59. An hour of 0 is
/// representable because the field shows `00` transiently while the user is
/// typing; the validation pass rewrites it to `01` on blur or segment jump.
///
/// The wire format is exactly five ASCII characters, `"HH:MM"`, both parts
/// zero-padded, produced by [`fmt::Display`] and accepted by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeValue {
    hour: u8,
    minute: u8,
}

impl TimeValue {
    /// Creates a value, clamping the hour to 0-12 and the minute to 0-59.
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour.min(HOUR_MAX),
            minute: minute.min(MINUTE_MAX),
        }
    }

    /// Returns the hour (0-12; 0 only before validation has run).
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Sets the hour, clamped to 0-12.
    pub fn set_hour(&mut self, hour: u8) {
        self.hour = hour.min(HOUR_MAX);
    }

    /// Sets the minute, clamped to 0-59.
    pub fn set_minute(&mut self, minute: u8) {
        self.minute = minute.min(MINUTE_MAX);
    }

    /// Best-effort recovery of a value from arbitrary field text.
    ///
    /// Salvages numeric hour and minute parts when present, clamping them
    /// into range (a transient `00` hour is kept so validation can still fix
    /// it), and falls back to [`TimeValue::default`] for parts that cannot
    /// be read at all.
    pub fn recover(text: &str) -> Self {
        if let Ok(value) = text.parse() {
            return value;
        }
        let fallback = Self::default();
        let mut parts = text.splitn(2, ':');
        let hour = parts
            .next()
            .and_then(|part| part.trim().parse::<u8>().ok())
            .map_or(fallback.hour, |hour| hour.min(HOUR_MAX));
        let minute = parts
            .next()
            .and_then(|part| part.trim().parse::<u8>().ok())
            .map_or(fallback.minute, |minute| minute.min(MINUTE_MAX));
        let value = Self { hour, minute };
        warn!(text = %text, recovered = %value, "field text did not match HH:MM");
        value
    }

    /// Steps the hour by `delta`, wrapping within 1-12.
    ///
    /// A result below zero wraps to 12, a result above 12 wraps to 1, and a
    /// result of exactly zero lands on 12 (stepping down from `01` reads
    /// `12`, never `00`).
    pub fn step_hour(&mut self, delta: i8) {
        let stepped = i16::from(self.hour) + i16::from(delta);
        self.hour = if stepped < 0 {
            HOUR_MAX
        } else if stepped > i16::from(HOUR_MAX) {
            1
        } else if stepped == 0 {
            HOUR_MAX
        } else {
            stepped as u8
        };
    }

    /// Steps the minute by `delta`, wrapping within 0-59.
    pub fn step_minute(&mut self, delta: i8) {
        let stepped = i16::from(self.minute) + i16::from(delta);
        self.minute = if stepped < 0 {
            MINUTE_MAX
        } else if stepped > i16::from(MINUTE_MAX) {
            0
        } else {
            stepped as u8
        };
    }

    /// Rewrites a transient `00` hour to `01`.
    ///
    /// Returns `true` when the value changed. Minutes are never touched.
    pub fn normalize_hour(&mut self) -> bool {
        if self.hour == 0 {
            self.hour = 1;
            true
        } else {
            false
        }
    }
}

impl Default for TimeValue {
    /// Noon, `"12:00"` — the base time used when field text is unreadable.
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 0,
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeValue {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(TimeParseError::Malformed(s.to_owned()));
        }
        let hour = two_digits(bytes[0], bytes[1])
            .ok_or_else(|| TimeParseError::Malformed(s.to_owned()))?;
        let minute = two_digits(bytes[3], bytes[4])
            .ok_or_else(|| TimeParseError::Malformed(s.to_owned()))?;
        if hour > HOUR_MAX {
            return Err(TimeParseError::HourOutOfRange(hour));
        }
        if minute > MINUTE_MAX {
            return Err(TimeParseError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }
}

fn two_digits(tens: u8, ones: u8) -> Option<u8> {
    if tens.is_ascii_digit() && ones.is_ascii_digit() {
        Some((tens - b'0') * 10 + (ones - b'0'))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_pads() {
        assert_eq!(TimeValue::new(5, 7).to_string(), "05:07");
        assert_eq!(TimeValue::new(12, 59).to_string(), "12:59");
        assert_eq!(TimeValue::new(0, 45).to_string(), "00:45");
    }

    #[test]
    fn test_parse_round_trip() {
        let value: TimeValue = "09:30".parse().expect("well-formed");
        assert_eq!(value.hour(), 9);
        assert_eq!(value.minute(), 30);
        assert_eq!(value.to_string(), "09:30");
    }

    #[test]
    fn test_parse_accepts_transient_zero_hour() {
        let value: TimeValue = "00:45".parse().expect("transient zero hour");
        assert_eq!(value.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        assert_eq!(
            "9:30".parse::<TimeValue>(),
            Err(TimeParseError::Malformed("9:30".to_owned()))
        );
        assert_eq!(
            "09-30".parse::<TimeValue>(),
            Err(TimeParseError::Malformed("09-30".to_owned()))
        );
        assert_eq!(
            "ab:cd".parse::<TimeValue>(),
            Err(TimeParseError::Malformed("ab:cd".to_owned()))
        );
        assert_eq!(
            "".parse::<TimeValue>(),
            Err(TimeParseError::Malformed(String::new()))
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range_parts() {
        assert_eq!(
            "13:00".parse::<TimeValue>(),
            Err(TimeParseError::HourOutOfRange(13))
        );
        assert_eq!(
            "10:60".parse::<TimeValue>(),
            Err(TimeParseError::MinuteOutOfRange(60))
        );
    }

    #[test]
    fn test_new_clamps() {
        let value = TimeValue::new(30, 90);
        assert_eq!(value.hour(), 12);
        assert_eq!(value.minute(), 59);
    }

    #[test]
    fn test_step_hour_wraps() {
        let mut value = TimeValue::new(12, 0);
        value.step_hour(1);
        assert_eq!(value.hour(), 1);

        let mut value = TimeValue::new(1, 0);
        value.step_hour(-1);
        assert_eq!(value.hour(), 12);

        let mut value = TimeValue::new(5, 0);
        value.step_hour(-1);
        assert_eq!(value.hour(), 4);
    }

    #[test]
    fn test_step_hour_from_transient_zero() {
        let mut value = TimeValue::new(0, 30);
        value.step_hour(1);
        assert_eq!(value.hour(), 1);

        let mut value = TimeValue::new(0, 30);
        value.step_hour(-1);
        assert_eq!(value.hour(), 12);
    }

    #[test]
    fn test_step_minute_wraps() {
        let mut value = TimeValue::new(7, 59);
        value.step_minute(1);
        assert_eq!(value.minute(), 0);

        let mut value = TimeValue::new(7, 0);
        value.step_minute(-1);
        assert_eq!(value.minute(), 59);
    }

    #[test]
    fn test_recover_salvages_numeric_parts() {
        assert_eq!(TimeValue::recover("7:5"), TimeValue::new(7, 5));
        assert_eq!(TimeValue::recover("25:70"), TimeValue::new(12, 59));
        assert_eq!(TimeValue::recover("00:45").to_string(), "00:45");
    }

    #[test]
    fn test_recover_falls_back_to_default() {
        assert_eq!(TimeValue::recover(""), TimeValue::default());
        assert_eq!(TimeValue::recover("garbage"), TimeValue::default());
        assert_eq!(TimeValue::recover("::"), TimeValue::default());
    }

    #[test]
    fn test_recover_mixes_salvage_and_fallback() {
        let value = TimeValue::recover("08:xx");
        assert_eq!(value.hour(), 8);
        assert_eq!(value.minute(), TimeValue::default().minute());
    }

    #[test]
    fn test_normalize_hour() {
        let mut value = TimeValue::new(0, 45);
        assert!(value.normalize_hour());
        assert_eq!(value.to_string(), "01:45");
        assert!(!value.normalize_hour());

        let mut value = TimeValue::new(7, 45);
        assert!(!value.normalize_hour());
        assert_eq!(value.to_string(), "07:45");
    }
}
