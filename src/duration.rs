//! Compact duration strings (`"1h30m"`, `"45s"`) and `HH:MM:SS` times of day.

use chrono::{NaiveTime, TimeDelta, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<hours>[0-9]+)h)?(?:(?P<minutes>[0-9]+)m)?(?:(?P<seconds>[0-9]+)s)?$")
        .expect("duration pattern is valid")
});

pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid duration {0:?}: expected e.g. \"1h30m\", \"45s\"")]
    Duration(String),

    #[error("duration {0:?} is too large")]
    DurationOverflow(String),

    #[error("invalid time of day {0:?}: expected HH:MM:SS")]
    TimeOfDay(String),
}

/// Parse `<h>h<m>m<s>s` with every segment optional but kept in that order.
///
/// The whole input must match; the empty string is rejected.
pub fn parse_duration(input: &str) -> Result<TimeDelta, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Duration(input.to_owned()));
    }

    let caps = DURATION_RE
        .captures(input)
        .ok_or_else(|| ParseError::Duration(input.to_owned()))?;

    let overflow = || ParseError::DurationOverflow(input.to_owned());
    let segment = |name: &str| -> Result<i64, ParseError> {
        caps.name(name)
            .map(|m| m.as_str().parse::<i64>().map_err(|_| overflow()))
            .unwrap_or(Ok(0))
    };

    let hours = segment("hours")?;
    let minutes = segment("minutes")?;
    let seconds = segment("seconds")?;

    let secs = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60)?.checked_add(h))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(overflow)?;

    TimeDelta::try_seconds(secs).ok_or_else(overflow)
}

/// Parse a strict 24-hour `HH:MM:SS` time of day.
///
/// Only the canonical zero-padded form is accepted, so a stored value always
/// compares equal to [`format_time_of_day`] of the same time. Leap seconds
/// are rejected.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ParseError> {
    let invalid = || ParseError::TimeOfDay(input.to_owned());
    let time = NaiveTime::parse_from_str(input, TIME_OF_DAY_FORMAT).map_err(|_| invalid())?;

    if time.nanosecond() >= 1_000_000_000 || format_time_of_day(time) != input {
        return Err(invalid());
    }
    Ok(time)
}

pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_OF_DAY_FORMAT).to_string()
}
