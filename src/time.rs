//! # Clock Time Model
//!
//! [`TimeValue`] is the instant a clock displays: hours and minutes, seconds,
//! or all three. Fields that a clock does not show are `None`, so a legal
//! value can never be mistaken for "absent" during rollover arithmetic.
//!
//! ## Fixed-Width Formatting
//! The animation engine compares the current and next strings character by
//! character, so every value of a given shape formats to the same length
//! with punctuation at the same indices:
//!
//! | fields           | format       | example      |
//! |------------------|--------------|--------------|
//! | hour, minute, second | `{:>2}:{:02}:{:02}` | ` 9:05:07` |
//! | hour, minute     | `{:>2}:{:02}` | `12:59`     |
//! | second           | `{:02}`       | `07`        |
//!
//! ## Hour Cycles
//! In 12-hour mode hours run `1..=12` and hour 0 of a wall clock displays as
//! 12. In 24-hour mode hours run `0..=23`.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Hour numbering used when formatting and stepping a [`TimeValue`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourCycle {
    /// Hours `1..=12`
    #[default]
    Twelve,
    /// Hours `0..=23`
    TwentyFour,
}

impl HourCycle {
    pub fn from_24_hour(is_24_hour: bool) -> Self {
        if is_24_hour {
            HourCycle::TwentyFour
        } else {
            HourCycle::Twelve
        }
    }

    fn valid_hour(self, hour: u8) -> bool {
        match self {
            HourCycle::Twelve => (1..=12).contains(&hour),
            HourCycle::TwentyFour => hour < 24,
        }
    }

    fn next_hour(self, hour: u8) -> u8 {
        match self {
            HourCycle::Twelve => hour % 12 + 1,
            HourCycle::TwentyFour => (hour + 1) % 24,
        }
    }

    fn previous_hour(self, hour: u8) -> u8 {
        match self {
            HourCycle::Twelve => (hour + 10) % 12 + 1,
            HourCycle::TwentyFour => (hour + 23) % 24,
        }
    }

    /// Converts a wall-clock hour (`0..=23`) into this cycle's numbering.
    fn display_hour(self, hour24: u32) -> u8 {
        let hour24 = (hour24 % 24) as u8;
        match self {
            HourCycle::Twelve => match hour24 % 12 {
                0 => 12,
                h => h,
            },
            HourCycle::TwentyFour => hour24,
        }
    }
}

/// Rejected field combinations for [`TimeValue::try_new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeError {
    #[error("time value has neither hour:minute nor seconds")]
    Empty,

    #[error("hour and minute must be present together")]
    SplitHourMinute,

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u8 },
}

/// Which wall-clock boundary [`until_next_boundary`] targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Second,
    Minute,
}

/// An instant as displayed by one clock.
///
/// Values are immutable. [`next`](Self::next), [`previous`](Self::previous)
/// and the `remove_*` operations return new values.
///
/// # Example
/// ```
/// use form_clock_lib::time::{HourCycle, TimeValue};
///
/// let t = TimeValue::hms(12, 59, 59, HourCycle::Twelve);
/// assert_eq!(t.next().format_string(), " 1:00:00");
/// assert_eq!(t.remove_hours_minutes().format_string(), "59");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeValue {
    hour: Option<u8>,
    minute: Option<u8>,
    second: Option<u8>,
    cycle: HourCycle,
}

impl TimeValue {
    /// Builds a value, rejecting empty, split or out-of-range field sets.
    pub fn try_new(
        hour: Option<u8>,
        minute: Option<u8>,
        second: Option<u8>,
        cycle: HourCycle,
    ) -> Result<Self, TimeError> {
        match (hour, minute, second) {
            (None, None, None) => return Err(TimeError::Empty),
            (Some(_), None, _) | (None, Some(_), _) => return Err(TimeError::SplitHourMinute),
            _ => {}
        }
        if let Some(h) = hour {
            if !cycle.valid_hour(h) {
                return Err(TimeError::OutOfRange {
                    field: "hour",
                    value: h,
                });
            }
        }
        if let Some(m) = minute.filter(|m| *m > 59) {
            return Err(TimeError::OutOfRange {
                field: "minute",
                value: m,
            });
        }
        if let Some(s) = second.filter(|s| *s > 59) {
            return Err(TimeError::OutOfRange {
                field: "second",
                value: s,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
            cycle,
        })
    }

    /// Fail-fast constructor for values the caller knows to be well formed.
    ///
    /// # Panics
    /// Panics when [`try_new`](Self::try_new) would return an error.
    fn checked(hour: Option<u8>, minute: Option<u8>, second: Option<u8>, cycle: HourCycle) -> Self {
        match Self::try_new(hour, minute, second, cycle) {
            Ok(value) => value,
            Err(e) => panic!("invalid clock time: {e}"),
        }
    }

    /// Hours, minutes and seconds.
    ///
    /// # Panics
    /// Panics if a field is out of range for `cycle`.
    pub fn hms(hour: u8, minute: u8, second: u8, cycle: HourCycle) -> Self {
        Self::checked(Some(hour), Some(minute), Some(second), cycle)
    }

    /// Hours and minutes only.
    ///
    /// # Panics
    /// Panics if a field is out of range for `cycle`.
    pub fn hour_minute(hour: u8, minute: u8, cycle: HourCycle) -> Self {
        Self::checked(Some(hour), Some(minute), None, cycle)
    }

    /// Seconds only.
    ///
    /// # Panics
    /// Panics if `second > 59`.
    pub fn seconds_only(second: u8) -> Self {
        Self::checked(None, None, Some(second), HourCycle::default())
    }

    /// Samples hours, minutes and seconds from a wall-clock time.
    pub fn from_time<T: Timelike>(time: &T, cycle: HourCycle) -> Self {
        Self {
            hour: Some(cycle.display_hour(time.hour())),
            minute: Some((time.minute() % 60) as u8),
            second: Some((time.second() % 60) as u8),
            cycle,
        }
    }

    pub fn hour(&self) -> Option<u8> {
        self.hour
    }

    pub fn minute(&self) -> Option<u8> {
        self.minute
    }

    pub fn second(&self) -> Option<u8> {
        self.second
    }

    pub fn cycle(&self) -> HourCycle {
        self.cycle
    }

    pub fn has_hour_minute(&self) -> bool {
        self.hour.is_some()
    }

    pub fn has_seconds(&self) -> bool {
        self.second.is_some()
    }

    /// The value one step later at the finest present field.
    pub fn next(&self) -> Self {
        let mut value = *self;
        if let Some(s) = value.second {
            if s < 59 {
                value.second = Some(s + 1);
                return value;
            }
            value.second = Some(0);
        }
        if let (Some(h), Some(m)) = (value.hour, value.minute) {
            if m < 59 {
                value.minute = Some(m + 1);
            } else {
                value.minute = Some(0);
                value.hour = Some(value.cycle.next_hour(h));
            }
        }
        value
    }

    /// The value one step earlier at the finest present field.
    pub fn previous(&self) -> Self {
        let mut value = *self;
        if let Some(s) = value.second {
            if s > 0 {
                value.second = Some(s - 1);
                return value;
            }
            value.second = Some(59);
        }
        if let (Some(h), Some(m)) = (value.hour, value.minute) {
            if m > 0 {
                value.minute = Some(m - 1);
            } else {
                value.minute = Some(59);
                value.hour = Some(value.cycle.previous_hour(h));
            }
        }
        value
    }

    /// Drops the seconds field.
    ///
    /// # Panics
    /// Panics if the value has no hour:minute fields.
    pub fn remove_seconds(&self) -> Self {
        Self::checked(self.hour, self.minute, None, self.cycle)
    }

    /// Drops the hour and minute fields.
    ///
    /// # Panics
    /// Panics if the value has no seconds field.
    pub fn remove_hours_minutes(&self) -> Self {
        Self::checked(None, None, self.second, self.cycle)
    }

    /// The same value renumbered for `cycle`.
    ///
    /// A 12-hour value carries no AM/PM, so converting to 24-hour numbering
    /// reads it as a morning hour: 12 becomes 0.
    pub fn with_cycle(&self, cycle: HourCycle) -> Self {
        let hour = self.hour.map(|h| match (self.cycle, cycle) {
            (HourCycle::Twelve, HourCycle::TwentyFour) => h % 12,
            _ => cycle.display_hour(u32::from(h)),
        });
        Self {
            hour,
            cycle,
            ..*self
        }
    }

    /// Fixed-width display string.
    pub fn format_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hour, self.minute, self.second) {
            (Some(h), Some(m), Some(s)) => write!(f, "{h:>2}:{m:02}:{s:02}"),
            (Some(h), Some(m), None) => write!(f, "{h:>2}:{m:02}"),
            (_, _, Some(s)) => write!(f, "{s:02}"),
            // unreachable through the validating constructors
            _ => Ok(()),
        }
    }
}

/// Time remaining from `now` until the next whole second or minute.
pub fn until_next_boundary<T: Timelike>(now: &T, boundary: Boundary) -> Duration {
    let nanos = now.nanosecond().min(999_999_999);
    let to_second = Duration::from_nanos(u64::from(1_000_000_000 - nanos));
    match boundary {
        Boundary::Second => to_second,
        Boundary::Minute => {
            let whole = 59u64.saturating_sub(u64::from(now.second().min(59)));
            to_second + Duration::from_secs(whole)
        }
    }
}
