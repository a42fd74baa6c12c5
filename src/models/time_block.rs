//! Weekday and weekly time block models.
//!
//! A time block is one indivisible class meeting: a weekday plus a
//! start and end time of day. Blocks repeat every week, so there is no
//! date component.
//!
//! # Overlap
//! Two blocks overlap iff they fall on the same weekday and their open
//! intervals intersect. A block ending at 09:00 and one starting at
//! 09:00 do not overlap.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScheduleError};

/// Teaching days, in week order.
///
/// The derived ordering follows the week: `Monday < Tuesday < ... < Saturday`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All teaching days in week order.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Position in the week (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Three-letter abbreviation.
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    /// Parses a full or three-letter English day name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| {
                needle.eq_ignore_ascii_case(day.name())
                    || needle.eq_ignore_ascii_case(day.short_name())
            })
            .ok_or_else(|| ScheduleError::InvalidWeekday(s.to_string()))
    }
}

/// A weekly time interval `(start, end)` on one weekday.
///
/// Immutable once constructed; `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeBlock {
    weekday: Weekday,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeBlock {
    /// Creates a block from time-of-day values.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidRange`] if `start >= end`.
    pub fn new(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        Ok(Self {
            weekday,
            start,
            end,
        })
    }

    /// Creates a block from `"HH:MM"` strings.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidFormat`] if either string is not `HH:MM`,
    /// then the same checks as [`TimeBlock::new`].
    ///
    /// # Example
    /// ```
    /// use u_timetable::models::{TimeBlock, Weekday};
    ///
    /// let block = TimeBlock::parse(Weekday::Monday, "07:00", "09:00").unwrap();
    /// assert_eq!(block.duration_minutes(), 120);
    /// assert!(TimeBlock::parse(Weekday::Monday, "7am", "09:00").is_err());
    /// ```
    pub fn parse(weekday: Weekday, start: &str, end: &str) -> Result<Self> {
        let start = parse_time_of_day(start, "start")?;
        let end = parse_time_of_day(end, "end")?;
        Self::new(weekday, start, end)
    }

    /// Day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Start time of day.
    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// End time of day.
    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length of the block in minutes.
    pub fn duration_minutes(&self) -> u32 {
        minutes_of_day(self.end) - minutes_of_day(self.start)
    }

    /// Whether two blocks overlap.
    ///
    /// Blocks on different days never overlap; blocks that only touch at
    /// a boundary do not overlap either.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.weekday != other.weekday {
            return false;
        }
        self.start < other.end && other.start < self.end
    }
}

impl Ord for TimeBlock {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weekday
            .cmp(&other.weekday)
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
    }
}

impl PartialOrd for TimeBlock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.weekday,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Parses a zero-padded `HH:MM` string. chrono's `%H:%M` alone also
/// accepts single-digit fields such as `7:00` or `07:5`.
fn parse_time_of_day(value: &str, field: &'static str) -> Result<NaiveTime> {
    let invalid = || ScheduleError::InvalidFormat {
        field,
        value: value.to_string(),
    };
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| invalid())
}

#[inline]
fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}
