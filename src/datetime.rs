//! Date and time value records.
//!
//! TOML v0.5 has four date/time shapes, each represented here by a plain
//! record: [`LocalDate`], [`LocalTime`], [`LocalDateTime`], and
//! [`OffsetDateTime`]. The records store the digits the document carried
//! and nothing more — calendar legality (a February 30th, a 25th hour) is
//! deliberately not validated, matching the input grammar.
//!
//! Each record implements [`Display`](std::fmt::Display) in the exact
//! textual form the serializer emits:
//!
//! - `LocalDate` → `YYYY-MM-DD`
//! - `LocalTime` → `HH:MM:SS` with a fractional part only when the
//!   microsecond field is non-zero, printed with the minimal digits from
//!   most-significant down
//! - `LocalDateTime` → `<date>T<time>`
//! - `OffsetDateTime` → `<datetime>Z` when the offset is zero, otherwise
//!   `<datetime>±HH:MM`
//!
//! Conversions from the chrono types cover the common case of stamping a
//! document from host clock/calendar values:
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use tomldoc::OffsetDateTime;
//!
//! let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
//! let dt = eastern.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
//! let odt = OffsetDateTime::from(dt);
//! assert_eq!(odt.to_string(), "2024-03-01T09:30:00-05:00");
//! ```

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike, Utc,
};
use serde::{Serialize, Serializer};
use std::fmt;

/// A calendar date without a time or offset: `1979-05-27`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// A wall-clock time without a date or offset: `07:32:00.999999`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
}

/// A calendar date combined with a wall-clock time: `1979-05-27T07:32:00`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalDateTime {
    pub date: LocalDate,
    pub time: LocalTime,
}

/// A [`LocalDateTime`] with a UTC offset: `1979-05-27T07:32:00-07:00`.
///
/// `Z` is the encoding of a zero offset; both offset fields carry the sign,
/// so `-07:30` is stored as `hour_offset: -7, minute_offset: -30`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    pub datetime: LocalDateTime,
    pub hour_offset: i8,
    pub minute_offset: i8,
}

impl LocalDate {
    #[must_use]
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        LocalDate { year, month, day }
    }
}

impl LocalTime {
    #[must_use]
    pub fn new(hour: u8, minute: u8, second: u8, microsecond: u32) -> Self {
        LocalTime {
            hour,
            minute,
            second,
            microsecond,
        }
    }
}

impl LocalDateTime {
    #[must_use]
    pub fn new(date: LocalDate, time: LocalTime) -> Self {
        LocalDateTime { date, time }
    }
}

impl OffsetDateTime {
    #[must_use]
    pub fn new(datetime: LocalDateTime, hour_offset: i8, minute_offset: i8) -> Self {
        OffsetDateTime {
            datetime,
            hour_offset,
            minute_offset,
        }
    }

    /// The current moment in UTC, truncated to microsecond precision.
    #[must_use]
    pub fn now_utc() -> Self {
        Utc::now().into()
    }

    /// Returns `true` when the offset encodes UTC (`Z`).
    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.hour_offset == 0 && self.minute_offset == 0
    }
}

impl fmt::Display for LocalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;

        // minimal fractional digits, most significant first
        if self.microsecond > 0 {
            f.write_str(".")?;
            let mut power = 100_000;
            let mut rest = self.microsecond;
            while rest > 0 {
                let digit = rest / power;
                write!(f, "{}", digit)?;
                rest -= digit * power;
                power /= 10;
            }
        }

        Ok(())
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.datetime.fmt(f)?;
        if self.is_utc() {
            f.write_str("Z")
        } else {
            let sign = if self.hour_offset > 0 || (self.hour_offset == 0 && self.minute_offset > 0)
            {
                '+'
            } else {
                '-'
            };
            write!(
                f,
                "{}{:02}:{:02}",
                sign,
                self.hour_offset.unsigned_abs(),
                self.minute_offset.unsigned_abs()
            )
        }
    }
}

impl From<NaiveDate> for LocalDate {
    fn from(date: NaiveDate) -> Self {
        LocalDate {
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl From<NaiveTime> for LocalTime {
    fn from(time: NaiveTime) -> Self {
        LocalTime {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
            microsecond: time.nanosecond() / 1_000,
        }
    }
}

impl From<NaiveDateTime> for LocalDateTime {
    fn from(dt: NaiveDateTime) -> Self {
        LocalDateTime {
            date: dt.date().into(),
            time: dt.time().into(),
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for OffsetDateTime {
    fn from(dt: DateTime<Tz>) -> Self {
        let offset_seconds = dt.offset().fix().local_minus_utc();
        let offset_minutes = offset_seconds / 60;
        OffsetDateTime {
            datetime: dt.naive_local().into(),
            hour_offset: (offset_minutes / 60) as i8,
            minute_offset: (offset_minutes % 60) as i8,
        }
    }
}

impl Serialize for LocalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for LocalTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for LocalDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for OffsetDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
