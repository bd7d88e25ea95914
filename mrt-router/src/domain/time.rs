//! Service-day time handling.
//!
//! Metro timetables run past midnight: a train leaving at 00:30 belongs to
//! the previous day's service and is written as "24:30". [`ServiceTime`]
//! counts minutes from the start of the service day, up to 26:00.
//! [`resolve_service_clock`] maps a wall-clock instant onto that scale.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use std::fmt;

use super::line::{Line, parse_two_digits};

/// Latest representable service time, 26:00.
pub const SERVICE_DAY_END: u32 = 26 * 60;

/// Wall-clock times at or before this minute belong to the previous
/// service day.
pub const EARLY_MORNING_CUTOFF: u32 = 2 * 60;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error returned for an invalid time or day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Minutes since the start of the service day, in `0..=26:00`.
///
/// # Examples
///
/// ```
/// use mrt_router::domain::ServiceTime;
///
/// let t = ServiceTime::parse_hhmm("24:30").unwrap();
/// assert_eq!(t.minutes(), 1470);
/// assert_eq!(t.to_string(), "24:30");
///
/// assert!(ServiceTime::parse_hhmm("26:01").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceTime(u32);

impl ServiceTime {
    /// Start of the service day.
    pub const MIDNIGHT: ServiceTime = ServiceTime(0);

    /// Create from minutes since the start of the service day.
    pub fn from_minutes(minutes: u32) -> Result<Self, TimeError> {
        if minutes > SERVICE_DAY_END {
            return Err(TimeError::new("time is past the end of the service day"));
        }
        Ok(Self(minutes))
    }

    /// Create from hours and minutes. Hours may exceed 23.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Self::from_minutes(hour * 60 + minute)
    }

    /// Unchecked constructor for static tables.
    pub(crate) const fn fixed(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Parse "HH:MM", allowing hours up to 26.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }
        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::from_hm(u32::from(hour), u32::from(minute))
    }

    /// Minutes since the start of the service day.
    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Add minutes, failing if the result leaves the service day.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        let total = self.0.checked_add(minutes)?;
        (total <= SERVICE_DAY_END).then_some(Self(total))
    }

    /// Minutes from `earlier` to `self`; negative if `earlier` is later.
    pub fn minutes_since(self, earlier: ServiceTime) -> i64 {
        i64::from(self.0) - i64::from(earlier.0)
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Day of the week used to select a timetable. Public holidays run the
/// Sunday timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DayType {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl DayType {
    /// From ISO numbering, Monday = 1 to Sunday = 7.
    pub fn from_number(n: u8) -> Result<Self, TimeError> {
        Ok(match n {
            1 => DayType::Monday,
            2 => DayType::Tuesday,
            3 => DayType::Wednesday,
            4 => DayType::Thursday,
            5 => DayType::Friday,
            6 => DayType::Saturday,
            7 => DayType::Sunday,
            _ => return Err(TimeError::new("day must be 1 (Monday) to 7 (Sunday)")),
        })
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn is_weekday(self) -> bool {
        self.number() <= 5
    }

    /// The day before, wrapping Monday back to Sunday.
    pub fn previous(self) -> Self {
        match self {
            DayType::Monday => DayType::Sunday,
            DayType::Tuesday => DayType::Monday,
            DayType::Wednesday => DayType::Tuesday,
            DayType::Thursday => DayType::Wednesday,
            DayType::Friday => DayType::Thursday,
            DayType::Saturday => DayType::Friday,
            DayType::Sunday => DayType::Saturday,
        }
    }

    /// Timetable group this day uses on `line`.
    ///
    /// Only the Red line publishes separate Saturday and Sunday tables.
    pub fn group(self, line: Line) -> DayGroup {
        match (self, line) {
            (d, _) if d.is_weekday() => DayGroup::Weekday,
            (DayType::Saturday, Line::R) => DayGroup::Saturday,
            (_, Line::R) => DayGroup::Sunday,
            _ => DayGroup::Weekend,
        }
    }
}

impl From<Weekday> for DayType {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayType::Monday,
            Weekday::Tue => DayType::Tuesday,
            Weekday::Wed => DayType::Wednesday,
            Weekday::Thu => DayType::Thursday,
            Weekday::Fri => DayType::Friday,
            Weekday::Sat => DayType::Saturday,
            Weekday::Sun => DayType::Sunday,
        }
    }
}

/// Set of days sharing one published timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayGroup {
    Weekday,
    Saturday,
    Sunday,
    Weekend,
}

impl DayGroup {
    /// Suffix used in schedule file names.
    pub fn suffix(self) -> &'static str {
        match self {
            DayGroup::Weekday => "12345",
            DayGroup::Saturday => "6",
            DayGroup::Sunday => "7",
            DayGroup::Weekend => "67",
        }
    }
}

/// Map a local wall-clock instant to a service day and service time.
///
/// Instants at or before 02:00 count as the previous day's late service.
/// `holiday` marks the resolved service day as a public holiday, which
/// runs the Sunday timetable.
///
/// ```
/// use chrono::NaiveDate;
/// use mrt_router::domain::{DayType, resolve_service_clock};
///
/// // Monday 00:45 is still Sunday night's service
/// let at = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap().and_hms_opt(0, 45, 0).unwrap();
/// let (day, time) = resolve_service_clock(at, false);
/// assert_eq!(day, DayType::Sunday);
/// assert_eq!(time.to_string(), "24:45");
/// ```
pub fn resolve_service_clock(local: NaiveDateTime, holiday: bool) -> (DayType, ServiceTime) {
    let mut day = DayType::from(local.weekday());
    let mut minutes = local.hour() * 60 + local.minute();

    if minutes <= EARLY_MORNING_CUTOFF {
        day = day.previous();
        minutes += MINUTES_PER_DAY;
    }
    if holiday {
        day = DayType::Sunday;
    }

    // At most 24:00 + 02:00, which is the end of the service day.
    (day, ServiceTime(minutes))
}
