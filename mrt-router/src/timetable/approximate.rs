//! Brown line departure estimates.
//!
//! The Brown line publishes first and last trains per station, and a
//! headway range per period instead of a timetable. Estimates use the
//! worst case of each range.

use crate::domain::{DayType, Line, ServiceTime, Station};

const fn at(hour: u32, minute: u32) -> Option<ServiceTime> {
    Some(ServiceTime::fixed(hour * 60 + minute))
}

/// First departures from BR01..BR24, as (towards BR24, towards BR01).
pub static BROWN_FIRST_TRAINS: [(Option<ServiceTime>, Option<ServiceTime>); 24] = [
    (at(6, 0), None),
    (at(6, 1), at(6, 4)),
    (at(6, 2), at(6, 3)),
    (at(6, 4), at(6, 1)),
    (at(6, 0), at(6, 0)),
    (at(6, 1), at(6, 3)),
    (at(6, 3), at(6, 1)),
    (at(6, 0), at(6, 0)),
    (at(6, 1), at(6, 5)),
    (at(6, 3), at(6, 3)),
    (at(6, 5), at(6, 1)),
    (at(6, 0), at(6, 0)),
    (at(6, 2), at(6, 2)),
    (at(6, 0), at(6, 0)),
    (at(6, 1), at(6, 3)),
    (at(6, 3), at(6, 1)),
    (at(6, 0), at(6, 0)),
    (at(6, 1), at(6, 5)),
    (at(6, 2), at(6, 3)),
    (at(6, 4), at(6, 1)),
    (at(6, 0), at(6, 0)),
    (at(6, 1), at(6, 3)),
    (at(6, 3), at(6, 1)),
    (None, at(6, 0)),
];

/// Last departures from BR01..BR24, as (towards BR24, towards BR01).
pub static BROWN_LAST_TRAINS: [(Option<ServiceTime>, Option<ServiceTime>); 24] = [
    (at(24, 0), None),
    (at(24, 1), at(24, 53)),
    (at(24, 2), at(24, 52)),
    (at(24, 5), at(24, 49)),
    (at(24, 7), at(24, 47)),
    (at(24, 10), at(24, 44)),
    (at(24, 12), at(24, 42)),
    (at(24, 15), at(24, 39)),
    (at(24, 33), at(24, 37)),
    (at(24, 35), at(24, 35)),
    (at(24, 38), at(24, 32)),
    (at(24, 40), at(24, 30)),
    (at(24, 43), at(24, 27)),
    (at(24, 46), at(24, 23)),
    (at(24, 49), at(24, 20)),
    (at(24, 52), at(24, 18)),
    (at(24, 54), at(24, 15)),
    (at(24, 56), at(24, 13)),
    (at(24, 58), at(24, 11)),
    (at(25, 0), at(24, 9)),
    (at(25, 3), at(24, 5)),
    (at(25, 5), at(24, 3)),
    (at(25, 7), at(24, 1)),
    (None, at(24, 0)),
];

const PEAK_HEADWAY: u32 = 4;
const OFF_PEAK_HEADWAY: u32 = 10;
const LATE_NIGHT_HEADWAY: u32 = 12;
const LATE_NIGHT_FROM: u32 = 23 * 60;

/// Weekday peak windows, inclusive at both ends.
const PEAKS: [(u32, u32); 2] = [(7 * 60, 9 * 60), (17 * 60, 19 * 60 + 30)];

/// Pick the entry for the direction from `station` towards `dest`.
fn towards(
    table: &[(Option<ServiceTime>, Option<ServiceTime>); 24],
    station: Station,
    dest: Station,
) -> Option<ServiceTime> {
    let (up, down) = table[usize::from(station.number()) - 1];
    if dest.number() > station.number() { up } else { down }
}

/// Whether the pair is a Brown line ride these tables cover.
fn is_brown_ride(station: Station, dest: Station) -> bool {
    station.line() == Line::BR && dest.line() == Line::BR && station != dest
}

/// First Brown line train from `station` towards `dest`.
pub fn brown_first_train(station: Station, dest: Station) -> Option<ServiceTime> {
    is_brown_ride(station, dest)
        .then(|| towards(&BROWN_FIRST_TRAINS, station, dest))
        .flatten()
}

/// Last Brown line train from `station` towards `dest`.
pub fn brown_last_train(station: Station, dest: Station) -> Option<ServiceTime> {
    is_brown_ride(station, dest)
        .then(|| towards(&BROWN_LAST_TRAINS, station, dest))
        .flatten()
}

/// Estimated next Brown line departure from `station` towards `dest`.
///
/// Before service starts this is the first train; after the last train
/// there is none. In between, the worst-case headway for the period is
/// added to `now`.
pub fn estimate_brown_departure(
    station: Station,
    day: DayType,
    now: ServiceTime,
    dest: Station,
) -> Option<ServiceTime> {
    let first = brown_first_train(station, dest)?;
    let last = brown_last_train(station, dest)?;

    if first > now {
        return Some(first);
    }
    if last < now {
        return None;
    }

    let mins = now.minutes();
    let headway = if mins >= LATE_NIGHT_FROM {
        LATE_NIGHT_HEADWAY
    } else if day.is_weekday() && PEAKS.iter().any(|(from, to)| (*from..=*to).contains(&mins)) {
        PEAK_HEADWAY
    } else {
        OFF_PEAK_HEADWAY
    };
    now.checked_add_minutes(headway)
}
