//! Train timetables.
//!
//! A [`ScheduleSource`] loads the published departures for one station and
//! day group. [`Timetable`] answers next/first/last train queries on top
//! of a source, falling back to headway estimates on the Brown line, which
//! has no per-station timetable.

mod approximate;
mod cache;
mod oracle;
mod source;

pub use approximate::{
    BROWN_FIRST_TRAINS, BROWN_LAST_TRAINS, brown_first_train, brown_last_train,
    estimate_brown_departure,
};
pub use cache::{CacheConfig, CachedSchedule};
pub use oracle::{TerminalDepartures, Timetable, train_serves};
pub use source::CsvDirectory;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{DayGroup, Line, ServiceTime, Station};

/// Direction flag published with each departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Flag 0.
    Up,
    /// Flag 1.
    Down,
}

impl Direction {
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            _ => None,
        }
    }
}

/// One departure from a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Train {
    /// Station the train departs from.
    pub station: Station,
    /// Departure time.
    pub time: ServiceTime,
    /// Published direction flag. Carried for display only: reachability is
    /// decided from the terminal.
    pub direction: Direction,
    /// Last stop of this train.
    pub terminal: Station,
}

/// Errors from loading a schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("{0} has no published timetable")]
    NoTimetable(Line),

    #[error("failed to parse schedule {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Departures of one station for one day group, shared between callers.
pub type Schedule = Arc<[Train]>;

/// Loads the departures of one station for one day group.
///
/// Implementations return departures in time order. A missing schedule is
/// an empty list, not an error.
pub trait ScheduleSource {
    fn load(&self, station: Station, group: DayGroup) -> Result<Schedule, ScheduleError>;
}

impl<S: ScheduleSource + ?Sized> ScheduleSource for &S {
    fn load(&self, station: Station, group: DayGroup) -> Result<Schedule, ScheduleError> {
        (**self).load(station, group)
    }
}

impl<S: ScheduleSource + ?Sized> ScheduleSource for Arc<S> {
    fn load(&self, station: Station, group: DayGroup) -> Result<Schedule, ScheduleError> {
        (**self).load(station, group)
    }
}

/// Shared, type-erased schedule source.
pub type SharedSchedule = Arc<dyn ScheduleSource + Send + Sync>;

/// Schedule held in memory, for tests and preloaded data.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchedule {
    trains: HashMap<(Station, DayGroup), Vec<Train>>,
}

impl InMemorySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one departure, keeping the station's list in time order.
    pub fn add(&mut self, group: DayGroup, train: Train) {
        let trains = self.trains.entry((train.station, group)).or_default();
        let at = trains.partition_point(|t| t.time <= train.time);
        trains.insert(at, train);
    }

    /// Add regular departures towards `terminal`.
    ///
    /// Departures run every `headway` minutes from `first` to `last`
    /// inclusive.
    pub fn add_service(
        &mut self,
        station: Station,
        group: DayGroup,
        terminal: Station,
        first: ServiceTime,
        last: ServiceTime,
        headway: u32,
    ) {
        let direction = if terminal.track_position() > station.track_position() {
            Direction::Up
        } else {
            Direction::Down
        };
        let mut time = Some(first);
        while let Some(t) = time.filter(|t| *t <= last) {
            self.add(group, Train { station, time: t, direction, terminal });
            time = t.checked_add_minutes(headway.max(1));
        }
    }
}

impl ScheduleSource for InMemorySchedule {
    fn load(&self, station: Station, group: DayGroup) -> Result<Schedule, ScheduleError> {
        Ok(self
            .trains
            .get(&(station, group))
            .map(Vec::as_slice)
            .unwrap_or_default()
            .into())
    }
}
