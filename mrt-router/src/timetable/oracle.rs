//! Next, first and last train queries.

use tracing::{debug, warn};

use crate::domain::{DayType, Line, ServiceTime, Station};

use super::approximate::{brown_first_train, brown_last_train, estimate_brown_departure};
use super::{Schedule, ScheduleError, ScheduleSource};

/// When the first trains of the day leave.
const SERVICE_START: ServiceTime = ServiceTime::fixed(6 * 60);

/// Whether a train terminating at `terminal`, standing at `station`, will
/// stop at `dest` later on its run.
///
/// `dest` must lie strictly beyond `station` in the direction of travel and
/// no further than the terminal. On the Orange line, all three stations
/// must be on one through route: a Luzhou train never reaches Xinzhuang.
pub fn train_serves(station: Station, dest: Station, terminal: Station) -> bool {
    if station == dest
        || !station.shares_track(&dest)
        || !station.shares_track(&terminal)
        || !dest.shares_track(&terminal)
    {
        return false;
    }

    let (s, d, t) = (
        station.track_position(),
        dest.track_position(),
        terminal.track_position(),
    );
    (s < d && d <= t) || (s > d && d >= t)
}

/// Upcoming departures towards one terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalDepartures {
    pub terminal: Station,
    pub times: Vec<ServiceTime>,
    /// True when the times are headway estimates rather than timetabled.
    pub approximate: bool,
}

/// Timetable queries over a schedule source.
///
/// Load failures are logged and treated as an empty schedule, so a
/// missing file makes a station look served by no trains rather than
/// failing the whole route search.
#[derive(Debug, Clone)]
pub struct Timetable<S> {
    source: S,
}

impl<S: ScheduleSource> Timetable<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether departures from `station` are estimates.
    pub fn is_approximate(station: Station) -> bool {
        station.line() == Line::BR
    }

    /// All departures from `station` on `day`, in time order.
    pub fn schedule(&self, station: Station, day: DayType) -> Schedule {
        if Self::is_approximate(station) {
            return Schedule::from(Vec::new());
        }
        match self.source.load(station, day.group(station.line())) {
            Ok(trains) if trains.is_sorted_by_key(|t| t.time) => trains,
            Ok(trains) => {
                let mut trains = trains.to_vec();
                trains.sort_by_key(|t| t.time);
                trains.into()
            }
            Err(ScheduleError::NoTimetable(_)) => Schedule::from(Vec::new()),
            Err(e) => {
                warn!(%station, error = %e, "failed to load schedule");
                Schedule::from(Vec::new())
            }
        }
    }

    /// Earliest departure at or after `now` from `station` that reaches
    /// `dest` without changing trains.
    pub fn next_train_time(
        &self,
        station: Station,
        day: DayType,
        now: ServiceTime,
        dest: Station,
    ) -> Option<ServiceTime> {
        if Self::is_approximate(station) {
            return estimate_brown_departure(station, day, now, dest);
        }

        let trains = self.schedule(station, day);
        let start = trains.partition_point(|t| t.time < now);
        let found = trains[start..]
            .iter()
            .find(|t| train_serves(station, dest, t.terminal))
            .map(|t| t.time);

        if found.is_none() {
            debug!(%station, %dest, %now, "no remaining train");
        }
        found
    }

    /// First departure of the day from `station` towards `dest`.
    pub fn first_train_time(
        &self,
        station: Station,
        day: DayType,
        dest: Station,
    ) -> Option<ServiceTime> {
        if Self::is_approximate(station) {
            return brown_first_train(station, dest);
        }
        self.next_train_time(station, day, SERVICE_START, dest)
    }

    /// Last departure of the day from `station` towards `dest`.
    pub fn last_train_time(
        &self,
        station: Station,
        day: DayType,
        dest: Station,
    ) -> Option<ServiceTime> {
        if Self::is_approximate(station) {
            return brown_last_train(station, dest);
        }
        self.schedule(station, day)
            .iter()
            .rev()
            .find(|t| train_serves(station, dest, t.terminal))
            .map(|t| t.time)
    }

    /// Departure board for `station`: up to `per_terminal` upcoming
    /// departures towards each terminal, terminals in order of their next
    /// departure.
    pub fn departures(
        &self,
        station: Station,
        day: DayType,
        now: ServiceTime,
        per_terminal: usize,
    ) -> Vec<TerminalDepartures> {
        if per_terminal == 0 {
            return Vec::new();
        }

        if Self::is_approximate(station) {
            return brown_terminals(station)
                .into_iter()
                .filter_map(|terminal| {
                    estimate_brown_departure(station, day, now, terminal).map(|t| {
                        TerminalDepartures {
                            terminal,
                            times: vec![t],
                            approximate: true,
                        }
                    })
                })
                .collect();
        }

        let trains = self.schedule(station, day);
        let start = trains.partition_point(|t| t.time < now);

        let mut board: Vec<TerminalDepartures> = Vec::new();
        for train in &trains[start..] {
            if train.terminal == station {
                continue;
            }
            match board.iter_mut().find(|d| d.terminal == train.terminal) {
                Some(entry) if entry.times.len() < per_terminal => entry.times.push(train.time),
                Some(_) => {}
                None => board.push(TerminalDepartures {
                    terminal: train.terminal,
                    times: vec![train.time],
                    approximate: false,
                }),
            }
        }
        board
    }
}

/// End stations of the Brown line reachable from `station`.
fn brown_terminals(station: Station) -> Vec<Station> {
    let mut stations = Line::BR.stations();
    let first = stations.next();
    let last = stations.last();
    [last, first]
        .into_iter()
        .flatten()
        .filter(|t| *t != station)
        .collect()
}
