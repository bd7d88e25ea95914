//! Projecting a path onto the clock.
//!
//! Consecutive stations on one line are a ride: wait for the next train
//! that reaches the next station, then ride for the line duration.
//! Consecutive stations on different lines are a walk between platforms
//! and cost the transfer time with no wait.

use crate::domain::{DayType, Path, ServiceTime, Station};
use crate::network::{NetworkError, TransferTable, line_duration};
use crate::timetable::{ScheduleSource, Timetable};

/// Arrival at and departure from one station of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub arrival: ServiceTime,
    pub departure: ServiceTime,
}

impl StopTime {
    fn at(time: ServiceTime) -> Self {
        Self {
            arrival: time,
            departure: time,
        }
    }
}

/// Why a path has no timeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectionError {
    #[error("a path needs at least two stations, got {0}")]
    TooShort(usize),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("no train from {from} towards {to} at or after {after}")]
    NoTrain {
        from: Station,
        to: Station,
        after: ServiceTime,
    },

    #[error("arrival at {0} falls after the end of the service day")]
    PastServiceDay(Station),
}

/// Minute offsets at each station of `path`, ignoring waits.
pub fn perfect_path_eta(path: &Path, transfers: &TransferTable) -> Result<Vec<u32>, ProjectionError> {
    let stations = path.stations();
    if stations.len() < 2 {
        return Err(ProjectionError::TooShort(stations.len()));
    }

    let mut offsets = Vec::with_capacity(stations.len());
    let mut clock = 0;
    offsets.push(clock);
    for pair in stations.windows(2) {
        clock += step_cost(pair[0], pair[1], transfers)?;
        offsets.push(clock);
    }
    Ok(offsets)
}

/// Total minutes of `path` ignoring waits.
pub fn perfect_path_duration(path: &Path, transfers: &TransferTable) -> Result<u32, ProjectionError> {
    let offsets = perfect_path_eta(path, transfers)?;
    Ok(offsets.last().copied().unwrap_or_default())
}

fn step_cost(from: Station, to: Station, transfers: &TransferTable) -> Result<u32, NetworkError> {
    if from.line() == to.line() {
        line_duration(from, to)
    } else {
        transfers.transfer_time(from, to)
    }
}

/// Timeline of `path` for a traveller at its first station at `now`.
///
/// The first stop arrives at `now` and the last stop departs when it
/// arrives.
pub fn path_eta<S: ScheduleSource>(
    path: &Path,
    now: ServiceTime,
    day: DayType,
    transfers: &TransferTable,
    timetable: &Timetable<S>,
) -> Result<Vec<StopTime>, ProjectionError> {
    let stations = path.stations();
    if stations.len() < 2 {
        return Err(ProjectionError::TooShort(stations.len()));
    }

    let mut times = Vec::with_capacity(stations.len());
    let mut clock = now;
    for pair in stations.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let (departure, cost) = if from.line() == to.line() {
            let ride = line_duration(from, to)?;
            let departure = timetable.next_train_time(from, day, clock, to).ok_or(
                ProjectionError::NoTrain {
                    from,
                    to,
                    after: clock,
                },
            )?;
            (departure, ride)
        } else {
            (clock, transfers.transfer_time(from, to)?)
        };

        times.push(StopTime {
            arrival: clock,
            departure,
        });
        clock = departure
            .checked_add_minutes(cost)
            .ok_or(ProjectionError::PastServiceDay(to))?;
    }
    times.push(StopTime::at(clock));
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayGroup, path_of};
    use crate::network::taipei_transfers;
    use crate::timetable::InMemorySchedule;

    fn st(code: &str) -> Station {
        Station::parse(code).unwrap()
    }

    fn hm(s: &str) -> ServiceTime {
        ServiceTime::parse_hhmm(s).unwrap()
    }

    fn timetable() -> Timetable<InMemorySchedule> {
        let mut schedule = InMemorySchedule::new();
        schedule.add_service(st("R08"), DayGroup::Weekday, st("R02"), hm("06:00"), hm("24:00"), 10);
        schedule.add_service(st("G10"), DayGroup::Weekday, st("G19"), hm("06:02"), hm("24:02"), 6);
        schedule.add_service(st("R10"), DayGroup::Weekday, st("R28"), hm("06:00"), hm("24:00"), 6);
        Timetable::new(schedule)
    }

    #[test]
    fn perfect_eta_adds_rides_and_walks() {
        let transfers = taipei_transfers();
        let path = path_of(&["R10", "R09", "R08", "G10", "G11", "G12"]);
        let offsets = perfect_path_eta(&path, &transfers).unwrap();

        // R10 -> R08 is 4 minutes, the walk to G10 1, G10 -> G12 4
        assert_eq!(offsets, vec![0, 2, 4, 5, 7, 9]);
        assert_eq!(perfect_path_duration(&path, &transfers).unwrap(), 9);
    }

    #[test]
    fn perfect_eta_rejects_short_and_disconnected_paths() {
        let transfers = taipei_transfers();
        assert_eq!(
            perfect_path_eta(&path_of(&["R10"]), &transfers),
            Err(ProjectionError::TooShort(1))
        );
        assert_eq!(
            perfect_path_eta(&path_of(&["R10", "G10"]), &transfers),
            Err(ProjectionError::Network(NetworkError::NotTransferable(st("R10"), st("G10"))))
        );
        assert_eq!(
            perfect_path_eta(&path_of(&["O13", "O50"]), &transfers),
            Err(ProjectionError::Network(NetworkError::CrossBranch(st("O13"), st("O50"))))
        );
    }

    #[test]
    fn realistic_eta_waits_for_trains() {
        let transfers = taipei_transfers();
        let path = path_of(&["R08", "G10", "G12"]);
        let times = path_eta(&path, hm("08:03"), DayType::Tuesday, &transfers, &timetable()).unwrap();

        // Walk 1 minute, wait until 08:08 at G10, ride 4 minutes
        assert_eq!(
            times,
            vec![
                StopTime { arrival: hm("08:03"), departure: hm("08:03") },
                StopTime { arrival: hm("08:04"), departure: hm("08:08") },
                StopTime::at(hm("08:12")),
            ]
        );
    }

    #[test]
    fn timeline_is_non_decreasing() {
        let transfers = taipei_transfers();
        let path = path_of(&["R10", "R11", "R12"]);
        let mut schedule = InMemorySchedule::new();
        for code in ["R10", "R11"] {
            schedule.add_service(st(code), DayGroup::Weekday, st("R28"), hm("06:00"), hm("24:00"), 5);
        }
        let times =
            path_eta(&path, hm("09:01"), DayType::Monday, &transfers, &Timetable::new(schedule)).unwrap();

        let flat: Vec<ServiceTime> = times.iter().flat_map(|t| [t.arrival, t.departure]).collect();
        assert!(flat.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(times.last().unwrap().arrival, times.last().unwrap().departure);
    }

    #[test]
    fn no_train_is_an_error() {
        let transfers = taipei_transfers();
        let path = path_of(&["R08", "R07"]);
        let err = path_eta(&path, hm("24:30"), DayType::Monday, &transfers, &timetable()).unwrap_err();
        assert_eq!(
            err,
            ProjectionError::NoTrain {
                from: st("R08"),
                to: st("R07"),
                after: hm("24:30"),
            }
        );
    }

    #[test]
    fn wrong_direction_has_no_train() {
        let transfers = taipei_transfers();
        let path = path_of(&["R08", "R09"]);
        assert!(matches!(
            path_eta(&path, hm("08:00"), DayType::Monday, &transfers, &timetable()),
            Err(ProjectionError::NoTrain { .. })
        ));
    }

    #[test]
    fn arrival_past_service_day_is_an_error() {
        let transfers = taipei_transfers();
        let path = path_of(&["R08", "G10"]);
        let late = ServiceTime::from_minutes(crate::domain::SERVICE_DAY_END).unwrap();
        assert_eq!(
            path_eta(&path, late, DayType::Monday, &transfers, &timetable()),
            Err(ProjectionError::PastServiceDay(st("G10")))
        );
    }
}
