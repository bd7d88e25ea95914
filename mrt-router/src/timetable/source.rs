//! Schedule files on disk.
//!
//! Each station and day group has one CSV file at
//! `<data dir>/arrival_times/generated/<LINE>/<CODE>_<GROUP>.csv`, with a
//! header row and columns `line, destination, direction, time`. The time
//! column is minutes since the start of the service day. Columns are read
//! by position, since header names differ between lines.

use std::io;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::domain::{DayGroup, Line, ServiceTime, Station};

use super::{Direction, Schedule, ScheduleError, ScheduleSource, Train};

/// Reads schedules from a directory of CSV files.
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    root: PathBuf,
}

impl CsvDirectory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: data_dir.into(),
        }
    }

    /// File holding the schedule for `station` on `group` days.
    pub fn schedule_path(&self, station: Station, group: DayGroup) -> PathBuf {
        self.root
            .join("arrival_times")
            .join("generated")
            .join(station.line().code())
            .join(format!("{}_{}.csv", station.code(), group.suffix()))
    }
}

impl ScheduleSource for CsvDirectory {
    fn load(&self, station: Station, group: DayGroup) -> Result<Schedule, ScheduleError> {
        if station.line() == Line::BR {
            return Err(ScheduleError::NoTimetable(Line::BR));
        }

        let path = self.schedule_path(station, group);
        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)
        {
            Ok(reader) => reader,
            Err(e) if is_not_found(&e) => {
                debug!(path = %path.display(), "no schedule file");
                return Ok(Schedule::from(Vec::new()));
            }
            Err(e) => return Err(ScheduleError::Csv { path, source: e }),
        };

        let mut trains = Vec::new();
        let mut record = csv::StringRecord::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(ScheduleError::Csv { path, source: e });
                }
                Err(e) => {
                    trace!(path = %path.display(), error = %e, "skipping unreadable row");
                    continue;
                }
            }

            match parse_record(station, &record) {
                Some(train) => trains.push(train),
                None => trace!(
                    path = %path.display(),
                    line = reader.position().line(),
                    "skipping malformed row"
                ),
            }
        }

        trains.sort_by_key(|t| t.time);
        debug!(%station, group = group.suffix(), trains = trains.len(), "loaded schedule");
        Ok(trains.into())
    }
}

fn is_not_found(e: &csv::Error) -> bool {
    matches!(e.kind(), csv::ErrorKind::Io(err) if err.kind() == io::ErrorKind::NotFound)
}

/// Parse one `line, destination, direction, time` row.
fn parse_record(station: Station, record: &csv::StringRecord) -> Option<Train> {
    let terminal = Station::parse(record.get(1)?).ok()?;
    let direction = record.get(2)?.parse::<u8>().ok().and_then(Direction::from_flag)?;
    let minutes = record.get(3)?.parse::<u32>().ok()?;
    let time = ServiceTime::from_minutes(minutes).ok()?;

    Some(Train {
        station,
        time,
        direction,
        terminal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn st(code: &str) -> Station {
        Station::parse(code).unwrap()
    }

    fn write_schedule(dir: &CsvDirectory, station: Station, group: DayGroup, body: &str) {
        let path = dir.schedule_path(station, group);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn path_layout() {
        let dir = CsvDirectory::new("/data");
        assert_eq!(
            dir.schedule_path(st("R10"), DayGroup::Weekday),
            PathBuf::from("/data/arrival_times/generated/R/R10_12345.csv")
        );
        assert_eq!(
            dir.schedule_path(st("BL12"), DayGroup::Weekend),
            PathBuf::from("/data/arrival_times/generated/BL/BL12_67.csv")
        );
    }

    #[test]
    fn loads_rows_in_time_order() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = CsvDirectory::new(tmp.path());
        write_schedule(
            &dir,
            st("R10"),
            DayGroup::Weekday,
            "line,destination,direction,time\nR-1,R28,0,372\nR-1,R02,1,363\n",
        );

        let trains = dir.load(st("R10"), DayGroup::Weekday).unwrap();
        assert_eq!(trains.len(), 2);
        assert_eq!(trains[0].terminal, st("R02"));
        assert_eq!(trains[0].time.to_string(), "06:03");
        assert_eq!(trains[0].direction, Direction::Down);
        assert_eq!(trains[1].terminal, st("R28"));
        assert!(trains.iter().all(|t| t.station == st("R10")));
    }

    #[test]
    fn reads_columns_by_position() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = CsvDirectory::new(tmp.path());
        write_schedule(
            &dir,
            st("Y10"),
            DayGroup::Weekend,
            "line,destination,direction,abs_time\nY,Y20,0,400\n",
        );
        let trains = dir.load(st("Y10"), DayGroup::Weekend).unwrap();
        assert_eq!(trains.len(), 1);
        assert_eq!(trains[0].terminal, st("Y20"));
    }

    #[test]
    fn skips_malformed_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = CsvDirectory::new(tmp.path());
        write_schedule(
            &dir,
            st("G10"),
            DayGroup::Weekday,
            "line,destination,direction,time\n\
             G,G01,1,400\n\
             G,XX99,1,410\n\
             G,G19,7,420\n\
             G,G19,0,late\n\
             G,G19,0,9999\n\
             G,G19\n\
             G,G19,0,430\n",
        );
        let trains = dir.load(st("G10"), DayGroup::Weekday).unwrap();
        let times: Vec<u32> = trains.iter().map(|t| t.time.minutes()).collect();
        assert_eq!(times, vec![400, 430]);
    }

    #[test]
    fn missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = CsvDirectory::new(tmp.path());
        assert!(dir.load(st("O05"), DayGroup::Weekday).unwrap().is_empty());
    }

    #[test]
    fn brown_line_has_no_files() {
        let dir = CsvDirectory::new("/nonexistent");
        assert!(matches!(
            dir.load(st("BR10"), DayGroup::Weekday),
            Err(ScheduleError::NoTimetable(Line::BR))
        ));
    }
}
