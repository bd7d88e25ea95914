//! Domain types for the metro router.
//!
//! This module contains the core model: lines, stations, names, service
//! times and paths. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod line;
mod names;
mod path;
mod time;

pub use line::{Branch, InvalidStation, Line, ORANGE_JUNCTION, Station, valid_station};
pub use names::{Language, StationName, UnknownLanguage};
pub use path::Path;
pub use time::{
    DayGroup, DayType, EARLY_MORNING_CUTOFF, SERVICE_DAY_END, ServiceTime, TimeError,
    resolve_service_clock,
};

#[cfg(test)]
pub(crate) use path::path_of;
