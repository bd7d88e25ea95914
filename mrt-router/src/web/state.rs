//! Application state for the web layer.

use std::sync::Arc;

use crate::network::TransferTable;
use crate::planner::SearchConfig;
use crate::timetable::{SharedSchedule, Timetable};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Walking connections between platforms
    pub transfers: Arc<TransferTable>,

    /// Timetable over the configured schedule source
    pub timetable: Arc<Timetable<SharedSchedule>>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(schedule: SharedSchedule, transfers: TransferTable, config: SearchConfig) -> Self {
        Self {
            transfers: Arc::new(transfers),
            timetable: Arc::new(Timetable::new(schedule)),
            config: Arc::new(config),
        }
    }
}
