//! Caller-supplied routing constraints.

use std::collections::HashSet;

use crate::domain::{Line, Path, Station};
use crate::network::equivalent_stations;

/// Most must-visit stations a query may name. Checkpoint progress is
/// tracked as a 32-bit mask.
pub const MAX_CHECKPOINTS: usize = 32;

/// Restrictions and preferences for a route query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConstraints {
    /// Stations to pass through, in this order.
    pub must_stations: Vec<Station>,

    /// Stations to keep out of. Avoiding one code of an interchange
    /// avoids the whole complex.
    pub avoid_stations: Vec<Station>,

    /// Lines the route may not touch.
    pub avoid_lines: Vec<Line>,

    /// Lines the route must touch somewhere.
    pub must_lines: Vec<Line>,

    /// Rank by total time first.
    pub minimize_time: bool,

    /// Rank by interchanges first (when not ranking by time).
    pub minimize_interchanges: bool,

    /// Most interchanges a route may make.
    pub max_interchanges: usize,
}

impl Default for RouteConstraints {
    fn default() -> Self {
        Self {
            must_stations: Vec::new(),
            avoid_stations: Vec::new(),
            avoid_lines: Vec::new(),
            must_lines: Vec::new(),
            minimize_time: true,
            minimize_interchanges: true,
            max_interchanges: 30,
        }
    }
}

impl RouteConstraints {
    /// Unconstrained query ranked by total time.
    pub fn fastest(max_interchanges: usize) -> Self {
        Self {
            max_interchanges,
            ..Self::default()
        }
    }

    /// Unconstrained query ranked by interchange count.
    pub fn fewest_interchanges(max_interchanges: usize) -> Self {
        Self {
            minimize_time: false,
            max_interchanges,
            ..Self::default()
        }
    }

    /// Bitmask of the must-use lines.
    pub fn must_line_mask(&self) -> u8 {
        self.must_lines.iter().fold(0, |mask, line| mask | line.bit())
    }

    /// Number of must-use lines `path` touches.
    pub fn must_lines_covered(&self, path: &Path) -> usize {
        (path.line_mask() & self.must_line_mask()).count_ones() as usize
    }

    /// Whether `path` touches every must-use line.
    pub fn covers_must_lines(&self, path: &Path) -> bool {
        let must = self.must_line_mask();
        path.line_mask() & must == must
    }

    /// Expand avoided stations to their complexes and collect avoided lines.
    pub fn resolve(&self) -> ResolvedConstraints<'_> {
        let forbidden_stations = self
            .avoid_stations
            .iter()
            .flat_map(|s| equivalent_stations(*s))
            .collect();
        let forbidden_lines = self.avoid_lines.iter().fold(0, |mask, line| mask | line.bit());

        ResolvedConstraints {
            constraints: self,
            forbidden_stations,
            forbidden_lines,
            must_line_mask: self.must_line_mask(),
        }
    }
}

/// Constraints prepared for search: forbidden stations expanded once per
/// query.
#[derive(Debug, Clone)]
pub struct ResolvedConstraints<'a> {
    constraints: &'a RouteConstraints,
    forbidden_stations: HashSet<Station>,
    forbidden_lines: u8,
    must_line_mask: u8,
}

impl ResolvedConstraints<'_> {
    pub fn constraints(&self) -> &RouteConstraints {
        self.constraints
    }

    /// Whether a route may stop at `station`.
    pub fn is_forbidden(&self, station: Station) -> bool {
        self.forbidden_lines & station.line().bit() != 0
            || self.forbidden_stations.contains(&station)
    }

    pub fn checkpoints(&self) -> &[Station] {
        &self.constraints.must_stations
    }

    pub fn must_line_mask(&self) -> u8 {
        self.must_line_mask
    }

    pub fn max_interchanges(&self) -> usize {
        self.constraints.max_interchanges
    }
}
