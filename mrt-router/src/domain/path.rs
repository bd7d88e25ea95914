//! Station sequences through the network.

use std::fmt;

use super::line::{Line, Station};

/// An ordered, cycle-free sequence of stations.
///
/// Consecutive stations are either on the same line (a ride) or on
/// different lines of one interchange (a transfer). Paths compare and hash
/// by their station sequence, which is how the planner deduplicates
/// candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<Station>);

impl Path {
    pub fn new(stations: Vec<Station>) -> Self {
        Self(stations)
    }

    /// A path consisting of one station.
    pub fn single(station: Station) -> Self {
        Self(vec![station])
    }

    pub fn stations(&self) -> &[Station] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<Station> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<Station> {
        self.0.last().copied()
    }

    pub fn contains(&self, station: Station) -> bool {
        self.0.contains(&station)
    }

    /// A copy of this path with `station` appended.
    pub fn extended(&self, station: Station) -> Self {
        let mut stations = Vec::with_capacity(self.0.len() + 1);
        stations.extend_from_slice(&self.0);
        stations.push(station);
        Self(stations)
    }

    /// Whether any station of the path is on `line`.
    pub fn uses_line(&self, line: Line) -> bool {
        self.0.iter().any(|s| s.line() == line)
    }

    /// Bitmask of the lines the path touches.
    pub fn line_mask(&self) -> u8 {
        self.0.iter().fold(0, |mask, s| mask | s.line().bit())
    }

    /// Number of interchanges along the path.
    ///
    /// Each change of line counts once. Continuing on the Orange line from
    /// one branch to the other via O12 also counts, since no train runs
    /// through the junction between the branches.
    pub fn interchange_count(&self) -> usize {
        let s = &self.0;
        (0..s.len().saturating_sub(1))
            .filter(|&i| {
                let (cur, next) = (s[i], s[i + 1]);
                if cur.line() != next.line() {
                    return true;
                }
                i > 0 && is_branch_switch(s[i - 1], cur, next)
            })
            .count()
    }

    /// Collapse the path to the stations a rider needs to be told about.
    ///
    /// Keeps both endpoints, every checkpoint, every station where the line
    /// changes, and O12 when the path switches Orange branches there.
    /// Intermediate stops on a single ride are dropped. Simplifying an
    /// already simplified path returns it unchanged.
    pub fn simplify(&self, checkpoints: &[Station]) -> Path {
        let s = &self.0;
        if s.len() <= 2 {
            return self.clone();
        }

        let last = s.len() - 1;
        let kept = (0..s.len())
            .filter(|&i| {
                if i == 0 || i == last || checkpoints.contains(&s[i]) {
                    return true;
                }
                let (prev, cur, next) = (s[i - 1], s[i], s[i + 1]);
                prev.line() != cur.line()
                    || cur.line() != next.line()
                    || is_branch_switch(prev, cur, next)
            })
            .map(|i| s[i])
            .collect();

        Path(kept)
    }

    /// Concatenate two paths, joining them at a shared station.
    pub fn merge(&self, other: &Path) -> Path {
        let mut stations = self.0.clone();
        let skip = usize::from(self.last().is_some() && self.last() == other.first());
        stations.extend_from_slice(&other.0[skip..]);
        Path(stations)
    }
}

/// Same-line step through `cur` that cannot be made on one train.
fn is_branch_switch(prev: Station, cur: Station, next: Station) -> bool {
    prev.line() == cur.line() && cur.line() == next.line() && !prev.shares_track(&next)
}

impl From<Vec<Station>> for Path {
    fn from(stations: Vec<Station>) -> Self {
        Self(stations)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, station) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{station}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn path_of(codes: &[&str]) -> Path {
    Path(codes.iter().map(|c| Station::parse(c).unwrap()).collect())
}
