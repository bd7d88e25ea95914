//! Walking transfers between lines.
//!
//! Inside an interchange complex, changing lines means walking between
//! platforms. This module provides lookup for transferable station pairs
//! and their walking times.

use std::collections::HashMap;

use crate::domain::{Line, Station};

use super::NetworkError;

/// A collection of transfers between stations of different lines.
///
/// Transfers are symmetric: if you can change from A to B, you can change
/// from B to A in the same time.
#[derive(Debug, Clone, Default)]
pub struct TransferTable {
    /// Map from (from, to) to walking time in minutes.
    /// Stored in both directions for O(1) lookup.
    minutes: HashMap<(Station, Station), u32>,
    /// Outgoing transfers per station, kept sorted so that search order
    /// does not depend on hash iteration order.
    outgoing: HashMap<Station, Vec<(Station, u32)>>,
}

impl TransferTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transfer between two stations, in both directions.
    pub fn add(&mut self, a: Station, b: Station, minutes: u32) {
        self.insert_directed(a, b, minutes);
        self.insert_directed(b, a, minutes);
    }

    fn insert_directed(&mut self, from: Station, to: Station, minutes: u32) {
        self.minutes.insert((from, to), minutes);
        let out = self.outgoing.entry(from).or_default();
        out.retain(|(s, _)| *s != to);
        out.push((to, minutes));
        out.sort_unstable();
    }

    /// Walking time between two stations. Staying put costs nothing.
    pub fn transfer_time(&self, from: Station, to: Station) -> Result<u32, NetworkError> {
        if from == to {
            return Ok(0);
        }
        self.minutes
            .get(&(from, to))
            .copied()
            .ok_or(NetworkError::NotTransferable(from, to))
    }

    pub fn can_transfer(&self, from: Station, to: Station) -> bool {
        self.minutes.contains_key(&(from, to))
    }

    /// Transfers from line `a` to line `b`, as (station on `a`, station on
    /// `b`, minutes), ordered along line `a`.
    pub fn line_transfer_stations(&self, a: Line, b: Line) -> Vec<(Station, Station, u32)> {
        a.stations()
            .flat_map(|from| {
                self.transfers_from(from)
                    .iter()
                    .filter(|(to, _)| to.line() == b)
                    .map(move |(to, mins)| (from, *to, *mins))
            })
            .collect()
    }

    /// All transfers leaving `from`, ordered by destination station.
    pub fn transfers_from(&self, from: Station) -> &[(Station, u32)] {
        self.outgoing.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of transferable pairs (counting A→B and B→A as one).
    pub fn len(&self) -> usize {
        self.minutes.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }
}

/// Builder for creating transfer tables from station codes.
#[derive(Debug, Default)]
pub struct TransferTableBuilder {
    inner: TransferTable,
}

impl TransferTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transfer. Pairs with an invalid code are ignored.
    pub fn add(mut self, a: &str, b: &str, minutes: u32) -> Self {
        if let (Ok(a), Ok(b)) = (Station::parse(a), Station::parse(b)) {
            self.inner.add(a, b, minutes);
        }
        self
    }

    pub fn build(self) -> TransferTable {
        self.inner
    }
}

/// Platform-to-platform walking times at every Taipei Metro interchange.
pub fn taipei_transfers() -> TransferTable {
    TransferTableBuilder::new()
        .add("R05", "BR09", 5) // Daan
        .add("R07", "O06", 1) // Dongmen
        .add("R08", "G10", 1) // Chiang Kai-Shek Memorial Hall
        .add("R10", "BL12", 4) // Taipei Main Station
        .add("R11", "G14", 3) // Zhongshan
        .add("R13", "O11", 3) // Minquan W. Rd.
        .add("G04", "Y07", 3) // Dapinglin
        .add("G09", "O05", 1) // Guting
        .add("G12", "BL11", 1) // Ximen
        .add("G15", "O08", 2) // Songjiang Nanjing
        .add("G16", "BR11", 5) // Nanjing Fuxing
        .add("BL07", "Y16", 11) // Banqiao
        .add("BL08", "Y17", 9) // Xinpu / Xinpu Minsheng
        .add("BL14", "O07", 1) // Zhongxiao Xinsheng
        .add("BL15", "BR10", 5) // Zhongxiao Fuxing
        .add("BL23", "BR24", 6) // Nangang Exhibition Center
        .add("Y11", "O02", 6) // Jingan
        .add("Y18", "O17", 6) // Touqianzhuang
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::complex::{complexes, equivalent_stations};

    fn st(s: &str) -> Station {
        Station::parse(s).unwrap()
    }

    #[test]
    fn empty_table() {
        let table = TransferTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.transfer_time(st("R10"), st("BL12")).is_err());
        assert!(table.transfers_from(st("R10")).is_empty());
    }

    #[test]
    fn add_is_symmetric() {
        let mut table = TransferTable::new();
        table.add(st("R10"), st("BL12"), 4);

        assert_eq!(table.len(), 1);
        assert_eq!(table.transfer_time(st("R10"), st("BL12")), Ok(4));
        assert_eq!(table.transfer_time(st("BL12"), st("R10")), Ok(4));
        assert!(!table.can_transfer(st("R10"), st("R11")));
        assert_eq!(
            table.transfer_time(st("R10"), st("R11")),
            Err(NetworkError::NotTransferable(st("R10"), st("R11")))
        );
    }

    #[test]
    fn re_adding_replaces_time() {
        let mut table = TransferTable::new();
        table.add(st("R10"), st("BL12"), 4);
        table.add(st("BL12"), st("R10"), 6);

        assert_eq!(table.len(), 1);
        assert_eq!(table.transfers_from(st("R10")), &[(st("BL12"), 6)]);
    }

    #[test]
    fn builder_ignores_invalid_codes() {
        let table = TransferTableBuilder::new()
            .add("R01", "BL12", 4)
            .add("R10", "XX12", 4)
            .add("R10", "BL12", 4)
            .build();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn taipei_table_matches_complexes() {
        let table = taipei_transfers();
        assert_eq!(table.len(), complexes().count());

        for node in complexes() {
            let stations = node.stations();
            for a in &stations {
                for b in &stations {
                    if a != b {
                        assert!(table.can_transfer(*a, *b), "{a} -> {b}");
                    }
                }
            }
        }
    }

    #[test]
    fn taipei_transfers_stay_inside_complex() {
        let table = taipei_transfers();
        for line in Line::ALL {
            for station in line.stations() {
                for (to, _) in table.transfers_from(station) {
                    assert!(equivalent_stations(station).contains(to));
                    assert_ne!(to.line(), station.line());
                }
            }
        }
    }

    #[test]
    fn known_walking_times() {
        let table = taipei_transfers();
        assert_eq!(table.transfer_time(st("BL07"), st("Y16")), Ok(11));
        assert_eq!(table.transfer_time(st("O05"), st("G09")), Ok(1));
    }

    #[test]
    fn same_station_is_free() {
        let table = TransferTable::new();
        assert_eq!(table.transfer_time(st("R02"), st("R02")), Ok(0));
    }

    #[test]
    fn where_two_lines_meet() {
        let table = taipei_transfers();
        assert_eq!(
            table.line_transfer_stations(Line::BL, Line::Y),
            vec![(st("BL07"), st("Y16"), 11), (st("BL08"), st("Y17"), 9)]
        );
        assert_eq!(
            table.line_transfer_stations(Line::O, Line::R),
            vec![(st("O06"), st("R07"), 1), (st("O11"), st("R13"), 3)]
        );
        assert!(table.line_transfer_stations(Line::R, Line::Y).is_empty());
    }
}
