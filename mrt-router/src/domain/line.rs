//! Line and station identity.
//!
//! A station is identified by its line and a per-line sequence number.
//! Numbering is mostly contiguous but not a simple range: the Red line
//! starts at R02, the Yellow line at Y07, and the Orange line has a second
//! branch numbered O50-O54 that leaves the trunk at O12.

use std::fmt;
use std::ops::RangeInclusive;

/// Error returned when a station code or identity is not valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStation {
    /// The code does not look like `<line><two digits>`.
    #[error("invalid station code {0:?}: expected a line prefix followed by two digits")]
    Malformed(String),

    /// The line prefix is not one of the network's lines.
    #[error("unknown line {0:?}")]
    UnknownLine(String),

    /// The number is not used on this line.
    #[error("no station {number:02} on line {line}")]
    NoSuchStation { line: Line, number: u8 },
}

/// A metro line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    /// Tamsui-Xinyi line.
    R,
    /// Zhonghe-Xinlu line. Branches at O12.
    O,
    /// Songshan-Xindian line.
    G,
    /// Bannan line.
    BL,
    /// Wenhu line. No published per-station timetable.
    BR,
    /// Circular line (first stage).
    Y,
}

impl Line {
    /// All lines, in the order the network map lists them.
    pub const ALL: [Line; 6] = [Line::R, Line::O, Line::Y, Line::G, Line::BL, Line::BR];

    /// Parse a line prefix such as `"BL"`.
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        match s {
            "R" => Ok(Line::R),
            "O" => Ok(Line::O),
            "G" => Ok(Line::G),
            "BL" => Ok(Line::BL),
            "BR" => Ok(Line::BR),
            "Y" => Ok(Line::Y),
            _ => Err(InvalidStation::UnknownLine(s.to_string())),
        }
    }

    /// The line prefix used in station codes.
    pub fn code(self) -> &'static str {
        match self {
            Line::R => "R",
            Line::O => "O",
            Line::G => "G",
            Line::BL => "BL",
            Line::BR => "BR",
            Line::Y => "Y",
        }
    }

    /// Station numbers in use on this line.
    fn numbers(self) -> &'static [RangeInclusive<u8>] {
        match self {
            Line::R => &[2..=28],
            Line::O => &[1..=21, 50..=54],
            Line::G => &[1..=19],
            Line::BL => &[1..=23],
            Line::BR => &[1..=24],
            Line::Y => &[7..=20],
        }
    }

    /// Whether `number` identifies a station on this line.
    pub fn has_station(self, number: u8) -> bool {
        self.numbers().iter().any(|range| range.contains(&number))
    }

    /// All stations of the line in number order.
    pub fn stations(self) -> impl Iterator<Item = Station> {
        self.numbers()
            .iter()
            .flat_map(move |range| range.clone().map(move |number| Station { line: self, number }))
    }

    /// Bit for this line in a line-usage mask.
    pub fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validate a (line, number) pair without constructing a station.
pub fn valid_station(line: Line, number: u8) -> bool {
    line.has_station(number)
}

/// Last Orange line station shared by both branches.
pub const ORANGE_JUNCTION: u8 = 12;

/// First station number of the Orange line's Luzhou branch.
const LUZHOU_FIRST: u8 = 50;

/// Which part of a line a station belongs to.
///
/// Only the Orange line branches; every other station is on the trunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    /// Shared section (O01-O12 on the Orange line, everything elsewhere).
    Trunk,
    /// O13-O21, towards Huilong.
    Xinzhuang,
    /// O50-O54, towards Luzhou.
    Luzhou,
}

/// A valid station on the network.
///
/// Any `Station` value is valid by construction: the only public
/// constructors check the line's membership table.
///
/// # Examples
///
/// ```
/// use mrt_router::domain::{Line, Station};
///
/// let main = Station::parse("BL12").unwrap();
/// assert_eq!(main.line(), Line::BL);
/// assert_eq!(main.number(), 12);
/// assert_eq!(main.code(), "BL12");
///
/// // R01 was never built
/// assert!(Station::new(Line::R, 1).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Station {
    line: Line,
    number: u8,
}

impl Station {
    /// Create a station, checking that the number exists on the line.
    pub fn new(line: Line, number: u8) -> Result<Self, InvalidStation> {
        if line.has_station(number) {
            Ok(Self { line, number })
        } else {
            Err(InvalidStation::NoSuchStation { line, number })
        }
    }

    /// Unchecked constructor for the static network tables.
    pub(crate) const fn fixed(line: Line, number: u8) -> Self {
        Self { line, number }
    }

    /// Parse a station code such as `"R10"` or `"BL23"`.
    pub fn parse(code: &str) -> Result<Self, InvalidStation> {
        let bytes = code.as_bytes();
        if !(3..=4).contains(&bytes.len()) {
            return Err(InvalidStation::Malformed(code.to_string()));
        }

        let (prefix, digits) = bytes.split_at(bytes.len() - 2);
        if !prefix.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStation::Malformed(code.to_string()));
        }
        let number =
            parse_two_digits(digits).ok_or_else(|| InvalidStation::Malformed(code.to_string()))?;

        // Prefix is ASCII, so slicing by byte length is on a char boundary.
        let line = Line::parse(&code[..prefix.len()])?;
        Station::new(line, number)
    }

    /// The station's line.
    pub fn line(&self) -> Line {
        self.line
    }

    /// The station's number on its line.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// The station code, e.g. `"O05"`.
    pub fn code(&self) -> String {
        format!("{}{:02}", self.line.code(), self.number)
    }

    /// Branch of the line this station is on.
    pub fn branch(&self) -> Branch {
        match (self.line, self.number) {
            (Line::O, n) if n > ORANGE_JUNCTION && n < LUZHOU_FIRST => Branch::Xinzhuang,
            (Line::O, n) if n >= LUZHOU_FIRST => Branch::Luzhou,
            _ => Branch::Trunk,
        }
    }

    /// Whether this is the Orange line junction, O12.
    pub fn is_junction(&self) -> bool {
        self.line == Line::O && self.number == ORANGE_JUNCTION
    }

    /// Whether a single train can run between the two stations.
    ///
    /// False for stations on different lines, and for the two Orange
    /// branches: no service runs from Xinzhuang to Luzhou.
    pub fn shares_track(&self, other: &Station) -> bool {
        self.line == other.line
            && !matches!(
                (self.branch(), other.branch()),
                (Branch::Xinzhuang, Branch::Luzhou) | (Branch::Luzhou, Branch::Xinzhuang)
            )
    }

    /// Position along a through service. The Luzhou branch continues the
    /// numbering straight after the junction.
    pub(crate) fn track_position(&self) -> u8 {
        match self.branch() {
            Branch::Luzhou => ORANGE_JUNCTION + 1 + (self.number - LUZHOU_FIRST),
            _ => self.number,
        }
    }

    /// Adjacent stations on the same line.
    ///
    /// Usually `number ± 1`; the junction O12 also neighbours O50.
    pub fn line_neighbours(&self) -> Vec<Station> {
        let mut neighbours = Vec::with_capacity(3);

        if let Some(prev) = self.number.checked_sub(1) {
            if let Ok(station) = Station::new(self.line, prev) {
                neighbours.push(station);
            }
        }
        if let Ok(station) = Station::new(self.line, self.number + 1) {
            neighbours.push(station);
        }

        if self.is_junction() {
            neighbours.push(Station::fixed(Line::O, LUZHOU_FIRST));
        } else if self.line == Line::O && self.number == LUZHOU_FIRST {
            neighbours.push(Station::fixed(Line::O, ORANGE_JUNCTION));
        }

        neighbours
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({}{:02})", self.line.code(), self.number)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.line.code(), self.number)
    }
}

/// Parse two ASCII digit bytes into a u8.
pub(crate) fn parse_two_digits(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some((d1 * 10 + d2) as u8)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_station() -> impl Strategy<Value = Station> {
        let all: Vec<Station> = Line::ALL.iter().flat_map(|l| l.stations()).collect();
        proptest::sample::select(all)
    }

    proptest! {
        /// Encoding then decoding gives back the same station.
        #[test]
        fn code_roundtrip(station in any_station()) {
            prop_assert_eq!(Station::parse(&station.code()), Ok(station));
        }

        /// `new` accepts exactly the numbers in the membership table.
        #[test]
        fn new_agrees_with_table(line_idx in 0usize..6, number in 0u8..100) {
            let line = Line::ALL[line_idx];
            prop_assert_eq!(Station::new(line, number).is_ok(), valid_station(line, number));
        }

        /// Adjacency is symmetric.
        #[test]
        fn neighbours_symmetric(station in any_station()) {
            for next in station.line_neighbours() {
                prop_assert!(next.line_neighbours().contains(&station));
            }
        }
    }
}
