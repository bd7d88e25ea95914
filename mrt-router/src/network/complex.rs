//! Interchange complexes.
//!
//! A complex is a physical interchange where several station codes share
//! one site, such as Taipei Main (R10 and BL12). Stations outside every
//! complex form a node on their own.

use crate::domain::{Line, Station};

const fn s(line: Line, number: u8) -> Station {
    Station::fixed(line, number)
}

/// Every multi-station interchange on the network.
static COMPLEXES: &[&[Station]] = &[
    &[s(Line::R, 5), s(Line::BR, 9)],
    &[s(Line::R, 7), s(Line::O, 6)],
    &[s(Line::R, 8), s(Line::G, 10)],
    &[s(Line::R, 10), s(Line::BL, 12)],
    &[s(Line::R, 11), s(Line::G, 14)],
    &[s(Line::R, 13), s(Line::O, 11)],
    &[s(Line::G, 4), s(Line::Y, 7)],
    &[s(Line::G, 9), s(Line::O, 5)],
    &[s(Line::G, 12), s(Line::BL, 11)],
    &[s(Line::G, 15), s(Line::O, 8)],
    &[s(Line::G, 16), s(Line::BR, 11)],
    &[s(Line::BL, 7), s(Line::Y, 16)],
    &[s(Line::BL, 8), s(Line::Y, 17)],
    &[s(Line::BL, 14), s(Line::O, 7)],
    &[s(Line::BL, 15), s(Line::BR, 10)],
    &[s(Line::BL, 23), s(Line::BR, 24)],
    &[s(Line::Y, 11), s(Line::O, 2)],
    &[s(Line::Y, 18), s(Line::O, 17)],
];

/// The set of station codes sharing one physical site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationNode<'a> {
    members: NodeMembers<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeMembers<'a> {
    Complex(&'a [Station]),
    Single(Station),
}

impl StationNode<'static> {
    /// The node containing `station`.
    pub fn of(station: Station) -> Self {
        let members = COMPLEXES
            .iter()
            .find(|complex| complex.contains(&station))
            .map_or(NodeMembers::Single(station), |complex| NodeMembers::Complex(*complex));
        Self { members }
    }
}

impl StationNode<'_> {
    /// Stations in the node, in network order.
    pub fn stations(&self) -> Vec<Station> {
        match self.members {
            NodeMembers::Complex(members) => members.to_vec(),
            NodeMembers::Single(station) => vec![station],
        }
    }

    /// Whether the node serves more than one line.
    pub fn is_interchange(&self) -> bool {
        matches!(self.members, NodeMembers::Complex(_))
    }

    pub fn contains(&self, station: Station) -> bool {
        match self.members {
            NodeMembers::Complex(members) => members.contains(&station),
            NodeMembers::Single(s) => s == station,
        }
    }
}

/// All stations sharing a site with `station`, including itself.
pub fn equivalent_stations(station: Station) -> Vec<Station> {
    StationNode::of(station).stations()
}

/// Whether `station` is part of a multi-line interchange.
pub fn is_interchange(station: Station) -> bool {
    StationNode::of(station).is_interchange()
}

/// Every interchange complex on the network.
pub fn complexes() -> impl Iterator<Item = StationNode<'static>> {
    COMPLEXES.iter().map(|members| StationNode {
        members: NodeMembers::Complex(members),
    })
}
