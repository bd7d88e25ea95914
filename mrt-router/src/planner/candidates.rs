//! Candidate path search.
//!
//! Breadth-first search over station sequences, from fewest hops up. Each
//! search state carries its path, the interchanges made so far, and two
//! bitmasks: checkpoint progress and the lines touched. A state is only
//! expanded if no earlier state reached the same (station, checkpoints,
//! lines) with at most as many interchanges.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use super::constraints::{MAX_CHECKPOINTS, ResolvedConstraints};
use crate::domain::{Path, Station};
use crate::network::TransferTable;

/// Partial route at the search frontier.
struct SearchState {
    station: Station,
    path: Path,
    interchanges: usize,
    checkpoints: u32,
    lines: u8,
}

/// Find up to `max_paths` cycle-free paths from `source` to `destination`.
///
/// Paths come out in breadth-first order, so shorter station sequences
/// first. Every path avoids forbidden stations and lines, stays within
/// the interchange ceiling, visits the checkpoints in order and touches
/// every must-use line. Returns an empty list if an endpoint is
/// forbidden or `max_paths` is zero.
pub fn candidate_paths(
    transfers: &TransferTable,
    source: Station,
    destination: Station,
    max_paths: usize,
    rules: &ResolvedConstraints<'_>,
) -> Vec<Path> {
    let checkpoints = rules.checkpoints();
    if max_paths == 0
        || checkpoints.len() > MAX_CHECKPOINTS
        || rules.is_forbidden(source)
        || rules.is_forbidden(destination)
    {
        return Vec::new();
    }

    let all_checkpoints = full_mask(checkpoints.len());
    let must_lines = rules.must_line_mask();
    let max_interchanges = rules.max_interchanges();

    let mut results = Vec::new();
    let mut expanded: HashMap<(Station, u32, u8), usize> = HashMap::new();
    let mut queue = VecDeque::new();
    queue.push_back(SearchState {
        station: source,
        path: Path::single(source),
        interchanges: 0,
        checkpoints: advance_checkpoints(0, source, checkpoints),
        lines: source.line().bit(),
    });

    while let Some(state) = queue.pop_front() {
        if state.station == destination {
            if state.checkpoints == all_checkpoints && state.lines & must_lines == must_lines {
                trace!(path = %state.path, interchanges = state.interchanges, "candidate found");
                results.push(state.path);
                if results.len() >= max_paths {
                    break;
                }
            }
            continue;
        }

        match expanded.entry((state.station, state.checkpoints, state.lines)) {
            Entry::Occupied(mut best) => {
                if *best.get() <= state.interchanges {
                    continue;
                }
                best.insert(state.interchanges);
            }
            Entry::Vacant(slot) => {
                slot.insert(state.interchanges);
            }
        }

        for (next, interchanges) in successors(transfers, &state) {
            if interchanges > max_interchanges
                || rules.is_forbidden(next)
                || state.path.contains(next)
            {
                continue;
            }
            queue.push_back(SearchState {
                station: next,
                path: state.path.extended(next),
                interchanges,
                checkpoints: advance_checkpoints(state.checkpoints, next, checkpoints),
                lines: state.lines | next.line().bit(),
            });
        }
    }

    debug!(
        %source,
        %destination,
        max_paths,
        found = results.len(),
        expanded = expanded.len(),
        "candidate search complete"
    );
    results
}

/// Neighbouring stations with the interchange count on arrival there.
///
/// Riding on counts a change when it crosses between the two Orange
/// branches at the junction.
fn successors(transfers: &TransferTable, state: &SearchState) -> Vec<(Station, usize)> {
    let here = state.station;
    let stations = state.path.stations();
    let prev = stations.len().checked_sub(2).map(|i| stations[i]);

    let rides = here.line_neighbours().into_iter().map(|next| {
        let switch = prev.is_some_and(|p| p.line() == here.line() && !p.shares_track(&next));
        (next, state.interchanges + usize::from(switch))
    });
    let changes = transfers
        .transfers_from(here)
        .iter()
        .map(|(next, _)| (*next, state.interchanges + 1));

    rides.chain(changes).collect()
}

/// Mark the next checkpoint(s) if `station` is the one due.
fn advance_checkpoints(mut mask: u32, station: Station, checkpoints: &[Station]) -> u32 {
    loop {
        let next = mask.trailing_ones() as usize;
        match checkpoints.get(next) {
            Some(due) if *due == station => mask |= 1 << next,
            _ => return mask,
        }
    }
}

fn full_mask(count: usize) -> u32 {
    if count >= MAX_CHECKPOINTS {
        u32::MAX
    } else {
        (1u32 << count) - 1
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Line;
    use crate::network::taipei_transfers;
    use crate::planner::RouteConstraints;
    use proptest::prelude::*;

    fn any_station() -> impl Strategy<Value = Station> {
        let all: Vec<Station> = Line::ALL.iter().flat_map(|l| l.stations()).collect();
        proptest::sample::select(all)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        /// Every candidate is a connected, cycle-free path between the
        /// endpoints within the interchange ceiling.
        #[test]
        fn candidates_are_well_formed(
            from in any_station(),
            to in any_station(),
            ceiling in 0usize..3,
        ) {
            let transfers = taipei_transfers();
            let constraints = RouteConstraints::fastest(ceiling);
            let paths = candidate_paths(&transfers, from, to, 4, &constraints.resolve());

            prop_assert!(paths.len() <= 4);
            for path in &paths {
                prop_assert_eq!(path.first(), Some(from));
                prop_assert_eq!(path.last(), Some(to));
                prop_assert!(path.interchange_count() <= ceiling);

                let stations = path.stations();
                for (i, s) in stations.iter().enumerate() {
                    prop_assert!(!stations[i + 1..].contains(s));
                }
                for pair in stations.windows(2) {
                    let linked = pair[0].line_neighbours().contains(&pair[1])
                        || transfers.can_transfer(pair[0], pair[1]);
                    prop_assert!(linked, "{} -> {}", pair[0], pair[1]);
                }
            }
        }
    }
}
