//! Route ranking for search results.
//!
//! The order depends on what the caller asked to minimise:
//! 1. Time first: total minutes, then interchanges, then stations
//! 2. Interchanges first: interchanges, then total minutes, then stations
//! 3. Neither: more must-use lines covered, then stations

use std::cmp::Ordering;
use std::collections::HashSet;

use super::constraints::RouteConstraints;
use super::engine::RoutedPath;

/// Compare two routes under the caller's preferences. `Less` means `a`
/// is better.
pub fn compare_routes(a: &RoutedPath, b: &RoutedPath, constraints: &RouteConstraints) -> Ordering {
    let a_len = a.path().len();
    let b_len = b.path().len();

    if constraints.minimize_time {
        (a.total_minutes(), a.interchange_count(), a_len).cmp(&(
            b.total_minutes(),
            b.interchange_count(),
            b_len,
        ))
    } else if constraints.minimize_interchanges {
        (a.interchange_count(), a.total_minutes(), a_len).cmp(&(
            b.interchange_count(),
            b.total_minutes(),
            b_len,
        ))
    } else {
        let a_lines = constraints.must_lines_covered(a.path());
        let b_lines = constraints.must_lines_covered(b.path());
        b_lines.cmp(&a_lines).then(a_len.cmp(&b_len))
    }
}

/// Whether `a` ranks strictly ahead of `b`.
pub fn better_than(a: &RoutedPath, b: &RoutedPath, constraints: &RouteConstraints) -> bool {
    compare_routes(a, b, constraints) == Ordering::Less
}

/// Sort routes best-first. Ties keep their incoming order.
pub fn rank_routes(mut routes: Vec<RoutedPath>, constraints: &RouteConstraints) -> Vec<RoutedPath> {
    routes.sort_by(|a, b| compare_routes(a, b, constraints));
    routes
}

/// Drop routes whose station sequence already appeared, keeping the first.
pub fn deduplicate(routes: Vec<RoutedPath>) -> Vec<RoutedPath> {
    let mut seen = HashSet::with_capacity(routes.len());
    routes
        .into_iter()
        .filter(|route| seen.insert(route.path().clone()))
        .collect()
}
