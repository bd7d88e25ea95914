//! Route engine.
//!
//! Answers "how do I get from A to B, leaving at this time on this day?".
//! Candidate paths come from a breadth-first search with a budget; each
//! candidate is projected onto the timetable, infeasible ones are
//! dropped, and the rest are ranked. Constrained queries widen the budget
//! round by round until enough routes survive.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::domain::{DayType, Line, Path, ServiceTime, Station};
use crate::network::TransferTable;
use crate::timetable::{ScheduleSource, Timetable};

use super::candidates::candidate_paths;
use super::config::SearchConfig;
use super::constraints::{MAX_CHECKPOINTS, RouteConstraints};
use super::projector::{ProjectionError, StopTime, path_eta};
use super::rank::{deduplicate, rank_routes};

/// Error from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The query can never be answered as asked.
    #[error("invalid route request: {0}")]
    InvalidRequest(String),
}

/// Where and when a journey starts and where it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteQuery {
    pub source: Station,
    pub destination: Station,
    /// When the rider is at the source platform.
    pub departure: ServiceTime,
    pub day: DayType,
}

impl RouteQuery {
    pub fn new(source: Station, destination: Station, departure: ServiceTime, day: DayType) -> Self {
        Self {
            source,
            destination,
            departure,
            day,
        }
    }
}

/// A path with its timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedPath {
    path: Path,
    times: Vec<StopTime>,
    total_minutes: u32,
    interchange_count: usize,
}

impl RoutedPath {
    /// A journey that does not move.
    fn stationary(station: Station, at: ServiceTime) -> Self {
        Self {
            path: Path::single(station),
            times: vec![StopTime {
                arrival: at,
                departure: at,
            }],
            total_minutes: 0,
            interchange_count: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Arrival and departure at each station of the path.
    pub fn times(&self) -> &[StopTime] {
        &self.times
    }

    /// Minutes from the query time to arrival at the destination.
    pub fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    pub fn interchange_count(&self) -> usize {
        self.interchange_count
    }

    /// Departure from the first station.
    pub fn departure(&self) -> Option<ServiceTime> {
        self.times.first().map(|t| t.departure)
    }

    /// Arrival at the last station.
    pub fn arrival(&self) -> Option<ServiceTime> {
        self.times.last().map(|t| t.arrival)
    }

    /// Whether any ride uses estimated departures (the Brown line).
    pub fn is_approximate(&self) -> bool {
        self.path
            .stations()
            .windows(2)
            .any(|w| w[0].line() == Line::BR && w[1].line() == Line::BR)
    }

    /// Route with a made-up timeline, for ranking tests.
    #[cfg(test)]
    pub(crate) fn synthetic(path: Path, total_minutes: u32, interchange_count: usize) -> Self {
        Self {
            path,
            times: Vec::new(),
            total_minutes,
            interchange_count,
        }
    }
}

/// Route planner over the static network and a timetable.
pub struct Planner<'a, S: ScheduleSource> {
    transfers: &'a TransferTable,
    timetable: &'a Timetable<S>,
    config: &'a SearchConfig,
}

impl<'a, S: ScheduleSource> Planner<'a, S> {
    pub fn new(
        transfers: &'a TransferTable,
        timetable: &'a Timetable<S>,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            transfers,
            timetable,
            config,
        }
    }

    /// Up to `k` routes, fastest first.
    pub fn route_default(&self, query: &RouteQuery, k: usize) -> Result<Vec<RoutedPath>, RouteError> {
        let constraints = RouteConstraints::fastest(self.config.default_max_interchanges);
        let budget = self.config.preset_budget;
        self.route_engine(query, &constraints, k, budget, budget)
    }

    /// Up to `k` routes, fewest interchanges first.
    pub fn route_least_interchange(
        &self,
        query: &RouteQuery,
        k: usize,
    ) -> Result<Vec<RoutedPath>, RouteError> {
        let constraints = RouteConstraints::fewest_interchanges(self.config.default_max_interchanges);
        let budget = self.config.preset_budget;
        self.route_engine(query, &constraints, k, budget, budget)
    }

    /// Up to `k` routes satisfying `constraints`, widening the search as
    /// far as the configured cap.
    pub fn route_custom(
        &self,
        query: &RouteQuery,
        constraints: &RouteConstraints,
        k: usize,
    ) -> Result<Vec<RoutedPath>, RouteError> {
        self.route_engine(
            query,
            constraints,
            k,
            self.config.custom_initial_budget,
            self.config.custom_budget_cap,
        )
    }

    /// Search in rounds, doubling the candidate budget from
    /// `initial_budget` until `k` routes survive or the budget reaches
    /// `hard_cap`. The last round runs at exactly `hard_cap`.
    pub fn route_engine(
        &self,
        query: &RouteQuery,
        constraints: &RouteConstraints,
        k: usize,
        initial_budget: usize,
        hard_cap: usize,
    ) -> Result<Vec<RoutedPath>, RouteError> {
        validate(constraints, k, initial_budget, hard_cap)?;

        if query.source == query.destination {
            return Ok(vec![RoutedPath::stationary(query.source, query.departure)]);
        }

        let rules = constraints.resolve();
        let pool_limit = self.config.pool_limit(k);
        let mut seen: HashSet<Path> = HashSet::new();
        let mut pool: Vec<RoutedPath> = Vec::new();
        let mut budget = initial_budget.min(hard_cap);

        loop {
            let candidates =
                candidate_paths(self.transfers, query.source, query.destination, budget, &rules);
            let found = candidates.len();

            for path in candidates {
                if !seen.insert(path.clone()) {
                    continue;
                }
                match self.evaluate(path, query) {
                    Ok(route) => pool.push(route),
                    Err(e) => trace!(error = %e, "dropping candidate"),
                }
            }

            pool.retain(|route| constraints.covers_must_lines(route.path()));
            pool = rank_routes(pool, constraints);
            pool.truncate(pool_limit);

            debug!(budget, found, pool = pool.len(), "search round complete");

            // A search that found fewer paths than its budget has found them all.
            if pool.len() >= k || budget >= hard_cap || found < budget {
                break;
            }
            budget = budget.saturating_mul(2).min(hard_cap);
        }

        let checkpoints = rules.checkpoints();
        let mut routes = Vec::with_capacity(pool.len());
        for route in pool {
            let simplified = route.path.simplify(checkpoints);
            match self.evaluate(simplified, query) {
                Ok(route) => routes.push(route),
                Err(e) => trace!(path = %route.path, error = %e, "simplified route infeasible"),
            }
        }

        let mut routes = deduplicate(rank_routes(routes, constraints));
        routes.truncate(k);

        debug!(
            source = %query.source,
            destination = %query.destination,
            routes = routes.len(),
            "route query complete"
        );
        Ok(routes)
    }

    /// Project `path` onto the timetable.
    pub fn evaluate(&self, path: Path, query: &RouteQuery) -> Result<RoutedPath, ProjectionError> {
        let times = path_eta(&path, query.departure, query.day, self.transfers, self.timetable)?;
        let arrival = times.last().map_or(query.departure, |t| t.arrival);
        let total_minutes = arrival.minutes().saturating_sub(query.departure.minutes());
        let interchange_count = path.interchange_count();

        Ok(RoutedPath {
            path,
            times,
            total_minutes,
            interchange_count,
        })
    }
}

fn validate(
    constraints: &RouteConstraints,
    k: usize,
    initial_budget: usize,
    hard_cap: usize,
) -> Result<(), RouteError> {
    if k == 0 {
        return Err(RouteError::InvalidRequest(
            "at least one route must be requested".to_string(),
        ));
    }
    if initial_budget == 0 || hard_cap == 0 {
        return Err(RouteError::InvalidRequest(
            "candidate budget must be positive".to_string(),
        ));
    }
    if constraints.must_stations.len() > MAX_CHECKPOINTS {
        return Err(RouteError::InvalidRequest(format!(
            "at most {MAX_CHECKPOINTS} must-visit stations are supported, got {}",
            constraints.must_stations.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::path_of;
    use crate::network::taipei_transfers;
    use crate::timetable::InMemorySchedule;

    fn st(code: &str) -> Station {
        Station::parse(code).unwrap()
    }

    fn hm(s: &str) -> ServiceTime {
        ServiceTime::parse_hhmm(s).unwrap()
    }

    /// Trains every five minutes from 06:00 to 24:00 from every station
    /// towards every terminal it can reach.
    fn every_five_minutes() -> Timetable<InMemorySchedule> {
        let mut schedule = InMemorySchedule::new();
        for line in Line::ALL {
            if line == Line::BR {
                continue;
            }
            let terminals: Vec<Station> = line
                .stations()
                .filter(|s| s.line_neighbours().len() == 1)
                .collect();
            let group = DayType::Monday.group(line);
            for station in line.stations() {
                for &terminal in &terminals {
                    if terminal != station && station.shares_track(&terminal) {
                        schedule.add_service(station, group, terminal, hm("06:00"), hm("24:00"), 5);
                    }
                }
            }
        }
        Timetable::new(schedule)
    }

    fn query(from: &str, to: &str, at: &str) -> RouteQuery {
        RouteQuery::new(st(from), st(to), hm(at), DayType::Monday)
    }

    fn assert_well_formed(routes: &[RoutedPath], query: &RouteQuery) {
        for route in routes {
            assert_eq!(route.path().first(), Some(query.source));
            assert_eq!(route.path().last(), Some(query.destination));
            assert_eq!(route.times().len(), route.path().len());
            let flat: Vec<ServiceTime> = route
                .times()
                .iter()
                .flat_map(|t| [t.arrival, t.departure])
                .collect();
            assert!(flat.windows(2).all(|w| w[0] <= w[1]), "{:?}", route);
            assert_eq!(
                route.arrival().unwrap().minutes() - query.departure.minutes(),
                route.total_minutes()
            );
        }
    }

    #[test]
    fn same_station_is_a_trivial_route() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let routes = planner.route_default(&query("R10", "R10", "08:00"), 3).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path(), &path_of(&["R10"]));
        assert_eq!(routes[0].total_minutes(), 0);
        assert_eq!(routes[0].interchange_count(), 0);
    }

    #[test]
    fn one_transfer_query() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let q = query("R08", "G12", "08:03");
        let routes = planner.route_default(&q, 3).unwrap();
        assert_well_formed(&routes, &q);

        let best = &routes[0];
        assert_eq!(best.path(), &path_of(&["R08", "G10", "G12"]));
        assert_eq!(best.interchange_count(), 1);
        // 1 minute walk, wait from 08:04 to 08:05, 4 minutes to G12
        assert_eq!(best.total_minutes(), 1 + 1 + 4);
        assert_eq!(best.arrival(), Some(hm("08:09")));
    }

    #[test]
    fn results_are_sorted_fastest_first() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let q = query("R05", "O05", "09:12");
        let routes = planner.route_default(&q, 3).unwrap();
        assert!(!routes.is_empty());
        assert!(routes.len() <= 3);
        assert_well_formed(&routes, &q);
        for pair in routes.windows(2) {
            let a = (pair[0].total_minutes(), pair[0].interchange_count(), pair[0].path().len());
            let b = (pair[1].total_minutes(), pair[1].interchange_count(), pair[1].path().len());
            assert!(a <= b);
        }
    }

    #[test]
    fn least_interchange_puts_direct_first() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let routes = planner
            .route_least_interchange(&query("R05", "R15", "10:00"), 3)
            .unwrap();
        assert_eq!(routes[0].interchange_count(), 0);
        assert_eq!(routes[0].path(), &path_of(&["R05", "R15"]));
        assert!(routes.windows(2).all(|w| w[0].interchange_count() <= w[1].interchange_count()));
    }

    #[test]
    fn orange_branch_switch_counts_as_interchange() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let routes = planner.route_default(&query("O15", "O52", "10:00"), 1).unwrap();
        assert_eq!(routes[0].path(), &path_of(&["O15", "O12", "O52"]));
        assert_eq!(routes[0].interchange_count(), 1);
    }

    #[test]
    fn ceiling_zero_without_direct_ride_is_empty() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let routes = planner
            .route_custom(&query("R10", "G01", "08:00"), &RouteConstraints::fastest(0), 3)
            .unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn unreachable_checkpoint_is_empty() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);
        let q = query("R10", "R15", "08:00");

        let constrained = RouteConstraints {
            must_stations: vec![st("Y20")],
            ..RouteConstraints::fastest(0)
        };
        assert!(planner.route_custom(&q, &constrained, 3).unwrap().is_empty());
        assert!(!planner.route_custom(&q, &RouteConstraints::fastest(0), 3).unwrap().is_empty());
    }

    #[test]
    fn avoided_stations_are_not_used() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);
        let q = query("R05", "R15", "08:00");

        let constraints = RouteConstraints {
            avoid_stations: vec![st("BL12")],
            ..RouteConstraints::fastest(4)
        };
        let routes = planner.route_custom(&q, &constraints, 3).unwrap();
        assert!(!routes.is_empty());
        assert_well_formed(&routes, &q);
        for route in &routes {
            assert!(!route.path().contains(st("R10")));
            assert!(!route.path().contains(st("BL12")));
        }
    }

    #[test]
    fn checkpoints_survive_simplification() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let constraints = RouteConstraints {
            must_stations: vec![st("R10")],
            ..RouteConstraints::fastest(0)
        };
        let routes = planner
            .route_custom(&query("R05", "R15", "08:00"), &constraints, 1)
            .unwrap();
        assert_eq!(routes[0].path(), &path_of(&["R05", "R10", "R15"]));
    }

    #[test]
    fn must_line_is_honoured() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let constraints = RouteConstraints {
            must_lines: vec![Line::G],
            ..RouteConstraints::fastest(4)
        };
        let routes = planner
            .route_custom(&query("R05", "R15", "08:00"), &constraints, 2)
            .unwrap();
        assert!(!routes.is_empty());
        assert!(routes.iter().all(|r| r.path().uses_line(Line::G)));
    }

    #[test]
    fn brown_rides_are_approximate() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let routes = planner.route_default(&query("BR10", "BR13", "11:00"), 1).unwrap();
        assert!(routes[0].is_approximate());
        assert_eq!(routes[0].path(), &path_of(&["BR10", "BR13"]));
    }

    #[test]
    fn invalid_requests() {
        let transfers = taipei_transfers();
        let timetable = every_five_minutes();
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);
        let q = query("R05", "R15", "08:00");

        assert!(matches!(
            planner.route_default(&q, 0),
            Err(RouteError::InvalidRequest(_))
        ));
        assert!(matches!(
            planner.route_engine(&q, &RouteConstraints::default(), 3, 0, 10),
            Err(RouteError::InvalidRequest(_))
        ));

        let too_many = RouteConstraints {
            must_stations: Line::R.stations().chain(Line::G.stations()).take(33).collect(),
            ..RouteConstraints::default()
        };
        assert!(matches!(
            planner.route_custom(&q, &too_many, 3),
            Err(RouteError::InvalidRequest(_))
        ));
    }

    #[test]
    fn no_service_means_no_routes() {
        let transfers = taipei_transfers();
        let timetable = Timetable::new(InMemorySchedule::new());
        let config = SearchConfig::default();
        let planner = Planner::new(&transfers, &timetable, &config);

        let routes = planner.route_default(&query("R05", "R15", "08:00"), 3).unwrap();
        assert!(routes.is_empty());
    }
}
