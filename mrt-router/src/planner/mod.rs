//! Route planning.
//!
//! Answers "how do I get from this station to that one, leaving now?".
//! A breadth-first search proposes station sequences that satisfy the
//! caller's constraints, the projector times them against the timetable,
//! and the engine ranks the feasible ones.

mod candidates;
mod config;
mod constraints;
mod engine;
mod projector;
mod rank;

pub use candidates::candidate_paths;
pub use config::SearchConfig;
pub use constraints::{MAX_CHECKPOINTS, ResolvedConstraints, RouteConstraints};
pub use engine::{Planner, RouteError, RouteQuery, RoutedPath};
pub use projector::{ProjectionError, StopTime, path_eta, perfect_path_duration, perfect_path_eta};
pub use rank::{better_than, compare_routes, deduplicate, rank_routes};
