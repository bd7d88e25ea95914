//! Search configuration for the route planner.

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Interchange ceiling for the fastest and fewest-interchange queries.
    pub default_max_interchanges: usize,

    /// Candidate budget for the fastest and fewest-interchange queries.
    /// These run a single round.
    pub preset_budget: usize,

    /// Candidate budget of the first round of a constrained query.
    pub custom_initial_budget: usize,

    /// Largest candidate budget a constrained query widens to.
    pub custom_budget_cap: usize,

    /// Routes kept between rounds, as a multiple of the requested count.
    pub pool_factor: usize,

    /// Number of routes returned when the caller does not say.
    pub default_results: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_max_interchanges: usize,
        preset_budget: usize,
        custom_initial_budget: usize,
        custom_budget_cap: usize,
        pool_factor: usize,
        default_results: usize,
    ) -> Self {
        Self {
            default_max_interchanges,
            preset_budget,
            custom_initial_budget,
            custom_budget_cap,
            pool_factor,
            default_results,
        }
    }

    /// Pool size kept between rounds when asking for `k` routes.
    pub fn pool_limit(&self, k: usize) -> usize {
        k.saturating_mul(self.pool_factor.max(1))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_interchanges: 4,
            preset_budget: 6,
            custom_initial_budget: 6,
            custom_budget_cap: 100,
            pool_factor: 10,
            default_results: 3,
        }
    }
}
