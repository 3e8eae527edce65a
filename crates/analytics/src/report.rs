use serde::{Deserialize, Serialize};

/// Summary statistics over the closed trades of a query.
///
/// This struct is the output of the `AnalyticsEngine` and is handed as-is to
/// whatever presents the numbers. `profit_factor` and `sortino` may be
/// `f64::INFINITY` when there are no losing trades.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub win_rate: f64,
    pub profit_factor: f64,
    /// Absolute currency drawdown, not a percentage.
    pub max_drawdown: f64,
    pub sharpe: f64,
    pub sortino: f64,
    pub expectancy: f64,
}

impl AnalyticsSummary {
    /// Creates a zeroed-out summary, the result for a query with no closed trades.
    pub fn new() -> Self {
        Self::default()
    }
}
