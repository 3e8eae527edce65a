use crate::metrics;
use crate::report::AnalyticsSummary;
use core_types::{Side, Trade};

/// A stateless calculator for deriving performance metrics from journal trades.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `trades` - Trades in ascending `entry_time` order, as returned by the
    ///   store. Open trades are ignored.
    ///
    /// # Returns
    ///
    /// The `AnalyticsSummary` over the closed trades. This never fails.
    pub fn calculate(&self, trades: &[Trade]) -> AnalyticsSummary {
        let returns = self.closed_returns(trades);
        tracing::debug!(
            trades = trades.len(),
            closed = returns.len(),
            "Calculating analytics summary."
        );
        self.calculate_from_returns(&returns)
    }

    /// Calculates the summary from an already ordered series of realized returns.
    pub fn calculate_from_returns(&self, returns: &[f64]) -> AnalyticsSummary {
        if returns.is_empty() {
            return AnalyticsSummary::new();
        }

        let equity = metrics::equity_curve(returns);
        AnalyticsSummary {
            win_rate: metrics::win_rate(returns),
            profit_factor: metrics::profit_factor(returns),
            max_drawdown: metrics::max_drawdown(&equity),
            sharpe: metrics::sharpe(returns),
            sortino: metrics::sortino(returns),
            expectancy: metrics::expectancy(returns),
        }
    }

    /// Realized returns of the closed trades, preserving input order.
    pub fn closed_returns(&self, trades: &[Trade]) -> Vec<f64> {
        trades.iter().filter_map(Self::realized_return).collect()
    }

    /// Net profit of a closed trade after fees, `None` while it is still open.
    pub fn realized_return(trade: &Trade) -> Option<f64> {
        let exit_price = trade.exit_price?;
        let gross = match trade.side {
            Side::Short => (trade.entry_price - exit_price) * trade.quantity,
            Side::Long => (exit_price - trade.entry_price) * trade.quantity,
        };
        Some(gross - trade.fees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap() + Duration::minutes(minutes)
    }

    fn closed(side: Side, entry: f64, exit: f64, qty: f64, fees: f64, minute: i64) -> Trade {
        Trade::new("AAPL", side, at(minute), entry, qty)
            .closed_at(at(minute + 5), exit)
            .with_fees(fees)
    }

    #[test]
    fn long_and_short_returns_net_of_fees() {
        let long = closed(Side::Long, 100.0, 110.0, 2.0, 1.0, 0);
        let short = closed(Side::Short, 100.0, 90.0, 3.0, 0.5, 1);
        assert_eq!(AnalyticsEngine::realized_return(&long), Some(19.0));
        assert_eq!(AnalyticsEngine::realized_return(&short), Some(29.5));
    }

    #[test]
    fn open_trades_have_no_return() {
        let open = Trade::new("AAPL", Side::Long, at(0), 100.0, 1.0);
        assert_eq!(AnalyticsEngine::realized_return(&open), None);
    }

    #[test]
    fn summary_skips_open_trades() {
        let engine = AnalyticsEngine::new();
        let trades = vec![
            closed(Side::Long, 100.0, 110.0, 1.0, 0.0, 0),
            Trade::new("AAPL", Side::Long, at(1), 100.0, 1.0),
            closed(Side::Short, 50.0, 55.0, 1.0, 0.0, 2),
        ];

        assert_eq!(engine.closed_returns(&trades), vec![10.0, -5.0]);

        let summary = engine.calculate(&trades);
        assert_eq!(summary.win_rate, 0.5);
        assert_eq!(summary.profit_factor, 2.0);
        assert_eq!(summary.max_drawdown, 5.0);
        assert_eq!(summary.expectancy, 2.5);
    }

    #[test]
    fn no_closed_trades_is_zero_summary() {
        let engine = AnalyticsEngine::new();
        let trades = vec![Trade::new("AAPL", Side::Long, at(0), 100.0, 1.0)];
        assert_eq!(engine.calculate(&trades), AnalyticsSummary::new());
        assert_eq!(engine.calculate(&[]), AnalyticsSummary::new());
    }

    #[test]
    fn winning_only_series_reports_infinite_ratios() {
        let engine = AnalyticsEngine::new();
        let summary = engine.calculate_from_returns(&[5.0, 10.0]);
        assert_eq!(summary.profit_factor, f64::INFINITY);
        assert_eq!(summary.sortino, f64::INFINITY);
        assert_eq!(summary.max_drawdown, 0.0);
        assert_eq!(summary.win_rate, 1.0);
    }
}
