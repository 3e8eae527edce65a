//! Pure performance metrics over a series of realized per-trade returns.
//!
//! Every function here is total: an empty series, a series with no losses or
//! one with zero variance all produce a defined number. `f64::INFINITY` is a
//! legitimate result for [`profit_factor`] and [`sortino`].

/// Running cumulative sum of `returns`, one point per return.
pub fn equity_curve(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(0.0, |equity, r| {
            *equity += r;
            Some(*equity)
        })
        .collect()
}

/// Fraction of returns strictly greater than zero.
pub fn win_rate(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let wins = returns.iter().filter(|r| **r > 0.0).count();
    wins as f64 / returns.len() as f64
}

/// Gross profit divided by the magnitude of gross loss.
///
/// With no losing returns this is `+inf` when there was any profit and `0`
/// otherwise.
pub fn profit_factor(returns: &[f64]) -> f64 {
    let (gross_profit, gross_loss) =
        returns
            .iter()
            .fold((0.0, 0.0), |(profit, loss), &r| {
                if r > 0.0 {
                    (profit + r, loss)
                } else if r < 0.0 {
                    (profit, loss - r)
                } else {
                    (profit, loss)
                }
            });

    if gross_loss == 0.0 {
        if gross_profit == 0.0 {
            return 0.0;
        }
        return f64::INFINITY;
    }
    gross_profit / gross_loss
}

/// Arithmetic mean return per trade.
pub fn expectancy(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().sum::<f64>() / returns.len() as f64
}

/// Mean over population standard deviation, risk-free rate fixed at zero.
pub fn sharpe(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let mean = expectancy(returns);
    let variance = returns
        .iter()
        .map(|r| (r - mean) * (r - mean))
        .sum::<f64>()
        / returns.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return 0.0;
    }
    mean / std_dev
}

/// Mean over downside deviation.
///
/// The downside deviation is the root-mean-square of the raw negative returns
/// themselves, not of their distance from the mean.
pub fn sortino(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let mean = expectancy(returns);
    let (downside_ss, downside_n) = returns
        .iter()
        .filter(|r| **r < 0.0)
        .fold((0.0, 0usize), |(ss, n), r| (ss + r * r, n + 1));

    if downside_n == 0 {
        return f64::INFINITY;
    }
    let downside_dev = (downside_ss / downside_n as f64).sqrt();
    if downside_dev == 0.0 {
        return f64::INFINITY;
    }
    mean / downside_dev
}

/// Largest absolute peak-to-trough decline of an equity curve.
///
/// Equal to the maximum of `equity[i] - equity[j]` over all `i < j`, floored
/// at zero, computed in one pass with a running peak.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let Some((&first, rest)) = equity.split_first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_dd = 0.0;
    for &value in rest {
        let drawdown = peak - value;
        if drawdown > max_dd {
            max_dd = drawdown;
        }
        if value > peak {
            peak = value;
        }
    }
    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairwise_drawdown(equity: &[f64]) -> f64 {
        let mut max_dd = 0.0;
        for i in 0..equity.len() {
            for j in i + 1..equity.len() {
                let dd = equity[i] - equity[j];
                if dd > max_dd {
                    max_dd = dd;
                }
            }
        }
        max_dd
    }

    #[test]
    fn drawdown_peak_to_trough() {
        assert_eq!(max_drawdown(&[100.0, 120.0, 90.0, 95.0, 80.0, 130.0]), 40.0);
    }

    #[test]
    fn drawdown_is_absolute_not_percent() {
        assert_eq!(max_drawdown(&[100.0, 200.0, 150.0]), 50.0);
    }

    #[test]
    fn drawdown_of_rising_curve_is_zero() {
        assert_eq!(max_drawdown(&[]), 0.0);
        assert_eq!(max_drawdown(&[5.0]), 0.0);
        assert_eq!(max_drawdown(&[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn profit_factor_and_win_rate_on_small_set() {
        let returns = [10.0, -5.0, 20.0, -10.0];
        assert!(profit_factor(&returns) > 1.0);
        assert_eq!(profit_factor(&returns), 2.0);
        assert_eq!(win_rate(&returns), 0.5);
    }

    #[test]
    fn sortino_uses_downside_only() {
        let returns = [1.0, -1.0, 2.0, -2.0, 3.0];
        let s = sortino(&returns);
        assert!(s > 0.0);
        // mean 0.6, downside rms sqrt((1 + 4) / 2)
        let expected = 0.6 / (2.5f64).sqrt();
        assert!((s - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_series_is_zero() {
        assert_eq!(win_rate(&[]), 0.0);
        assert_eq!(expectancy(&[]), 0.0);
        assert_eq!(sharpe(&[]), 0.0);
        assert_eq!(profit_factor(&[]), 0.0);
        assert_eq!(sortino(&[]), 0.0);
        assert!(equity_curve(&[]).is_empty());
    }

    #[test]
    fn no_losses_is_infinite() {
        assert_eq!(profit_factor(&[1.0, 2.0]), f64::INFINITY);
        assert_eq!(profit_factor(&[0.0, 0.0]), 0.0);
        assert_eq!(sortino(&[1.0, 2.0]), f64::INFINITY);
        assert_eq!(sortino(&[0.0]), f64::INFINITY);
    }

    #[test]
    fn sharpe_with_zero_variance_is_zero() {
        assert_eq!(sharpe(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn sharpe_uses_population_std_dev() {
        // mean 2, population std dev 1
        let s = sharpe(&[1.0, 3.0]);
        assert!((s - 2.0).abs() < 1e-12);
    }

    #[test]
    fn equity_curve_accumulates_in_order() {
        assert_eq!(equity_curve(&[10.0, -5.0, 20.0]), vec![10.0, 5.0, 25.0]);
    }

    proptest! {
        #[test]
        fn running_peak_matches_pairwise(equity in prop::collection::vec(-1e6f64..1e6, 0..64)) {
            prop_assert_eq!(max_drawdown(&equity), pairwise_drawdown(&equity));
        }
    }
}
