//! Home value and equity trajectories.
//!
//! For each scenario and each month `m ≥ 1`:
//!
//! ```text
//! home_value(m) = home_price × (1 + rate)^(m / 12)
//! equity(m)     = home_value(m) − remaining_balance(m)
//! ```
//!
//! The exponent is fractional, so value grows smoothly month to month rather
//! than stepping at each anniversary. A rate of −1 gives a home value of 0.

use rayon::prelude::*;

use crate::domain::{AmortizationRow, AppreciationScenario, EquityPoint, EquitySeries};

pub fn home_value(home_price: f64, rate: f64, month: u32) -> f64 {
    home_price * (1.0 + rate).powf(month as f64 / 12.0)
}

/// Equity for one scenario against the schedule's balances.
pub fn equity_series(home_price: f64, scenario: &AppreciationScenario, rows: &[AmortizationRow]) -> EquitySeries {
    let points = rows
        .iter()
        .map(|row| {
            let value = home_value(home_price, scenario.rate, row.month);
            EquityPoint {
                month: row.month,
                home_value: value,
                equity: value - row.remaining_balance,
            }
        })
        .collect();

    EquitySeries {
        scenario: scenario.clone(),
        points,
    }
}

/// Equity for every scenario.
///
/// Scenarios share no state, so they are evaluated in parallel; the output
/// keeps the input order.
pub fn all_equity_series(
    home_price: f64,
    scenarios: &[AppreciationScenario],
    rows: &[AmortizationRow],
) -> Vec<EquitySeries> {
    scenarios
        .par_iter()
        .map(|scenario| equity_series(home_price, scenario, rows))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_rows(n: u32, balance: f64) -> Vec<AmortizationRow> {
        (1..=n)
            .map(|month| AmortizationRow {
                month,
                principal_paid: 0.0,
                interest_paid: 0.0,
                remaining_balance: balance,
                property_tax: 0.0,
                insurance: 0.0,
            })
            .collect()
    }

    #[test]
    fn home_value_compounds_per_elapsed_month() {
        assert_relative_eq!(home_value(100_000.0, 0.08, 12), 108_000.0, epsilon = 1e-9);
        assert_relative_eq!(home_value(100_000.0, 0.08, 6), 100_000.0 * 1.08_f64.sqrt(), epsilon = 1e-9);
        assert_eq!(home_value(100_000.0, 0.0, 240), 100_000.0);
    }

    #[test]
    fn total_loss_scenario_has_zero_home_value() {
        let rows = flat_rows(24, 50_000.0);
        let series = equity_series(300_000.0, &AppreciationScenario::new("wipeout", -1.0), &rows);
        assert_eq!(series.points.len(), 24);
        for p in &series.points {
            assert_eq!(p.home_value, 0.0);
            assert_eq!(p.equity, -50_000.0);
        }
    }

    #[test]
    fn parallel_evaluation_keeps_scenario_order() {
        let rows = flat_rows(12, 0.0);
        let scenarios = vec![
            AppreciationScenario::new("c", 0.02),
            AppreciationScenario::new("a", 0.06),
            AppreciationScenario::new("b", -0.01),
        ];
        let series = all_equity_series(200_000.0, &scenarios, &rows);
        let names: Vec<&str> = series.iter().map(|s| s.scenario.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
        assert_relative_eq!(series[1].points.last().unwrap().equity, 212_000.0, epsilon = 1e-9);
    }
}
