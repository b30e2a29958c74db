//! Property tax and insurance projections.
//!
//! Both are flat annual figures grown by inflation once per loan year and
//! spread evenly over that year's 12 months:
//!
//! ```text
//! assessed      = home_price × mill_levy
//! tax(y)        = assessed × property_tax_rate × (1 + inflation)^y
//! insurance(y)  = home_price × insurance_rate × (1 + inflation)^y
//! ```
//!
//! with `y` the 0-based loan year. The monthly expansion is truncated to the
//! row count; a partial final year is not prorated.

use crate::domain::LoanParameters;

/// Monthly escrow-style costs attached to one schedule row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyCosts {
    pub property_tax: f64,
    pub insurance: f64,
}

pub fn assessed_value(params: &LoanParameters) -> f64 {
    params.home_price * params.mill_levy
}

fn inflation_factor(params: &LoanParameters, year: u32) -> f64 {
    (1.0 + params.annual_inflation_rate).powi(year as i32)
}

/// Property tax for 0-based loan year `year`.
pub fn annual_property_tax(params: &LoanParameters, year: u32) -> f64 {
    assessed_value(params) * params.property_tax_rate * inflation_factor(params, year)
}

/// Insurance premium for 0-based loan year `year`.
pub fn annual_insurance(params: &LoanParameters, year: u32) -> f64 {
    params.home_price * params.insurance_rate * inflation_factor(params, year)
}

/// Expand the yearly figures to exactly `num_months` monthly values.
pub fn monthly_costs(params: &LoanParameters, num_months: u32) -> Vec<MonthlyCosts> {
    let years = num_months.div_ceil(12);
    (0..years)
        .flat_map(|year| {
            let costs = MonthlyCosts {
                property_tax: annual_property_tax(params, year) / 12.0,
                insurance: annual_insurance(params, year) / 12.0,
            };
            std::iter::repeat_n(costs, 12)
        })
        .take(num_months as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn year_zero_tax_uses_assessed_value() {
        let params = LoanParameters::default();
        assert_abs_diff_eq!(assessed_value(&params), 40_590.0, epsilon = 1e-6);
        assert_abs_diff_eq!(annual_property_tax(&params, 0), 251.658, epsilon = 1e-6);
    }

    #[test]
    fn tax_and_insurance_compound_with_inflation() {
        let params = LoanParameters::default();
        let year0 = annual_property_tax(&params, 0);
        assert_abs_diff_eq!(annual_property_tax(&params, 5), year0 * 1.03_f64.powi(5), epsilon = 1e-9);
        assert_abs_diff_eq!(annual_insurance(&params, 0), 1800.0, epsilon = 1e-9);
        assert_abs_diff_eq!(annual_insurance(&params, 2), 1800.0 * 1.03 * 1.03, epsilon = 1e-9);
    }

    #[test]
    fn expansion_repeats_each_year_twelve_times() {
        let params = LoanParameters::default();
        let months = monthly_costs(&params, 360);
        assert_eq!(months.len(), 360);
        assert_eq!(months[0], months[11]);
        assert_ne!(months[11], months[12]);
        let year_one: f64 = months[12..24].iter().map(|c| c.insurance).sum();
        assert_abs_diff_eq!(year_one, annual_insurance(&params, 1), epsilon = 1e-9);
    }

    #[test]
    fn partial_final_year_is_truncated_not_prorated() {
        let params = LoanParameters::default();
        let months = monthly_costs(&params, 15);
        assert_eq!(months.len(), 15);
        // Months 13..15 carry the full year-1 monthly figure.
        assert_abs_diff_eq!(months[14].property_tax, annual_property_tax(&params, 1) / 12.0, epsilon = 1e-12);
    }
}
