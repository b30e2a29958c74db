//! Amortization and equity engine.
//!
//! `compute` is a pure function of `LoanParameters`:
//!
//! 1. validate every input (nothing is clamped or corrected)
//! 2. derive the loan terms and the level payment
//! 3. build the monthly schedule with tax and insurance attached
//! 4. project equity for each appreciation scenario
//! 5. sum the totals
//!
//! Arithmetic is plain `f64`. Rounding drift over a few hundred months is well
//! inside mortgage-calculation tolerance; nothing here is settlement-grade.

use std::collections::HashSet;

use crate::domain::{AmortizationRow, EquitySeries, LoanParameters, LoanTerms, MortgageProjection, SummaryTotals};
use crate::error::MortgageError;

pub mod costs;
pub mod equity;
pub mod payment;
pub mod schedule;

pub use costs::{annual_insurance, annual_property_tax, assessed_value};
pub use equity::home_value;
pub use payment::{monthly_payment, remaining_balance};

/// Longest accepted loan term.
pub const MAX_TERM_YEARS: u32 = 100;

/// Run the full projection.
pub fn compute(params: &LoanParameters) -> Result<MortgageProjection, MortgageError> {
    validate(params)?;

    let terms = loan_terms(params);
    log::debug!(
        "loan_amount={:.2} monthly_rate={:.7} months={} payment={:.2}",
        terms.loan_amount,
        terms.monthly_rate,
        terms.num_months,
        terms.monthly_payment
    );

    let monthly_costs = costs::monthly_costs(params, terms.num_months);
    let rows = schedule::build_rows(&terms, &monthly_costs);
    let equity = equity::all_equity_series(params.home_price, &params.appreciation_scenarios, &rows);
    let totals = summary_totals(&rows, terms.down_payment);
    check_finite(params, &terms, &rows, &equity, &totals)?;

    log::info!(
        "computed {} months across {} scenario(s); interest total {:.2}",
        rows.len(),
        equity.len(),
        totals.interest
    );

    Ok(MortgageProjection {
        params: params.clone(),
        terms,
        rows,
        equity,
        totals,
    })
}

/// Derived loan quantities. Assumes `params` already passed `validate`.
pub fn loan_terms(params: &LoanParameters) -> LoanTerms {
    let down_payment = params.home_price * params.down_payment_fraction;
    let loan_amount = params.home_price - down_payment;
    let monthly_rate = params.annual_interest_rate / 12.0;
    let num_months = params.term_years * 12;

    LoanTerms {
        down_payment,
        loan_amount,
        monthly_rate,
        num_months,
        monthly_payment: monthly_payment(loan_amount, monthly_rate, num_months),
    }
}

pub fn summary_totals(rows: &[AmortizationRow], down_payment: f64) -> SummaryTotals {
    rows.iter().fold(
        SummaryTotals {
            down_payment,
            ..SummaryTotals::default()
        },
        |mut acc, row| {
            acc.principal += row.principal_paid;
            acc.interest += row.interest_paid;
            acc.property_tax += row.property_tax;
            acc.insurance += row.insurance;
            acc
        },
    )
}

/// Check every precondition, in field order. The first violation is returned.
pub fn validate(params: &LoanParameters) -> Result<(), MortgageError> {
    require_finite("home_price", params.home_price)?;
    if params.home_price <= 0.0 {
        return Err(MortgageError::invalid_parameter(
            "home_price",
            format!("must be > 0 (got {})", params.home_price),
        ));
    }

    require_finite("down_payment_fraction", params.down_payment_fraction)?;
    if !(0.0..1.0).contains(&params.down_payment_fraction) {
        return Err(MortgageError::invalid_parameter(
            "down_payment_fraction",
            format!("must be in [0, 1) (got {})", params.down_payment_fraction),
        ));
    }

    require_non_negative("annual_interest_rate", params.annual_interest_rate)?;

    if !(1..=MAX_TERM_YEARS).contains(&params.term_years) {
        return Err(MortgageError::invalid_parameter(
            "term_years",
            format!("must be in [1, {MAX_TERM_YEARS}] (got {})", params.term_years),
        ));
    }

    require_non_negative("mill_levy", params.mill_levy)?;
    require_non_negative("property_tax_rate", params.property_tax_rate)?;
    require_non_negative("insurance_rate", params.insurance_rate)?;
    require_non_negative("annual_inflation_rate", params.annual_inflation_rate)?;

    validate_scenarios(params)
}

fn validate_scenarios(params: &LoanParameters) -> Result<(), MortgageError> {
    const FIELD: &str = "appreciation_scenarios";

    if params.appreciation_scenarios.is_empty() {
        return Err(MortgageError::invalid_parameter(FIELD, "at least one scenario is required"));
    }

    let mut seen = HashSet::new();
    for s in &params.appreciation_scenarios {
        if s.name.trim().is_empty() {
            return Err(MortgageError::invalid_parameter(FIELD, "scenario names must be non-empty"));
        }
        if !seen.insert(s.name.as_str()) {
            return Err(MortgageError::invalid_parameter(
                FIELD,
                format!("duplicate scenario name '{}'", s.name),
            ));
        }
        if !s.rate.is_finite() || s.rate < -1.0 {
            return Err(MortgageError::invalid_parameter(
                FIELD,
                format!("rate for '{}' must be finite and >= -1 (got {})", s.name, s.rate),
            ));
        }
    }
    Ok(())
}

/// Reject a projection whose arithmetic left the `f64` range.
///
/// Inputs can each be valid and still overflow together (a huge price, or a
/// rate compounded over the term). The error names the input whose growth
/// factor overflowed, else `home_price` as the scale of every amount.
fn check_finite(
    params: &LoanParameters,
    terms: &LoanTerms,
    rows: &[AmortizationRow],
    equity: &[EquitySeries],
    totals: &SummaryTotals,
) -> Result<(), MortgageError> {
    let years = f64::from(params.term_years);

    let loan_ok = terms.monthly_payment.is_finite()
        && totals.principal.is_finite()
        && totals.interest.is_finite()
        && rows
            .iter()
            .all(|r| r.principal_paid.is_finite() && r.interest_paid.is_finite() && r.remaining_balance.is_finite());
    if !loan_ok {
        let field = if growth_overflows(terms.monthly_rate, f64::from(terms.num_months)) {
            "annual_interest_rate"
        } else {
            "home_price"
        };
        return Err(MortgageError::invalid_parameter(field, "loan payment or balance overflows"));
    }

    let costs_ok = totals.property_tax.is_finite()
        && totals.insurance.is_finite()
        && rows.iter().all(|r| r.property_tax.is_finite() && r.insurance.is_finite());
    if !costs_ok {
        let field = if growth_overflows(params.annual_inflation_rate, years) {
            "annual_inflation_rate"
        } else {
            "home_price"
        };
        return Err(MortgageError::invalid_parameter(field, "property tax or insurance overflows"));
    }

    for series in equity {
        if series.points.iter().all(|p| p.home_value.is_finite() && p.equity.is_finite()) {
            continue;
        }
        if growth_overflows(series.scenario.rate, years) {
            return Err(MortgageError::invalid_parameter(
                "appreciation_scenarios",
                format!("home value for '{}' overflows", series.scenario.name),
            ));
        }
        return Err(MortgageError::invalid_parameter("home_price", "home value overflows"));
    }
    Ok(())
}

/// Whether `(1 + rate)^periods` is past the `f64` range.
fn growth_overflows(rate: f64, periods: f64) -> bool {
    !(periods * rate.ln_1p()).exp().is_finite()
}

fn require_finite(field: &'static str, value: f64) -> Result<(), MortgageError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MortgageError::invalid_parameter(field, format!("must be finite (got {value})")))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<(), MortgageError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(MortgageError::invalid_parameter(field, format!("must be >= 0 (got {value})")));
    }
    Ok(())
}
