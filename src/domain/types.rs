//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced once by the engine and handed read-only to the presentation layer
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named home-appreciation assumption (annual rate, decimal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppreciationScenario {
    pub name: String,
    pub rate: f64,
}

impl AppreciationScenario {
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }

    /// The three scenarios of the default run: 4% main, 0% lower, 8% upper.
    pub fn defaults() -> Vec<AppreciationScenario> {
        vec![
            AppreciationScenario::new("main", 0.04),
            AppreciationScenario::new("lower", 0.0),
            AppreciationScenario::new("upper", 0.08),
        ]
    }
}

/// Parses `NAME=RATE`, e.g. `main=0.04`.
impl FromStr for AppreciationScenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rate) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=RATE, got '{s}'"))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("scenario name is empty in '{s}'"));
        }
        let rate: f64 = rate
            .trim()
            .parse()
            .map_err(|e| format!("invalid rate in '{s}': {e}"))?;
        Ok(AppreciationScenario::new(name, rate))
    }
}

/// Immutable loan inputs.
///
/// All rates are decimals (`0.07125` for 7.125%). Missing fields in a params
/// JSON file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    #[serde(default = "default_home_price")]
    pub home_price: f64,

    /// Fraction of the price paid up front, in `[0, 1)`.
    #[serde(default = "default_down_payment_fraction")]
    pub down_payment_fraction: f64,

    #[serde(default = "default_annual_interest_rate")]
    pub annual_interest_rate: f64,

    #[serde(default = "default_term_years")]
    pub term_years: u32,

    /// Assessed value = home price × mill levy.
    #[serde(default = "default_mill_levy")]
    pub mill_levy: f64,

    /// Applied to the assessed value.
    #[serde(default = "default_property_tax_rate")]
    pub property_tax_rate: f64,

    /// Applied to the home price.
    #[serde(default = "default_insurance_rate")]
    pub insurance_rate: f64,

    /// Annual growth of tax and insurance.
    #[serde(default = "default_annual_inflation_rate")]
    pub annual_inflation_rate: f64,

    #[serde(default = "AppreciationScenario::defaults")]
    pub appreciation_scenarios: Vec<AppreciationScenario>,
}

fn default_home_price() -> f64 {
    600_000.0
}
fn default_down_payment_fraction() -> f64 {
    0.10
}
fn default_annual_interest_rate() -> f64 {
    0.07125
}
fn default_term_years() -> u32 {
    30
}
fn default_mill_levy() -> f64 {
    0.06765
}
fn default_property_tax_rate() -> f64 {
    0.0062
}
fn default_insurance_rate() -> f64 {
    0.003
}
fn default_annual_inflation_rate() -> f64 {
    0.03
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            home_price: default_home_price(),
            down_payment_fraction: default_down_payment_fraction(),
            annual_interest_rate: default_annual_interest_rate(),
            term_years: default_term_years(),
            mill_levy: default_mill_levy(),
            property_tax_rate: default_property_tax_rate(),
            insurance_rate: default_insurance_rate(),
            annual_inflation_rate: default_annual_inflation_rate(),
            appreciation_scenarios: AppreciationScenario::defaults(),
        }
    }
}

/// Loan quantities derived once from `LoanParameters`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub down_payment: f64,
    pub loan_amount: f64,
    pub monthly_rate: f64,
    pub num_months: u32,
    /// Level payment (principal + interest), constant for the life of the loan.
    pub monthly_payment: f64,
}

/// One month of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based.
    pub month: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    /// Balance after this month's payment.
    pub remaining_balance: f64,
    pub property_tax: f64,
    pub insurance: f64,
}

impl AmortizationRow {
    /// Elapsed time in years (`month / 12`), the chart's x coordinate.
    pub fn year(&self) -> f64 {
        self.month as f64 / 12.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub month: u32,
    pub home_value: f64,
    pub equity: f64,
}

/// Equity trajectory for one appreciation scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquitySeries {
    pub scenario: AppreciationScenario,
    pub points: Vec<EquityPoint>,
}

/// Cumulative totals over the whole schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub principal: f64,
    pub interest: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub down_payment: f64,
}

impl SummaryTotals {
    pub fn total_outlay(&self) -> f64 {
        self.principal + self.interest + self.property_tax + self.insurance + self.down_payment
    }
}

/// Per-loan-year rollup of the monthly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    /// 1-based loan year.
    pub year: u32,
    pub principal: f64,
    pub interest: f64,
    pub property_tax: f64,
    pub insurance: f64,
    pub ending_balance: f64,
    /// Year-end equity, one entry per scenario in scenario order.
    pub equity: Vec<f64>,
}

/// Complete engine output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageProjection {
    pub params: LoanParameters,
    pub terms: LoanTerms,
    pub rows: Vec<AmortizationRow>,
    /// In the order the scenarios were supplied.
    pub equity: Vec<EquitySeries>,
    pub totals: SummaryTotals,
}

impl MortgageProjection {
    /// Roll the monthly rows up into loan years. A trailing partial year is
    /// summarized over the months it has.
    pub fn annual_summaries(&self) -> Vec<AnnualSummary> {
        self.rows
            .chunks(12)
            .enumerate()
            .filter_map(|(idx, chunk)| {
                let last = chunk.last()?;
                let last_idx = idx * 12 + chunk.len() - 1;
                Some(AnnualSummary {
                    year: idx as u32 + 1,
                    principal: chunk.iter().map(|r| r.principal_paid).sum(),
                    interest: chunk.iter().map(|r| r.interest_paid).sum(),
                    property_tax: chunk.iter().map(|r| r.property_tax).sum(),
                    insurance: chunk.iter().map(|r| r.insurance).sum(),
                    ending_balance: last.remaining_balance,
                    equity: self
                        .equity
                        .iter()
                        .map(|s| s.points.get(last_idx).map(|p| p.equity).unwrap_or(f64::NAN))
                        .collect(),
                })
            })
            .collect()
    }
}

/// A full run's output configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub chart_path: Option<PathBuf>,
    pub chart_width: u32,
    pub chart_height: u32,
    pub report_path: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}
