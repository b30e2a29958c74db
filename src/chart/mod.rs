//! Payment/equity chart.
//!
//! The chart is data-driven: `PaymentEquityChart::from_projection` computes all
//! series and bounds up front, and `png::render_png` only draws. This keeps the
//! data prep testable without touching the filesystem.
//!
//! Layout:
//! - primary axis: one stacked bar per month (principal, interest, property
//!   tax, insurance), x = elapsed years
//! - secondary axis: one equity line per appreciation scenario, in $k

use crate::domain::MortgageProjection;
use crate::report::format::fmt_pct;

pub mod png;

pub use png::render_png;

/// Bar width in years (about one month wide).
const BAR_WIDTH_YEARS: f64 = 0.08;
/// Gridline spacing on the equity axis ($k).
const EQUITY_GRID_STEP_K: f64 = 500.0;
/// Gridlines beyond this many are not drawn.
const MAX_GRID_LINES: i64 = 1_000;

/// One month's stacked bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedBar {
    pub x: f64,
    pub principal: f64,
    pub interest: f64,
    pub property_tax: f64,
    pub insurance: f64,
}

impl StackedBar {
    /// `(bottom, top)` of each layer, bottom-up.
    pub fn layers(&self) -> [(f64, f64); 4] {
        let p = self.principal;
        let i = p + self.interest;
        let t = i + self.property_tax;
        let s = t + self.insurance;
        [(0.0, p), (p, i), (i, t), (t, s)]
    }

    pub fn top(&self) -> f64 {
        self.principal + self.interest + self.property_tax + self.insurance
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.layers().iter().all(|(lo, hi)| lo.is_finite() && hi.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EquityLine {
    pub label: String,
    /// `(years, equity in $k)`.
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentEquityChart {
    pub title: String,
    pub bars: Vec<StackedBar>,
    pub bar_width: f64,
    pub equity: Vec<EquityLine>,
    /// X bounds (years).
    pub x_bounds: [f64; 2],
    /// Monthly cost bounds ($).
    pub cost_bounds: [f64; 2],
    /// Equity bounds ($k).
    pub equity_bounds: [f64; 2],
    /// Horizontal gridlines on the equity axis ($k).
    pub equity_grid: Vec<f64>,
}

impl PaymentEquityChart {
    /// Non-finite months and equity points (possible in a hand-edited
    /// projection file) are left out of the chart.
    pub fn from_projection(projection: &MortgageProjection) -> Self {
        let bars: Vec<StackedBar> = projection
            .rows
            .iter()
            .map(|r| StackedBar {
                x: r.year(),
                principal: r.principal_paid,
                interest: r.interest_paid,
                property_tax: r.property_tax,
                insurance: r.insurance,
            })
            .filter(StackedBar::is_finite)
            .collect();

        let equity: Vec<EquityLine> = projection
            .equity
            .iter()
            .map(|s| EquityLine {
                label: format!("Equity {} ({})", s.scenario.name, fmt_pct(s.scenario.rate)),
                points: s
                    .points
                    .iter()
                    .map(|p| (p.month as f64 / 12.0, p.equity / 1000.0))
                    .filter(|&(_, y)| y.is_finite())
                    .collect(),
            })
            .collect();

        let x_max = bars.last().map(|b| b.x).unwrap_or(1.0);
        let x_bounds = [0.0, x_max + BAR_WIDTH_YEARS];

        let cost_max = bars.iter().map(StackedBar::top).fold(0.0, f64::max);
        let cost_bounds = [0.0, if cost_max > 0.0 { cost_max * 1.1 } else { 1.0 }];

        let (e_min, e_max) = equity
            .iter()
            .flat_map(|l| l.points.iter().map(|&(_, y)| y))
            .fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
        let equity_bounds = [
            (e_min / EQUITY_GRID_STEP_K).floor() * EQUITY_GRID_STEP_K,
            (e_max / EQUITY_GRID_STEP_K).floor() * EQUITY_GRID_STEP_K + EQUITY_GRID_STEP_K,
        ];
        let equity_grid = grid_levels(equity_bounds, EQUITY_GRID_STEP_K);

        Self {
            title: "Mortgage Payments, Taxes, Insurance, and Home Equity with Inflation Adjustment".to_string(),
            bars,
            bar_width: BAR_WIDTH_YEARS,
            equity,
            x_bounds,
            cost_bounds,
            equity_bounds,
            equity_grid,
        }
    }
}

fn grid_levels(bounds: [f64; 2], step: f64) -> Vec<f64> {
    let first = (bounds[0] / step).ceil();
    let last = (bounds[1] / step).floor();
    if !first.is_finite() || !last.is_finite() || last - first >= MAX_GRID_LINES as f64 {
        return Vec::new();
    }
    (first as i64..=last as i64).map(|k| k as f64 * step).collect()
}
