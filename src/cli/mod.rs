//! Command-line parsing for the mortgage projector.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the engine and presentation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{AppreciationScenario, LoanParameters, RunConfig};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mortgage", version, about = "Fixed-rate mortgage amortization and home-equity projector")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the schedule, print the summary, and write the chart/report/exports.
    Run(RunArgs),
    /// Print the yearly schedule table only (useful for scripting).
    Schedule(LoanArgs),
    /// Plot a previously exported projection JSON.
    Plot(PlotArgs),
}

/// Loan parameters. Every field has the default of the reference scenario.
#[derive(Debug, Args, Clone)]
pub struct LoanArgs {
    /// Load parameters from a JSON file instead of the flags below.
    ///
    /// Fields missing from the file take their defaults.
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    /// Home purchase price ($).
    #[arg(long, default_value_t = 600_000.0)]
    pub home_price: f64,

    /// Down payment as a fraction of the price, in [0, 1).
    #[arg(long, default_value_t = 0.10)]
    pub down_payment: f64,

    /// Annual interest rate (decimal).
    #[arg(long, default_value_t = 0.07125)]
    pub interest_rate: f64,

    /// Loan term in years.
    #[arg(long, default_value_t = 30)]
    pub term_years: u32,

    /// Mill levy (decimal); assessed value = price × levy.
    #[arg(long, default_value_t = 0.06765)]
    pub mill_levy: f64,

    /// Property tax rate applied to the assessed value (decimal).
    #[arg(long, default_value_t = 0.0062)]
    pub property_tax_rate: f64,

    /// Insurance rate applied to the price (decimal).
    #[arg(long, default_value_t = 0.003)]
    pub insurance_rate: f64,

    /// Annual inflation applied to tax and insurance (decimal).
    #[arg(long, default_value_t = 0.03)]
    pub inflation_rate: f64,

    /// Appreciation scenario as NAME=RATE; repeat for several.
    ///
    /// Defaults to main=0.04, lower=0.0, upper=0.08.
    #[arg(long = "scenario", value_name = "NAME=RATE")]
    pub scenarios: Vec<AppreciationScenario>,
}

impl LoanArgs {
    /// Parameters from the flags (ignores `--params`).
    pub fn to_params(&self) -> LoanParameters {
        let appreciation_scenarios = if self.scenarios.is_empty() {
            AppreciationScenario::defaults()
        } else {
            self.scenarios.clone()
        };
        LoanParameters {
            home_price: self.home_price,
            down_payment_fraction: self.down_payment,
            annual_interest_rate: self.interest_rate,
            term_years: self.term_years,
            mill_levy: self.mill_levy,
            property_tax_rate: self.property_tax_rate,
            insurance_rate: self.insurance_rate,
            annual_inflation_rate: self.inflation_rate,
            appreciation_scenarios,
        }
    }
}

/// Options for a full run.
#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Chart image path (.png, .bmp or .jpg).
    #[arg(long, default_value = "mortgage_payments_equity_graph.png")]
    pub chart: PathBuf,

    /// Skip the chart image.
    #[arg(long)]
    pub no_chart: bool,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1600)]
    pub chart_width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 960)]
    pub chart_height: u32,

    /// Summary document path (Markdown).
    #[arg(long, default_value = "mortgage_summary_report.md")]
    pub report: PathBuf,

    /// Skip the summary document.
    #[arg(long)]
    pub no_report: bool,

    /// Export the monthly schedule to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    /// Export the full projection to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,

    /// Render an ASCII equity plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

impl RunArgs {
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig {
            chart_path: (!self.no_chart).then(|| self.chart.clone()),
            chart_width: self.chart_width,
            chart_height: self.chart_height,
            report_path: (!self.no_report).then(|| self.report.clone()),
            export_csv: self.export_csv.clone(),
            export_json: self.export_json.clone(),
            plot: self.plot && !self.no_plot,
            plot_width: self.width,
            plot_height: self.height,
        }
    }
}

/// Options for plotting a saved projection.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Projection JSON file produced by `mortgage run --export-json`.
    #[arg(long, value_name = "JSON")]
    pub projection: PathBuf,

    /// Also re-render the chart image to this path.
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1600)]
    pub chart_width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 960)]
    pub chart_height: u32,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
