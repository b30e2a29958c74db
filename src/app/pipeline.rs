//! Shared run logic used by the `run` command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve parameters -> compute -> render chart -> write report -> exports
//!
//! The commands can then focus on what they print.

use crate::chart::{PaymentEquityChart, render_png};
use crate::cli::LoanArgs;
use crate::domain::{LoanParameters, MortgageProjection, RunConfig};
use crate::error::MortgageError;

/// Parameters from `--params` when given, else from the individual flags.
pub fn resolve_params(args: &LoanArgs) -> Result<LoanParameters, MortgageError> {
    match &args.params {
        Some(path) => crate::io::read_params_json(path),
        None => Ok(args.to_params()),
    }
}

/// Write every artifact requested by `config` for an already computed projection.
///
/// The chart is written before the report so the report can link it.
pub fn write_outputs(projection: &MortgageProjection, config: &RunConfig) -> Result<(), MortgageError> {
    if let Some(path) = &config.chart_path {
        let chart = PaymentEquityChart::from_projection(projection);
        render_png(&chart, path, config.chart_width, config.chart_height)?;
    }
    if let Some(path) = &config.report_path {
        crate::report::write_report(path, projection, config.chart_path.as_deref())?;
    }
    if let Some(path) = &config.export_csv {
        crate::io::write_schedule_csv(path, projection)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::write_projection_json(path, projection)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute;

    #[test]
    fn writes_every_requested_artifact() {
        let dir = std::env::temp_dir().join(format!("mortgage-equity-{}-pipeline", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let config = RunConfig {
            chart_path: Some(dir.join("chart.png")),
            chart_width: 400,
            chart_height: 300,
            report_path: Some(dir.join("report.md")),
            export_csv: Some(dir.join("schedule.csv")),
            export_json: Some(dir.join("projection.json")),
            plot: false,
            plot_width: 80,
            plot_height: 20,
        };
        let projection = compute(&LoanParameters {
            term_years: 5,
            ..LoanParameters::default()
        })
        .unwrap();

        write_outputs(&projection, &config).unwrap();

        let report = std::fs::read_to_string(dir.join("report.md")).unwrap();
        assert!(report.contains("![Mortgage payments and equity](chart.png)"));
        assert!(dir.join("chart.png").exists());
        assert_eq!(std::fs::read_to_string(dir.join("schedule.csv")).unwrap().lines().count(), 61);
        assert!(dir.join("projection.json").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
