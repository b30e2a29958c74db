//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves loan parameters (flags or JSON)
//! - runs the engine
//! - prints summaries/plots
//! - writes the chart, report and optional exports

use clap::Parser;

use crate::cli::{Command, LoanArgs, PlotArgs, RunArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `mortgage` binary.
pub fn run() -> Result<(), AppError> {
    // We want `mortgage` and `mortgage --home-price 500000` to behave like
    // `mortgage run ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Schedule(args) => handle_schedule(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let params = pipeline::resolve_params(&args.loan)?;
    let config = args.to_run_config();
    let projection = crate::engine::compute(&params)?;

    println!("{}", crate::report::format_run_summary(&projection));
    println!("{}", crate::report::format_annual_table(&projection));

    if config.plot {
        let plot = crate::plot::render_equity_plot(&projection, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    pipeline::write_outputs(&projection, &config)?;

    if let Some(path) = &config.chart_path {
        println!("Chart saved as {}", path.display());
    }
    if let Some(path) = &config.report_path {
        println!("Report saved as {}", path.display());
    }
    Ok(())
}

fn handle_schedule(args: LoanArgs) -> Result<(), AppError> {
    let params = pipeline::resolve_params(&args)?;
    let projection = crate::engine::compute(&params)?;
    print!("{}", crate::report::format_annual_table(&projection));
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let projection = crate::io::read_projection_json(&args.projection)?;

    let plot = crate::plot::render_equity_plot(&projection, args.width, args.height);
    println!("{plot}");

    if let Some(path) = &args.chart {
        let chart = crate::chart::PaymentEquityChart::from_projection(&projection);
        crate::chart::render_png(&chart, path, args.chart_width, args.chart_height)?;
        println!("Chart saved as {}", path.display());
    }
    Ok(())
}

/// Rewrite argv so `mortgage` defaults to `mortgage run`.
///
/// Rules:
/// - `mortgage`                       -> `mortgage run`
/// - `mortgage --home-price 5e5 ...`  -> `mortgage run --home-price 5e5 ...`
/// - `mortgage --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "schedule" | "plot");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "run flags".
    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs() {
        assert_eq!(rewrite_args(argv(&["mortgage"])), argv(&["mortgage", "run"]));
    }

    #[test]
    fn leading_flag_is_routed_to_run() {
        assert_eq!(
            rewrite_args(argv(&["mortgage", "--home-price", "500000"])),
            argv(&["mortgage", "run", "--home-price", "500000"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["mortgage", "schedule"]),
            argv(&["mortgage", "plot", "--projection", "p.json"]),
            argv(&["mortgage", "--help"]),
            argv(&["mortgage", "-V"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }
}
