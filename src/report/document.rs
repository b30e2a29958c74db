//! Markdown summary document.
//!
//! Sections: input summary, cumulative totals, equity at end of term, yearly
//! schedule, and the chart (linked relative to the document when possible).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::MortgageProjection;
use crate::error::MortgageError;
use crate::report::format::{fmt_money, input_summary_lines, totals_summary_lines};

/// Write the summary document to `path`. `chart` is embedded as an image link.
pub fn write_report(path: &Path, projection: &MortgageProjection, chart: Option<&Path>) -> Result<(), MortgageError> {
    let file = File::create(path).map_err(|e| MortgageError::output_write(path, e))?;
    let mut out = BufWriter::new(file);
    let generated = Local::now().to_rfc3339();

    write_document(&mut out, projection, chart.map(|c| chart_link(path, c)), &generated)
        .map_err(|e| MortgageError::output_write(path, e))?;
    out.flush().map_err(|e| MortgageError::output_write(path, e))?;

    log::info!("wrote report to {}", path.display());
    Ok(())
}

fn write_document(
    out: &mut impl Write,
    projection: &MortgageProjection,
    chart: Option<PathBuf>,
    generated: &str,
) -> std::io::Result<()> {
    writeln!(out, "# Mortgage Summary Report")?;
    writeln!(out)?;
    writeln!(out, "_Generated {generated}_")?;

    writeln!(out, "\n## Input Summary\n")?;
    for line in input_summary_lines(&projection.params, &projection.terms) {
        writeln!(out, "- {line}")?;
    }

    writeln!(out, "\n## Cumulative Totals Summary\n")?;
    for line in totals_summary_lines(&projection.totals) {
        writeln!(out, "- {line}")?;
    }

    writeln!(out, "\n## Equity at End of Term\n")?;
    writeln!(out, "| scenario | appreciation | home value | equity |")?;
    writeln!(out, "| - | -: | -: | -: |")?;
    for series in &projection.equity {
        if let Some(last) = series.points.last() {
            writeln!(
                out,
                "| {} | {:.2}% | {} | {} |",
                md_cell(&series.scenario.name),
                series.scenario.rate * 100.0,
                fmt_money(last.home_value),
                fmt_money(last.equity)
            )?;
        }
    }

    writeln!(out, "\n## Yearly Schedule\n")?;
    write!(out, "| year | principal | interest | property tax | insurance | balance |")?;
    for series in &projection.equity {
        write!(out, " equity ({}) |", md_cell(&series.scenario.name))?;
    }
    writeln!(out)?;
    write!(out, "| -: | -: | -: | -: | -: | -: |")?;
    for _ in &projection.equity {
        write!(out, " -: |")?;
    }
    writeln!(out)?;
    for y in projection.annual_summaries() {
        write!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            y.year,
            fmt_money(y.principal),
            fmt_money(y.interest),
            fmt_money(y.property_tax),
            fmt_money(y.insurance),
            fmt_money(y.ending_balance)
        )?;
        for e in &y.equity {
            write!(out, " {} |", fmt_money(*e))?;
        }
        writeln!(out)?;
    }

    if let Some(chart) = chart {
        writeln!(out, "\n## Chart\n")?;
        writeln!(out, "![Mortgage payments and equity]({})", chart.display())?;
    }

    Ok(())
}

/// Make free text safe inside a Markdown table cell.
fn md_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

/// Link the chart relative to the document's directory when it lives beneath it.
fn chart_link(report: &Path, chart: &Path) -> PathBuf {
    report
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .and_then(|dir| chart.strip_prefix(dir).ok())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| chart.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoanParameters;
    use crate::engine::compute;

    fn render(projection: &MortgageProjection, chart: Option<PathBuf>) -> String {
        let mut buf = Vec::new();
        write_document(&mut buf, projection, chart, "2026-01-01T00:00:00+00:00").unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn document_has_all_sections() {
        let p = compute(&LoanParameters::default()).unwrap();
        let doc = render(&p, Some(PathBuf::from("chart.png")));

        assert!(doc.starts_with("# Mortgage Summary Report\n"));
        for heading in [
            "## Input Summary",
            "## Cumulative Totals Summary",
            "## Equity at End of Term",
            "## Yearly Schedule",
            "## Chart",
        ] {
            assert!(doc.contains(heading), "missing {heading}");
        }
        assert!(doc.contains("- Home Price: $600,000.00"));
        assert!(doc.contains("| lower | 0.00% | $600,000.00 | $600,000.00 |"));
        assert!(doc.contains("![Mortgage payments and equity](chart.png)"));
        // 30 yearly rows plus header and alignment row.
        assert_eq!(doc.lines().filter(|l| l.starts_with("| ") && l.contains(" | $")).count(), 30 + 3);
    }

    #[test]
    fn chart_section_is_omitted_without_chart() {
        let p = compute(&LoanParameters::default()).unwrap();
        assert!(!render(&p, None).contains("## Chart"));
    }

    #[test]
    fn scenario_names_are_escaped_in_tables() {
        let params = LoanParameters {
            term_years: 2,
            appreciation_scenarios: vec![
                crate::domain::AppreciationScenario::new("bull|bear", 0.04),
                crate::domain::AppreciationScenario::new("two\nlines", 0.0),
            ],
            ..LoanParameters::default()
        };
        let doc = render(&compute(&params).unwrap(), None);

        assert!(doc.contains("| bull\\|bear | 4.00% |"));
        assert!(doc.contains("| two lines | 0.00% |"));
        assert!(doc.contains("| equity (bull\\|bear) | equity (two lines) |"));

        // Every table line keeps the column count of its header.
        let schedule: Vec<&str> = doc
            .lines()
            .skip_while(|l| !l.starts_with("## Yearly Schedule"))
            .filter(|l| l.starts_with('|'))
            .collect();
        let cells = |l: &str| l.replace("\\|", "").matches('|').count();
        assert_eq!(schedule.len(), 2 + 2);
        assert!(schedule.iter().all(|l| cells(l) == cells(schedule[0])));
    }

    #[test]
    fn chart_link_is_relative_to_report_dir() {
        assert_eq!(
            chart_link(Path::new("out/report.md"), Path::new("out/img/chart.png")),
            PathBuf::from("img/chart.png")
        );
        assert_eq!(
            chart_link(Path::new("report.md"), Path::new("chart.png")),
            PathBuf::from("chart.png")
        );
        assert_eq!(
            chart_link(Path::new("a/report.md"), Path::new("/tmp/chart.png")),
            PathBuf::from("/tmp/chart.png")
        );
    }
}
