//! Formatted terminal output: input summary, cumulative totals, yearly table.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - the console output and the document share the same wording

use crate::domain::{AnnualSummary, LoanParameters, LoanTerms, MortgageProjection, SummaryTotals};

/// `Label: value` lines describing the inputs.
pub fn input_summary_lines(params: &LoanParameters, terms: &LoanTerms) -> Vec<String> {
    vec![
        format!("Home Price: {}", fmt_money(params.home_price)),
        format!(
            "Down Payment: {} ({})",
            fmt_money(terms.down_payment),
            fmt_pct(params.down_payment_fraction)
        ),
        format!("Loan Amount: {}", fmt_money(terms.loan_amount)),
        format!("Loan Term: {} years", params.term_years),
        format!("Interest Rate: {}", fmt_pct(params.annual_interest_rate)),
        format!("Monthly Payment (P&I): {}", fmt_money(terms.monthly_payment)),
        format!("Mill Levy: {}", fmt_pct(params.mill_levy)),
        format!("Property Tax Rate: {}", fmt_pct(params.property_tax_rate)),
        format!("Insurance Rate: {}", fmt_pct(params.insurance_rate)),
        format!("Annual Inflation Rate: {}", fmt_pct(params.annual_inflation_rate)),
        format!("Home Appreciation Rates: {}", fmt_scenarios(params)),
    ]
}

/// `Label: value` lines for the cumulative totals.
pub fn totals_summary_lines(totals: &SummaryTotals) -> Vec<String> {
    vec![
        format!("Cumulative Principal Paid: {}", fmt_money(totals.principal)),
        format!("Cumulative Interest Paid: {}", fmt_money(totals.interest)),
        format!("Cumulative Property Tax Paid: {}", fmt_money(totals.property_tax)),
        format!("Cumulative Insurance Paid: {}", fmt_money(totals.insurance)),
        format!("Down Payment: {}", fmt_money(totals.down_payment)),
        format!("Total Outlay: {}", fmt_money(totals.total_outlay())),
    ]
}

/// Format the full run summary (inputs + totals + final equity per scenario).
pub fn format_run_summary(projection: &MortgageProjection) -> String {
    let mut out = String::new();

    out.push_str("=== Mortgage Summary ===\n");
    for line in input_summary_lines(&projection.params, &projection.terms) {
        out.push_str(&line);
        out.push('\n');
    }

    out.push_str("\nCumulative totals:\n");
    for line in totals_summary_lines(&projection.totals) {
        out.push_str(&format!("- {line}\n"));
    }

    out.push_str("\nEquity at end of term:\n");
    for series in &projection.equity {
        if let Some(last) = series.points.last() {
            out.push_str(&format!(
                "- {:<12} home value {:>16}  equity {:>16}\n",
                series.scenario.name,
                fmt_money(last.home_value),
                fmt_money(last.equity),
            ));
        }
    }
    out.push('\n');

    out
}

/// Format the yearly rollup as a fixed-width table.
pub fn format_annual_table(projection: &MortgageProjection) -> String {
    format_table(&projection.annual_summaries(), &scenario_names(projection))
}

fn scenario_names(projection: &MortgageProjection) -> Vec<String> {
    projection.equity.iter().map(|s| s.scenario.name.clone()).collect()
}

fn format_table(years: &[AnnualSummary], scenarios: &[String]) -> String {
    let mut out = String::new();

    let mut header = format!(
        "{:>4} {:>12} {:>12} {:>10} {:>10} {:>14}",
        "year", "principal", "interest", "tax", "insurance", "balance"
    );
    let mut rule = format!("{:-<4} {:-<12} {:-<12} {:-<10} {:-<10} {:-<14}", "", "", "", "", "", "");
    for name in scenarios {
        header.push_str(&format!(" {:>14}", truncate(&format!("eq:{name}"), 14)));
        rule.push_str(&format!(" {:-<14}", ""));
    }
    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for y in years {
        let mut line = format!(
            "{:>4} {:>12.2} {:>12.2} {:>10.2} {:>10.2} {:>14.2}",
            y.year, y.principal, y.interest, y.property_tax, y.insurance, y.ending_balance
        );
        for e in &y.equity {
            line.push_str(&format!(" {e:>14.2}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// `$1,234,567.89`, with a leading `-` for negatives.
pub fn fmt_money(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let cents = format!("{:.2}", v.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}

/// Decimal rate as a percentage with two places: `0.07125` → `7.13%`.
pub fn fmt_pct(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn fmt_scenarios(params: &LoanParameters) -> String {
    let parts: Vec<String> = params
        .appreciation_scenarios
        .iter()
        .map(|s| format!("{} ({})", fmt_pct(s.rate), s.name))
        .collect();
    parts.join(", ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
