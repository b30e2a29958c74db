//! Month-by-month amortization schedule.
//!
//! Balances come from the closed form (`payment::remaining_balance`) rather
//! than a running subtraction, so every row is independent of evaluation order
//! and rounding does not compound from month to month.
//! Each month then splits the level payment:
//!
//! - `interest  = balance_before × r`
//! - `principal = payment − interest`
//!
//! The last month is an adjusting row: it repays exactly the outstanding
//! balance so the schedule ends at zero.

use crate::domain::{AmortizationRow, LoanTerms};
use crate::engine::costs::MonthlyCosts;
use crate::engine::payment::remaining_balance;

/// Build the schedule rows (months `1..=num_months`).
///
/// `costs` must hold one entry per month.
pub fn build_rows(terms: &LoanTerms, costs: &[MonthlyCosts]) -> Vec<AmortizationRow> {
    debug_assert_eq!(costs.len(), terms.num_months as usize);

    let balance = |m: u32| {
        if m == 0 {
            terms.loan_amount
        } else {
            remaining_balance(terms.monthly_payment, terms.monthly_rate, terms.num_months - m)
        }
    };

    let mut rows = Vec::with_capacity(terms.num_months as usize);
    for (month, cost) in (1..=terms.num_months).zip(costs) {
        let before = balance(month - 1);
        let interest_paid = before * terms.monthly_rate;

        let (principal_paid, remaining_balance) = if month == terms.num_months {
            (before, 0.0)
        } else {
            (terms.monthly_payment - interest_paid, balance(month))
        };

        rows.push(AmortizationRow {
            month,
            principal_paid,
            interest_paid,
            remaining_balance,
            property_tax: cost.property_tax,
            insurance: cost.insurance,
        });
    }
    rows
}

/// Balances from the running-subtraction loop: each month pays interest on the
/// previous balance and applies the rest of the payment to principal.
///
/// Kept as a reference for the closed form.
pub fn iterative_balances(terms: &LoanTerms) -> Vec<f64> {
    let mut remaining = terms.loan_amount;
    (1..=terms.num_months)
        .map(|_| {
            let interest = remaining * terms.monthly_rate;
            remaining -= terms.monthly_payment - interest;
            remaining
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::payment::monthly_payment;

    fn terms(loan_amount: f64, annual_rate: f64, years: u32) -> LoanTerms {
        let monthly_rate = annual_rate / 12.0;
        let num_months = years * 12;
        LoanTerms {
            down_payment: 0.0,
            loan_amount,
            monthly_rate,
            num_months,
            monthly_payment: monthly_payment(loan_amount, monthly_rate, num_months),
        }
    }

    fn no_costs(n: u32) -> Vec<MonthlyCosts> {
        vec![MonthlyCosts { property_tax: 0.0, insurance: 0.0 }; n as usize]
    }

    #[test]
    fn closed_form_matches_running_balance() {
        let t = terms(540_000.0, 0.07125, 30);
        let rows = build_rows(&t, &no_costs(t.num_months));
        let iterative = iterative_balances(&t);
        for (row, b) in rows.iter().zip(&iterative) {
            assert!(
                (row.remaining_balance - b).abs() < 1e-6,
                "month {}: closed {} vs iterative {b}",
                row.month,
                row.remaining_balance
            );
        }
    }

    #[test]
    fn first_row_splits_payment() {
        let t = terms(540_000.0, 0.07125, 30);
        let rows = build_rows(&t, &no_costs(t.num_months));
        let first = rows[0];
        assert_eq!(first.month, 1);
        assert!((first.interest_paid - 540_000.0 * 0.0059375).abs() < 1e-9);
        assert!((first.principal_paid + first.interest_paid - t.monthly_payment).abs() < 1e-9);
    }

    #[test]
    fn final_row_clears_balance() {
        let t = terms(100_000.0, 0.06, 10);
        let rows = build_rows(&t, &no_costs(t.num_months));
        let last = rows.last().unwrap();
        assert_eq!(last.month, 120);
        assert_eq!(last.remaining_balance, 0.0);
        assert!((last.principal_paid + last.interest_paid - t.monthly_payment).abs() < 1e-6);
    }

    #[test]
    fn principal_telescopes_at_extreme_rates() {
        for (loan, rate, years) in [(540_000.0, 1.0, 30), (540_000.0, 0.12, 100), (1_000.0, 0.5, 100)] {
            let t = terms(loan, rate, years);
            let rows = build_rows(&t, &no_costs(t.num_months));
            let principal: f64 = rows.iter().map(|r| r.principal_paid).sum();
            assert!(
                ((principal - loan) / loan).abs() < 1e-9,
                "{rate} over {years}y: principal sums to {principal}"
            );
            assert!(rows.windows(2).all(|w| w[1].remaining_balance <= w[0].remaining_balance));
        }
    }

    #[test]
    fn one_year_loan_has_twelve_rows() {
        let t = terms(12_000.0, 0.0, 1);
        let rows = build_rows(&t, &no_costs(t.num_months));
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|r| r.interest_paid == 0.0 && r.principal_paid == 1000.0));
    }
}
