//! Level-payment (annuity) arithmetic.
//!
//! Growth factors `(1 + r)^m` are evaluated as `exp(m · ln_1p(r))` and
//! `(1 + r)^m − 1` as `exp_m1(m · ln_1p(r))`, which keeps the payment and the
//! balance accurate for very small monthly rates.

/// Monthly principal + interest payment that fully amortizes `loan_amount`
/// over `num_months` at `monthly_rate`.
///
/// `monthly_rate == 0` degenerates to straight-line repayment `loan_amount / num_months`.
pub fn monthly_payment(loan_amount: f64, monthly_rate: f64, num_months: u32) -> f64 {
    let n = num_months as f64;
    if monthly_rate == 0.0 {
        return loan_amount / n;
    }
    let log_growth = n * monthly_rate.ln_1p();
    loan_amount * monthly_rate * log_growth.exp() / log_growth.exp_m1()
}

/// Balance still owed with `months_left` level payments to go.
///
/// This is the closed form `B(m) = P(1+r)^m − pmt · ((1+r)^m − 1) / r`
/// rewritten as the present value of the remaining payments:
///
/// ```text
/// B = pmt · (1 − (1+r)^−k) / r        k = months_left
/// ```
///
/// The two are equal when `pmt` amortizes `P`, but this form never subtracts
/// two large growth terms, so it stays accurate at high rates and long terms.
/// `months_left == 0` is exactly zero.
pub fn remaining_balance(payment: f64, monthly_rate: f64, months_left: u32) -> f64 {
    let k = months_left as f64;
    if monthly_rate == 0.0 {
        return payment * k;
    }
    -payment * (-k * monthly_rate.ln_1p()).exp_m1() / monthly_rate
}
