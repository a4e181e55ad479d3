//! Payment advice: recommended payments and amortization schedules.

use crate::{DebtCategory, EngineError, InterestMode, MoneyCents, PayeeAccount};

/// One month of an amortization schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmortizationRow {
    /// 1-based month number.
    pub month: u32,
    pub payment: MoneyCents,
    pub principal: MoneyCents,
    pub interest: MoneyCents,
    pub remaining: MoneyCents,
}

/// A full amortization table plus the fixed monthly payment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmortizationSchedule {
    pub monthly_payment: MoneyCents,
    pub rows: Vec<AmortizationRow>,
}

fn round_cents(value: f64) -> i64 {
    value.round() as i64
}

/// Computes the standard fixed-payment amortization of `balance` over
/// `months` at `annual_rate` (fraction, e.g. 0.06 for 6% APR).
///
/// A zero or missing rate degrades to a straight division of the balance.
#[must_use]
pub fn amortize(balance: MoneyCents, annual_rate: f64, months: u32) -> AmortizationSchedule {
    let balance_cents = balance.cents().max(0) as f64;
    let monthly_rate = if annual_rate.is_finite() && annual_rate > 0.0 {
        annual_rate / 12.0
    } else {
        0.0
    };

    let payment = if monthly_rate > 0.0 && months > 0 {
        let factor = (1.0 + monthly_rate).powi(months as i32);
        balance_cents * (monthly_rate * factor) / (factor - 1.0)
    } else if months > 0 {
        balance_cents / f64::from(months)
    } else {
        balance_cents
    };

    let mut rows = Vec::with_capacity(months as usize);
    let mut remaining = balance_cents;
    for month in 1..=months {
        let interest = remaining * monthly_rate;
        let principal = payment - interest;
        remaining -= principal;
        rows.push(AmortizationRow {
            month,
            payment: MoneyCents::new(round_cents(payment)),
            principal: MoneyCents::new(round_cents(principal)),
            interest: MoneyCents::new(round_cents(interest)),
            remaining: MoneyCents::new(round_cents(remaining.max(0.0))),
        });
    }

    AmortizationSchedule {
        monthly_payment: MoneyCents::new(round_cents(payment)),
        rows,
    }
}

/// Suggests a payment for a payee account.
///
/// - Amortized loans with a term: the fixed amortization payment.
/// - Credit cards on a promo term: balance spread over the remaining term,
///   floored at the required minimum payment when one is set.
/// - Other credit cards: pay the balance in full.
/// - Everything else: zero.
#[must_use]
pub fn recommended_payment(account: &PayeeAccount) -> MoneyCents {
    let current = account.current_balance.unwrap_or(MoneyCents::ZERO);

    if account.interest_mode == InterestMode::LoanAmortized
        && let Some(term) = account.loan_term_months.filter(|t| *t > 0)
    {
        let rate = account.interest_rate.unwrap_or(0.0);
        return amortize(current, rate, term as u32).monthly_payment;
    }

    if account.category == DebtCategory::CreditCard {
        if let Some(promo) = account.promo_term_months.filter(|t| *t > 0) {
            let promo_payment = MoneyCents::new(round_cents(
                current.cents().max(0) as f64 / f64::from(promo),
            ));
            return match account.min_payment {
                Some(min) => promo_payment.max(min),
                None => promo_payment,
            };
        }
        return current.floor_zero();
    }

    MoneyCents::ZERO
}

/// Builds the amortization schedule for a payee account.
///
/// Errors when the account carries no loan term; amortization only makes
/// sense for term loans.
pub fn amortization_schedule(account: &PayeeAccount) -> Result<AmortizationSchedule, EngineError> {
    let term = account
        .loan_term_months
        .filter(|t| *t > 0)
        .ok_or_else(|| {
            EngineError::InvalidAmount(
                "amortization only available for loans with a term".to_string(),
            )
        })?;
    let current = account.current_balance.unwrap_or(MoneyCents::ZERO);
    let rate = account.interest_rate.unwrap_or(0.0);
    Ok(amortize(current, rate, term as u32))
}
