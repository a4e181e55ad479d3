//! Monthly interest accrual for payee accounts.

use chrono::{Datelike, NaiveDate};

use crate::{InterestMode, MoneyCents, PayeeAccount};

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn monthly_interest(base: Option<MoneyCents>, annual_rate: Option<f64>) -> i64 {
    let base = base.map_or(0, MoneyCents::cents);
    let rate = annual_rate.unwrap_or(0.0);
    if base <= 0 || !rate.is_finite() || rate <= 0.0 {
        return 0;
    }
    // Round to whole cents at each accrual step.
    (base as f64 * rate / 12.0).round() as i64
}

/// Applies one month of interest to a payee account.
///
/// Returns `false` (leaving the account untouched) when interest was already
/// accrued this calendar month or the mode never accrues. Otherwise mutates
/// the balances per mode, stamps `last_interest_accrual`, and returns `true`.
pub fn accrue_monthly(account: &mut PayeeAccount, today: NaiveDate) -> bool {
    if account
        .last_interest_accrual
        .is_some_and(|last| same_month(last, today))
    {
        return false;
    }

    match account.interest_mode {
        InterestMode::None => return false,
        InterestMode::PayInFull => {
            // New cycle: a pay-in-full account starts the month cleared.
            account.current_balance = Some(MoneyCents::ZERO);
            account.principal_balance = Some(MoneyCents::ZERO);
            account.accrued_interest = Some(MoneyCents::ZERO);
        }
        InterestMode::Compound => {
            let interest = monthly_interest(account.current_balance, account.interest_rate);
            if interest > 0 {
                let current =
                    account.current_balance.unwrap_or(MoneyCents::ZERO) + MoneyCents::new(interest);
                let accrued = account.accrued_interest.unwrap_or(MoneyCents::ZERO)
                    + MoneyCents::new(interest);
                account.current_balance = Some(current);
                account.accrued_interest = Some(accrued);
                account.principal_balance = Some((current - accrued).floor_zero());
            }
        }
        InterestMode::LoanAmortized => {
            let interest = monthly_interest(account.principal_balance, account.interest_rate);
            if interest > 0 {
                let accrued = account.accrued_interest.unwrap_or(MoneyCents::ZERO)
                    + MoneyCents::new(interest);
                account.accrued_interest = Some(accrued);
                account.current_balance =
                    Some(account.principal_balance.unwrap_or(MoneyCents::ZERO) + accrued);
            }
        }
    }

    account.last_interest_accrual = Some(today);
    true
}
