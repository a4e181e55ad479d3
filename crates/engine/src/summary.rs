//! Dashboard summary totals.

use crate::{Account, EnrichedPayeeAccount, MoneyCents};

/// Scalar totals shown at the top of the dashboard.
///
/// The wire shape lives in `api_types`; this struct stays in integer cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_cash: MoneyCents,
    pub total_due: MoneyCents,
    pub net_worth: MoneyCents,
}

/// Computes the summary totals from a snapshot.
///
/// Pure reduction in integer cents, so the result is independent of input
/// order and `net_worth == total_cash - total_due` holds exactly. A `None`
/// current balance contributes zero. "Total due" sums current balances only:
/// the interest modes keep `current = principal + accrued`, so the current
/// balance already is the amount owed and netting the parts separately would
/// double-count.
#[must_use]
pub fn summarize(accounts: &[Account], payee_accounts: &[EnrichedPayeeAccount]) -> Summary {
    let total_cash: MoneyCents = accounts.iter().map(|account| account.balance).sum();
    let total_due: MoneyCents = payee_accounts
        .iter()
        .filter_map(|enriched| enriched.account.current_balance)
        .sum();

    Summary {
        total_cash,
        total_due,
        net_worth: total_cash - total_due,
    }
}
