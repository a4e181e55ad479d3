//! Report groupings backing the dashboard charts.
//!
//! Each report is a pure function over a snapshot of its input collections.
//! Recomputing on the same snapshot yields an identical result; the HTTP
//! layer refetches after every mutation that could change a total.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::{DebtCategory, Deposit, EnrichedPayeeAccount, MoneyCents, PayeeAccount, Payment};

/// One row of the deposits-by-source report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceTotal {
    pub name: String,
    pub count: u64,
    pub total: MoneyCents,
}

/// Optional filters for the deposits-by-source report.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepositFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub account_id: Option<Uuid>,
}

impl DepositFilter {
    fn matches(&self, deposit: &Deposit) -> bool {
        if let Some(start) = self.start_date
            && deposit.date < start
        {
            return false;
        }
        if let Some(end) = self.end_date
            && deposit.date > end
        {
            return false;
        }
        if let Some(account_id) = self.account_id
            && deposit.account_id != account_id
        {
            return false;
        }
        true
    }
}

/// Groups deposits by their exact source label.
///
/// The grouping key is case- and whitespace-sensitive. Rows are ordered
/// descending by total with ties broken by name ascending, so the chart's
/// position-based colors stay stable across refreshes.
#[must_use]
pub fn deposits_by_source(deposits: &[Deposit], filter: DepositFilter) -> Vec<SourceTotal> {
    let mut totals: HashMap<&str, (u64, MoneyCents)> = HashMap::new();
    for deposit in deposits.iter().filter(|d| filter.matches(d)) {
        let entry = totals
            .entry(deposit.source.as_str())
            .or_insert((0, MoneyCents::ZERO));
        entry.0 += 1;
        entry.1 += deposit.amount;
    }

    let mut rows: Vec<SourceTotal> = totals
        .into_iter()
        .map(|(name, (count, total))| SourceTotal {
            name: name.to_string(),
            count,
            total,
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    rows
}

/// Calendar month used as the cashflow bucket key. Orders chronologically and
/// renders as `YYYY-MM`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One row of the monthly cashflow report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthCashflow {
    pub month: MonthKey,
    pub deposits: MoneyCents,
    pub payments: MoneyCents,
    pub net: MoneyCents,
}

/// Buckets deposits and payments by calendar month.
///
/// Every month present in either input appears, with the missing side at
/// zero. Output is chronologically ascending. Transfers are not an input by
/// construction: a transfer-only data set produces an empty report.
#[must_use]
pub fn cashflow_monthly(
    deposits: &[Deposit],
    payments: &[Payment],
    year: Option<i32>,
) -> Vec<MonthCashflow> {
    let mut months: BTreeMap<MonthKey, (MoneyCents, MoneyCents)> = BTreeMap::new();

    for deposit in deposits {
        let key = MonthKey::of(deposit.date);
        if year.is_some_and(|y| y != key.year) {
            continue;
        }
        months.entry(key).or_default().0 += deposit.amount;
    }
    for payment in payments {
        let key = MonthKey::of(payment.date);
        if year.is_some_and(|y| y != key.year) {
            continue;
        }
        months.entry(key).or_default().1 += payment.amount;
    }

    months
        .into_iter()
        .map(|(month, (inflow, outflow))| MonthCashflow {
            month,
            deposits: inflow,
            payments: outflow,
            net: inflow - outflow,
        })
        .collect()
}

/// Current-balance totals grouped by payee and by category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PayeeBalanceSummary {
    /// `(payee_id, total)` ordered by payee id for a stable listing.
    pub by_payee: Vec<(Uuid, MoneyCents)>,
    /// `(category, total)` ordered by category.
    pub by_category: Vec<(DebtCategory, MoneyCents)>,
}

/// Groups payee-account current balances by payee and by category.
///
/// `None` balances contribute zero, matching the summary totals.
#[must_use]
pub fn payee_balance_summary(payee_accounts: &[PayeeAccount]) -> PayeeBalanceSummary {
    let mut by_payee: BTreeMap<Uuid, MoneyCents> = BTreeMap::new();
    let mut by_category: BTreeMap<DebtCategory, MoneyCents> = BTreeMap::new();

    for account in payee_accounts {
        let balance = account.current_balance.unwrap_or(MoneyCents::ZERO);
        *by_payee.entry(account.payee_id).or_default() += balance;
        *by_category.entry(account.category).or_default() += balance;
    }

    PayeeBalanceSummary {
        by_payee: by_payee.into_iter().collect(),
        by_category: by_category.into_iter().collect(),
    }
}

/// Filters payee accounts whose due date falls within the horizon, ascending
/// by due date. Accounts without a due date never appear. Works on the
/// enriched view so the dashboard can show the payee name next to each row.
#[must_use]
pub fn upcoming_due(
    payee_accounts: &[EnrichedPayeeAccount],
    today: NaiveDate,
    within_days: i64,
) -> Vec<EnrichedPayeeAccount> {
    let horizon = today + chrono::Duration::days(within_days);
    let mut due: Vec<EnrichedPayeeAccount> = payee_accounts
        .iter()
        .filter(|enriched| enriched.account.due_date.is_some_and(|d| d <= horizon))
        .cloned()
        .collect();
    due.sort_by_key(|enriched| enriched.account.due_date);
    due
}
