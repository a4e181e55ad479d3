//! Read-only reporting operations. Each one loads a fresh snapshot and hands
//! it to the pure functions in [`crate::reports`] and [`crate::summary`].

use chrono::NaiveDate;

use crate::{
    DepositFilter, EnrichedPayeeAccount, MonthCashflow, PayeeAccount, PayeeBalanceSummary,
    ResultEngine, SourceTotal, Summary, reports, summary,
};

use super::{Engine, PaymentHistoryFilter};

impl Engine {
    /// Headline totals: cash on hand, debt due, and their difference.
    pub async fn summary(&self, user_id: &str) -> ResultEngine<Summary> {
        let accounts = self.list_accounts(user_id).await?;
        let enriched = self.enriched_payee_accounts(user_id).await?;
        Ok(summary::summarize(&accounts, &enriched))
    }

    /// Deposit totals grouped by source label, largest total first.
    pub async fn deposits_by_source(
        &self,
        user_id: &str,
        filter: DepositFilter,
    ) -> ResultEngine<Vec<SourceTotal>> {
        let deposits = self.list_deposits(user_id).await?;
        Ok(reports::deposits_by_source(&deposits, filter))
    }

    /// Monthly inflow/outflow buckets, chronologically ascending.
    pub async fn cashflow_monthly(
        &self,
        user_id: &str,
        year: Option<i32>,
    ) -> ResultEngine<Vec<MonthCashflow>> {
        let deposits = self.list_deposits(user_id).await?;
        let payments = self
            .payment_history(user_id, PaymentHistoryFilter::default())
            .await?;
        Ok(reports::cashflow_monthly(&deposits, &payments, year))
    }

    /// Debt totals grouped by payee and by category.
    pub async fn payee_balance_summary(&self, user_id: &str) -> ResultEngine<PayeeBalanceSummary> {
        let models = Self::payee_account_models_for(&self.database, user_id).await?;
        let accounts: Vec<PayeeAccount> = models
            .into_iter()
            .map(PayeeAccount::try_from)
            .collect::<ResultEngine<_>>()?;
        Ok(reports::payee_balance_summary(&accounts))
    }

    /// Payee accounts due within the horizon, soonest first.
    pub async fn upcoming_due(
        &self,
        user_id: &str,
        today: NaiveDate,
        within_days: i64,
    ) -> ResultEngine<Vec<EnrichedPayeeAccount>> {
        let enriched = self.enriched_payee_accounts(user_id).await?;
        Ok(reports::upcoming_due(&enriched, today, within_days))
    }
}
