//! Payee-account CRUD, enrichment reads, advice, and interest accrual.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    AmortizationSchedule, DebtCategory, EngineError, EnrichedPayeeAccount, InterestMode,
    MoneyCents, PayeeAccount, ResultEngine, advice, enrichment, interest, payee_accounts, payees,
};

use super::{Engine, normalize_required_text, with_tx};

/// Writable fields of a payee account. Create and update both take the full
/// set: a `None` in a nullable field clears it (round-trips as JSON `null`).
#[derive(Clone, Debug)]
pub struct PayeeAccountChange {
    pub payee_id: Uuid,
    pub label: String,
    pub account_number: Option<String>,
    pub category: DebtCategory,
    pub interest_mode: InterestMode,
    pub interest_rate: Option<f64>,
    pub current_balance: Option<MoneyCents>,
    pub principal_balance: Option<MoneyCents>,
    pub accrued_interest: Option<MoneyCents>,
    pub due_date: Option<NaiveDate>,
    pub loan_term_months: Option<i32>,
    pub promo_term_months: Option<i32>,
    pub min_payment: Option<MoneyCents>,
}

impl Engine {
    pub(crate) async fn require_payee_account<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        payee_account_id: Uuid,
    ) -> ResultEngine<PayeeAccount> {
        let model = payee_accounts::Entity::find_by_id(payee_account_id.to_string())
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("payee account not exists".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::KeyNotFound("payee account not exists".to_string()));
        }
        PayeeAccount::try_from(model)
    }

    pub(crate) async fn payee_account_models_for<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
    ) -> ResultEngine<Vec<payee_accounts::Model>> {
        let models = payee_accounts::Entity::find()
            .filter(payee_accounts::Column::UserId.eq(user_id))
            .order_by_asc(payee_accounts::Column::Label)
            .order_by_asc(payee_accounts::Column::Id)
            .all(conn)
            .await?;
        Ok(models)
    }

    pub async fn create_payee_account(
        &self,
        user_id: &str,
        change: PayeeAccountChange,
    ) -> ResultEngine<PayeeAccount> {
        let label = normalize_required_text(&change.label, "account label")?;
        with_tx!(self, |db_tx| {
            Self::require_payee(&db_tx, user_id, change.payee_id).await?;
            let account = PayeeAccount {
                id: Uuid::new_v4(),
                user_id: user_id.to_string(),
                payee_id: change.payee_id,
                label,
                account_number: change.account_number.clone(),
                category: change.category,
                interest_mode: change.interest_mode,
                interest_rate: change.interest_rate,
                current_balance: change.current_balance,
                principal_balance: change.principal_balance,
                accrued_interest: change.accrued_interest,
                due_date: change.due_date,
                last_interest_accrual: None,
                loan_term_months: change.loan_term_months,
                promo_term_months: change.promo_term_months,
                min_payment: change.min_payment,
            };
            payee_accounts::ActiveModel::from(&account).insert(&db_tx).await?;
            Ok(account)
        })
    }

    /// Lists the user's payee accounts, each enriched with its payee's
    /// display name (or `"Unknown"` for dangling references).
    ///
    /// The enriched view is rebuilt from the current snapshot on every call;
    /// nothing is cached.
    pub async fn enriched_payee_accounts(
        &self,
        user_id: &str,
    ) -> ResultEngine<Vec<EnrichedPayeeAccount>> {
        let payee_models = payees::Entity::find()
            .filter(payees::Column::UserId.eq(user_id))
            .all(&self.database)
            .await?;
        let payees: Vec<crate::Payee> = payee_models
            .into_iter()
            .map(crate::Payee::try_from)
            .collect::<ResultEngine<_>>()?;

        let account_models = Self::payee_account_models_for(&self.database, user_id).await?;
        let accounts: Vec<PayeeAccount> = account_models
            .into_iter()
            .map(PayeeAccount::try_from)
            .collect::<ResultEngine<_>>()?;

        Ok(enrichment::enrich(accounts, &payees))
    }

    /// Single-account variant of [`Engine::enriched_payee_accounts`].
    pub async fn enriched_payee_account(
        &self,
        user_id: &str,
        payee_account_id: Uuid,
    ) -> ResultEngine<EnrichedPayeeAccount> {
        let account =
            Self::require_payee_account(&self.database, user_id, payee_account_id).await?;
        let payee_name = payees::Entity::find_by_id(account.payee_id.to_string())
            .one(&self.database)
            .await?
            .map_or_else(|| enrichment::UNKNOWN_PAYEE.to_string(), |p| p.name);
        Ok(EnrichedPayeeAccount {
            account,
            payee_name,
        })
    }

    /// Replaces a payee account's writable fields (full-payload update).
    pub async fn update_payee_account(
        &self,
        user_id: &str,
        payee_account_id: Uuid,
        change: PayeeAccountChange,
    ) -> ResultEngine<PayeeAccount> {
        let label = normalize_required_text(&change.label, "account label")?;
        with_tx!(self, |db_tx| {
            let existing = Self::require_payee_account(&db_tx, user_id, payee_account_id).await?;
            Self::require_payee(&db_tx, user_id, change.payee_id).await?;
            let account = PayeeAccount {
                id: payee_account_id,
                user_id: user_id.to_string(),
                payee_id: change.payee_id,
                label,
                account_number: change.account_number.clone(),
                category: change.category,
                interest_mode: change.interest_mode,
                interest_rate: change.interest_rate,
                current_balance: change.current_balance,
                principal_balance: change.principal_balance,
                accrued_interest: change.accrued_interest,
                due_date: change.due_date,
                last_interest_accrual: existing.last_interest_accrual,
                loan_term_months: change.loan_term_months,
                promo_term_months: change.promo_term_months,
                min_payment: change.min_payment,
            };
            let active = payee_accounts::ActiveModel::from(&account);
            active.update(&db_tx).await?;
            Ok(account)
        })
    }

    pub async fn delete_payee_account(
        &self,
        user_id: &str,
        payee_account_id: Uuid,
    ) -> ResultEngine<()> {
        let account = Self::require_payee_account(&self.database, user_id, payee_account_id).await?;
        payee_accounts::Entity::delete_by_id(account.id.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Suggested payment for one payee account (see [`advice`]).
    pub async fn recommended_payment(
        &self,
        user_id: &str,
        payee_account_id: Uuid,
    ) -> ResultEngine<MoneyCents> {
        let account = Self::require_payee_account(&self.database, user_id, payee_account_id).await?;
        Ok(advice::recommended_payment(&account))
    }

    /// Amortization schedule for a term loan.
    pub async fn amortization_schedule(
        &self,
        user_id: &str,
        payee_account_id: Uuid,
    ) -> ResultEngine<AmortizationSchedule> {
        let account = Self::require_payee_account(&self.database, user_id, payee_account_id).await?;
        advice::amortization_schedule(&account)
    }

    /// Runs the monthly interest accrual over all of the user's payee
    /// accounts. Returns how many accounts changed. Accounts already accrued
    /// this calendar month are skipped.
    pub async fn accrue_monthly_interest(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let models = Self::payee_account_models_for(&db_tx, user_id).await?;
            let mut updated = 0u64;
            for model in models {
                let mut account = PayeeAccount::try_from(model)?;
                if interest::accrue_monthly(&mut account, today) {
                    let active = payee_accounts::ActiveModel::from(&account);
                    active.update(&db_tx).await?;
                    updated += 1;
                }
            }
            tracing::debug!(updated, "monthly interest accrual finished");
            Ok(updated)
        })
    }
}
