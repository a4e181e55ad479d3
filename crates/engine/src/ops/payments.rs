//! Payment CRUD. Creating a payment debits the checking account and applies
//! the amount to the payee account per its interest mode.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, Payment, ResultEngine, payee_accounts, payments};

use super::{Engine, with_tx};

/// Optional narrowing for [`Engine::payment_history`].
#[derive(Clone, Debug, Default)]
pub struct PaymentHistoryFilter {
    pub payee_account_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Engine {
    pub(crate) async fn require_payment<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        payment_id: Uuid,
    ) -> ResultEngine<Payment> {
        let model = payments::Entity::find_by_id(payment_id.to_string())
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("payment not exists".to_string()))?;
        let payment = Payment::try_from(model)?;
        Self::require_account(conn, user_id, payment.checking_account_id).await?;
        Ok(payment)
    }

    /// Records a payment: debits the checking account, then reduces the payee
    /// account's balances according to its interest mode. All three writes
    /// share one transaction.
    pub async fn create_payment(
        &self,
        user_id: &str,
        checking_account_id: Uuid,
        payee_account_id: Uuid,
        amount: MoneyCents,
        date: NaiveDate,
    ) -> ResultEngine<Payment> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "payment amount must be positive".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let checking = Self::require_account(&db_tx, user_id, checking_account_id).await?;
            let mut target = Self::require_payee_account(&db_tx, user_id, payee_account_id).await?;

            let payment = Payment::new(checking_account_id, payee_account_id, amount, date);
            payments::ActiveModel::from(&payment).insert(&db_tx).await?;

            Self::adjust_account_balance(&db_tx, checking, -amount).await?;

            target.apply_payment(amount);
            let active = payee_accounts::ActiveModel::from(&target);
            active.update(&db_tx).await?;

            Ok(payment)
        })
    }

    /// Lists the user's payments, newest first.
    pub async fn list_payments(&self, user_id: &str) -> ResultEngine<Vec<Payment>> {
        self.payment_history(user_id, PaymentHistoryFilter::default())
            .await
    }

    /// Payment history, newest first, optionally narrowed by payee account
    /// and an inclusive date window.
    pub async fn payment_history(
        &self,
        user_id: &str,
        filter: PaymentHistoryFilter,
    ) -> ResultEngine<Vec<Payment>> {
        let account_ids = Self::owned_account_ids(&self.database, user_id).await?;
        let mut query = payments::Entity::find()
            .filter(payments::Column::CheckingAccountId.is_in(account_ids));
        if let Some(payee_account_id) = filter.payee_account_id {
            query = query.filter(payments::Column::PayeeAccountId.eq(payee_account_id.to_string()));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(payments::Column::Date.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(payments::Column::Date.lte(end));
        }
        let models = query
            .order_by_desc(payments::Column::Date)
            .order_by_asc(payments::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Payment::try_from).collect()
    }

    /// Rewrites a payment record. The edit does not re-run the balance side
    /// effects of the original payment; it corrects the historical record
    /// only.
    pub async fn update_payment(
        &self,
        user_id: &str,
        payment_id: Uuid,
        checking_account_id: Uuid,
        payee_account_id: Uuid,
        amount: MoneyCents,
        date: NaiveDate,
    ) -> ResultEngine<Payment> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "payment amount must be positive".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            Self::require_payment(&db_tx, user_id, payment_id).await?;
            Self::require_account(&db_tx, user_id, checking_account_id).await?;
            Self::require_payee_account(&db_tx, user_id, payee_account_id).await?;
            let payment = Payment {
                id: payment_id,
                checking_account_id,
                payee_account_id,
                amount,
                date,
            };
            let active = payments::ActiveModel::from(&payment);
            active.update(&db_tx).await?;
            Ok(payment)
        })
    }

    /// Removes a payment record without touching any balances.
    pub async fn delete_payment(&self, user_id: &str, payment_id: Uuid) -> ResultEngine<()> {
        let payment = Self::require_payment(&self.database, user_id, payment_id).await?;
        payments::Entity::delete_by_id(payment.id.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }
}
