//! Deposit CRUD. Every write keeps the target account's balance in step.

use chrono::NaiveDate;
use sea_orm::{
    ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{Deposit, EngineError, MoneyCents, ResultEngine, accounts, deposits};

use super::{Engine, normalize_required_text, with_tx};

/// Writable fields of a deposit; create and update take the full set.
#[derive(Clone, Debug)]
pub struct DepositChange {
    pub account_id: Uuid,
    pub source: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
}

impl Engine {
    pub(crate) async fn require_deposit<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        deposit_id: Uuid,
    ) -> ResultEngine<Deposit> {
        let model = deposits::Entity::find_by_id(deposit_id.to_string())
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("deposit not exists".to_string()))?;
        let deposit = Deposit::try_from(model)?;
        Self::require_account(conn, user_id, deposit.account_id).await?;
        Ok(deposit)
    }

    /// Shifts an account's stored balance by `delta` cents.
    pub(crate) async fn adjust_account_balance<C: ConnectionTrait>(
        conn: &C,
        model: accounts::Model,
        delta: MoneyCents,
    ) -> ResultEngine<()> {
        let balance = MoneyCents::new(model.balance_minor)
            .checked_add(delta)
            .ok_or_else(|| {
                EngineError::InvalidAmount("account balance overflow".to_string())
            })?;
        let active = accounts::ActiveModel {
            id: ActiveValue::Set(model.id),
            balance_minor: ActiveValue::Set(balance.cents()),
            ..Default::default()
        };
        active.update(conn).await?;
        Ok(())
    }

    /// Records a deposit and credits the target account.
    pub async fn create_deposit(
        &self,
        user_id: &str,
        change: DepositChange,
    ) -> ResultEngine<Deposit> {
        let source = normalize_required_text(&change.source, "deposit source")?;
        if !change.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "deposit amount must be positive".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let account = Self::require_account(&db_tx, user_id, change.account_id).await?;
            let deposit = Deposit::new(change.account_id, source, change.amount, change.date);
            deposits::ActiveModel::from(&deposit).insert(&db_tx).await?;
            Self::adjust_account_balance(&db_tx, account, change.amount).await?;
            Ok(deposit)
        })
    }

    /// Lists the user's deposits, newest first.
    pub async fn list_deposits(&self, user_id: &str) -> ResultEngine<Vec<Deposit>> {
        let models = Self::deposit_models_for(&self.database, user_id).await?;
        models.into_iter().map(Deposit::try_from).collect()
    }

    /// Rewrites a deposit, undoing its old balance effect and applying the
    /// new one (the deposit may move between accounts).
    pub async fn update_deposit(
        &self,
        user_id: &str,
        deposit_id: Uuid,
        change: DepositChange,
    ) -> ResultEngine<Deposit> {
        let source = normalize_required_text(&change.source, "deposit source")?;
        if !change.amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "deposit amount must be positive".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let existing = Self::require_deposit(&db_tx, user_id, deposit_id).await?;
            let old_account = Self::require_account(&db_tx, user_id, existing.account_id).await?;
            Self::adjust_account_balance(&db_tx, old_account, -existing.amount).await?;

            let new_account = Self::require_account(&db_tx, user_id, change.account_id).await?;
            Self::adjust_account_balance(&db_tx, new_account, change.amount).await?;

            let deposit = Deposit {
                id: deposit_id,
                account_id: change.account_id,
                source,
                amount: change.amount,
                date: change.date,
            };
            let active = deposits::ActiveModel::from(&deposit);
            active.update(&db_tx).await?;
            Ok(deposit)
        })
    }

    /// Removes a deposit and debits the account it had credited.
    pub async fn delete_deposit(&self, user_id: &str, deposit_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let deposit = Self::require_deposit(&db_tx, user_id, deposit_id).await?;
            let account = Self::require_account(&db_tx, user_id, deposit.account_id).await?;
            Self::adjust_account_balance(&db_tx, account, -deposit.amount).await?;
            deposits::Entity::delete_by_id(deposit.id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    pub(crate) async fn deposit_models_for<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
    ) -> ResultEngine<Vec<deposits::Model>> {
        let account_ids = Self::owned_account_ids(conn, user_id).await?;
        let models = deposits::Entity::find()
            .filter(deposits::Column::AccountId.is_in(account_ids))
            .order_by_desc(deposits::Column::Date)
            .order_by_asc(deposits::Column::Id)
            .all(conn)
            .await?;
        Ok(models)
    }
}
