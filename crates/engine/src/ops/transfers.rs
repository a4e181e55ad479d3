//! Transfer operations. Transfers are create-only; there is no edit or
//! delete, matching how a bank statement treats a settled transfer.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, Transfer, transfers};

use super::{Engine, with_tx};

impl Engine {
    /// Moves money between two of the user's accounts. The source must hold
    /// at least the transferred amount.
    pub async fn create_transfer(
        &self,
        user_id: &str,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: MoneyCents,
        date: NaiveDate,
    ) -> ResultEngine<Transfer> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "transfer amount must be positive".to_string(),
            ));
        }
        if from_account_id == to_account_id {
            return Err(EngineError::InvalidReference(
                "cannot transfer an account to itself".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let from = Self::require_account(&db_tx, user_id, from_account_id).await?;
            let to = Self::require_account(&db_tx, user_id, to_account_id).await?;
            if MoneyCents::new(from.balance_minor) < amount {
                return Err(EngineError::InsufficientFunds(format!(
                    "account {} holds less than {}",
                    from.nickname, amount
                )));
            }

            let transfer = Transfer::new(from_account_id, to_account_id, amount, date);
            transfers::ActiveModel::from(&transfer).insert(&db_tx).await?;
            Self::adjust_account_balance(&db_tx, from, -amount).await?;
            Self::adjust_account_balance(&db_tx, to, amount).await?;
            Ok(transfer)
        })
    }

    /// Lists the user's transfers, newest first.
    pub async fn list_transfers(&self, user_id: &str) -> ResultEngine<Vec<Transfer>> {
        let account_ids = Self::owned_account_ids(&self.database, user_id).await?;
        let models = transfers::Entity::find()
            .filter(transfers::Column::FromAccountId.is_in(account_ids))
            .order_by_desc(transfers::Column::Date)
            .order_by_asc(transfers::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Transfer::try_from).collect()
    }
}
