//! Cash account CRUD.

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Account, AccountKind, EngineError, MoneyCents, ResultEngine, accounts};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    pub(crate) async fn require_account<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        account_id: Uuid,
    ) -> ResultEngine<accounts::Model> {
        let model = accounts::Entity::find_by_id(account_id.to_string())
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("account not exists".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::KeyNotFound("account not exists".to_string()));
        }
        Ok(model)
    }

    pub async fn create_account(
        &self,
        user_id: &str,
        kind: AccountKind,
        nickname: &str,
        opening_balance: MoneyCents,
    ) -> ResultEngine<Account> {
        let nickname = normalize_required_text(nickname, "account nickname")?;
        let account = Account::new(user_id, kind, nickname, opening_balance);
        accounts::ActiveModel::from(&account)
            .insert(&self.database)
            .await?;
        Ok(account)
    }

    pub async fn list_accounts(&self, user_id: &str) -> ResultEngine<Vec<Account>> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .order_by_asc(accounts::Column::Nickname)
            .order_by_asc(accounts::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Account::try_from).collect()
    }

    pub async fn account(&self, user_id: &str, account_id: Uuid) -> ResultEngine<Account> {
        let model = Self::require_account(&self.database, user_id, account_id).await?;
        Account::try_from(model)
    }

    /// Replaces an account's writable fields (full-payload update).
    pub async fn update_account(
        &self,
        user_id: &str,
        account_id: Uuid,
        kind: AccountKind,
        nickname: &str,
        balance: MoneyCents,
    ) -> ResultEngine<Account> {
        let nickname = normalize_required_text(nickname, "account nickname")?;
        with_tx!(self, |db_tx| {
            Self::require_account(&db_tx, user_id, account_id).await?;
            let active = accounts::ActiveModel {
                id: ActiveValue::Set(account_id.to_string()),
                kind: ActiveValue::Set(kind.as_str().to_string()),
                nickname: ActiveValue::Set(nickname.clone()),
                balance_minor: ActiveValue::Set(balance.cents()),
                ..Default::default()
            };
            let model = active.update(&db_tx).await?;
            Account::try_from(model)
        })
    }

    /// Ids of the user's cash accounts, used to scope deposit and payment reads.
    pub(crate) async fn owned_account_ids<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
    ) -> ResultEngine<Vec<String>> {
        let models = accounts::Entity::find()
            .filter(accounts::Column::UserId.eq(user_id))
            .all(conn)
            .await?;
        Ok(models.into_iter().map(|m| m.id).collect())
    }

    pub async fn delete_account(&self, user_id: &str, account_id: Uuid) -> ResultEngine<()> {
        let model = Self::require_account(&self.database, user_id, account_id).await?;
        model.delete(&self.database).await?;
        Ok(())
    }
}
