//! Payee CRUD.

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Payee, ResultEngine, payees};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    pub(crate) async fn require_payee<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        payee_id: Uuid,
    ) -> ResultEngine<payees::Model> {
        let model = payees::Entity::find_by_id(payee_id.to_string())
            .one(conn)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("payee not exists".to_string()))?;
        if model.user_id != user_id {
            return Err(EngineError::KeyNotFound("payee not exists".to_string()));
        }
        Ok(model)
    }

    pub async fn create_payee(&self, user_id: &str, name: &str) -> ResultEngine<Payee> {
        let name = normalize_required_text(name, "payee name")?;
        let payee = Payee::new(user_id, name);
        payees::ActiveModel::from(&payee)
            .insert(&self.database)
            .await?;
        Ok(payee)
    }

    pub async fn list_payees(&self, user_id: &str) -> ResultEngine<Vec<Payee>> {
        let models = payees::Entity::find()
            .filter(payees::Column::UserId.eq(user_id))
            .order_by_asc(payees::Column::Name)
            .order_by_asc(payees::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Payee::try_from).collect()
    }

    pub async fn update_payee(
        &self,
        user_id: &str,
        payee_id: Uuid,
        name: &str,
    ) -> ResultEngine<Payee> {
        let name = normalize_required_text(name, "payee name")?;
        with_tx!(self, |db_tx| {
            Self::require_payee(&db_tx, user_id, payee_id).await?;
            let active = payees::ActiveModel {
                id: ActiveValue::Set(payee_id.to_string()),
                name: ActiveValue::Set(name.clone()),
                ..Default::default()
            };
            let model = active.update(&db_tx).await?;
            Payee::try_from(model)
        })
    }

    /// Deletes a payee. Its payee accounts are left in place; enrichment will
    /// report them with the `"Unknown"` display name from then on.
    pub async fn delete_payee(&self, user_id: &str, payee_id: Uuid) -> ResultEngine<()> {
        let model = Self::require_payee(&self.database, user_id, payee_id).await?;
        model.delete(&self.database).await?;
        Ok(())
    }
}
