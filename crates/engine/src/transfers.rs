//! Transfers: money moved between two cash accounts. Create-only.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// A transfer between two of the user's own accounts.
///
/// Transfers never appear in the deposit or cashflow reports; they only move
/// money the user already holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Transfer {
    pub id: Uuid,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: MoneyCents,
    pub date: NaiveDate,
}

impl Transfer {
    pub fn new(
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: MoneyCents,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_account_id,
            to_account_id,
            amount,
            date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub from_account_id: String,
    pub to_account_id: String,
    pub amount_minor: i64,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::FromAccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    FromAccounts,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::ToAccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ToAccounts,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transfer> for ActiveModel {
    fn from(value: &Transfer) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            from_account_id: ActiveValue::Set(value.from_account_id.to_string()),
            to_account_id: ActiveValue::Set(value.to_account_id.to_string()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            date: ActiveValue::Set(value.date),
        }
    }
}

impl TryFrom<Model> for Transfer {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidReference(format!("invalid transfer id: {}", model.id)))?;
        let from_account_id = Uuid::parse_str(&model.from_account_id).map_err(|_| {
            EngineError::InvalidReference(format!("invalid account id: {}", model.from_account_id))
        })?;
        let to_account_id = Uuid::parse_str(&model.to_account_id).map_err(|_| {
            EngineError::InvalidReference(format!("invalid account id: {}", model.to_account_id))
        })?;
        Ok(Transfer {
            id,
            from_account_id,
            to_account_id,
            amount: MoneyCents::new(model.amount_minor),
            date: model.date,
        })
    }
}
