//! Deposits: money added to an account from an external source.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// A deposit into a cash account.
///
/// `source` is a free-text label ("Employer A", "Client B"); the
/// deposits-by-source report groups on it with exact string matching.
#[derive(Clone, Debug, PartialEq)]
pub struct Deposit {
    pub id: Uuid,
    pub account_id: Uuid,
    pub source: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
}

impl Deposit {
    pub fn new(account_id: Uuid, source: String, amount: MoneyCents, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            source,
            amount,
            date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "deposits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub account_id: String,
    pub source: String,
    pub amount_minor: i64,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Deposit> for ActiveModel {
    fn from(value: &Deposit) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            account_id: ActiveValue::Set(value.account_id.to_string()),
            source: ActiveValue::Set(value.source.clone()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            date: ActiveValue::Set(value.date),
        }
    }
}

impl TryFrom<Model> for Deposit {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidReference(format!("invalid deposit id: {}", model.id)))?;
        let account_id = Uuid::parse_str(&model.account_id).map_err(|_| {
            EngineError::InvalidReference(format!("invalid account id: {}", model.account_id))
        })?;
        Ok(Deposit {
            id,
            account_id,
            source: model.source,
            amount: MoneyCents::new(model.amount_minor),
            date: model.date,
        })
    }
}
