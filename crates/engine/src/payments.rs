//! Payments: money moved from a checking account to a payee account.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// A payment against a payee-held debt account.
#[derive(Clone, Debug, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    /// Source cash account (checking).
    pub checking_account_id: Uuid,
    /// Destination debt account.
    pub payee_account_id: Uuid,
    pub amount: MoneyCents,
    pub date: NaiveDate,
}

impl Payment {
    pub fn new(
        checking_account_id: Uuid,
        payee_account_id: Uuid,
        amount: MoneyCents,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            checking_account_id,
            payee_account_id,
            amount,
            date,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub checking_account_id: String,
    pub payee_account_id: String,
    pub amount_minor: i64,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::CheckingAccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Accounts,
    #[sea_orm(
        belongs_to = "super::payee_accounts::Entity",
        from = "Column::PayeeAccountId",
        to = "super::payee_accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    PayeeAccounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::payee_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayeeAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Payment> for ActiveModel {
    fn from(value: &Payment) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            checking_account_id: ActiveValue::Set(value.checking_account_id.to_string()),
            payee_account_id: ActiveValue::Set(value.payee_account_id.to_string()),
            amount_minor: ActiveValue::Set(value.amount.cents()),
            date: ActiveValue::Set(value.date),
        }
    }
}

impl TryFrom<Model> for Payment {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidReference(format!("invalid payment id: {}", model.id)))?;
        let checking_account_id = Uuid::parse_str(&model.checking_account_id).map_err(|_| {
            EngineError::InvalidReference(format!(
                "invalid account id: {}",
                model.checking_account_id
            ))
        })?;
        let payee_account_id = Uuid::parse_str(&model.payee_account_id).map_err(|_| {
            EngineError::InvalidReference(format!(
                "invalid payee account id: {}",
                model.payee_account_id
            ))
        })?;
        Ok(Payment {
            id,
            checking_account_id,
            payee_account_id,
            amount: MoneyCents::new(model.amount_minor),
            date: model.date,
        })
    }
}
