//! Payees: external entities the user owes money to.

use sea_orm::entity::{ActiveValue, prelude::*};
use uuid::Uuid;

use crate::EngineError;

/// An external entity (card issuer, lender, utility company) that holds debt
/// accounts for the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Payee {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
}

impl Payee {
    pub fn new(user_id: &str, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payee_accounts::Entity")]
    PayeeAccounts,
}

impl Related<super::payee_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayeeAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Payee> for ActiveModel {
    fn from(value: &Payee) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            name: ActiveValue::Set(value.name.clone()),
        }
    }
}

impl TryFrom<Model> for Payee {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidReference(format!("invalid payee id: {}", model.id)))?;
        Ok(Payee {
            id,
            user_id: model.user_id,
            name: model.name,
        })
    }
}
