//! User-held cash accounts (checking/savings).

use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// Kind of cash account a user holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
}

impl AccountKind {
    /// Canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        }
    }
}

impl TryFrom<&str> for AccountKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            other => Err(EngineError::InvalidReference(format!(
                "unknown account kind: {other}"
            ))),
        }
    }
}

/// A cash account: a place where the user's own money sits.
///
/// The balance is denormalized; deposits, payments and transfers adjust it in
/// the same database transaction that records them.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    /// Stable identifier, generated once and persisted.
    pub id: Uuid,
    /// Owning (authenticated) user.
    pub user_id: String,
    pub kind: AccountKind,
    pub nickname: String,
    pub balance: MoneyCents,
}

impl Account {
    pub fn new(user_id: &str, kind: AccountKind, nickname: String, balance: MoneyCents) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            kind,
            nickname,
            balance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub nickname: String,
    pub balance_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::deposits::Entity")]
    Deposits,
}

impl Related<super::deposits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deposits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Account> for ActiveModel {
    fn from(value: &Account) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            kind: ActiveValue::Set(value.kind.as_str().to_string()),
            nickname: ActiveValue::Set(value.nickname.clone()),
            balance_minor: ActiveValue::Set(value.balance.cents()),
        }
    }
}

impl TryFrom<Model> for Account {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::InvalidReference(format!("invalid account id: {}", model.id)))?;
        Ok(Account {
            id,
            user_id: model.user_id,
            kind: AccountKind::try_from(model.kind.as_str())?,
            nickname: model.nickname,
            balance: MoneyCents::new(model.balance_minor),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_round_trip() {
        let account = Account::new(
            "alice",
            AccountKind::Checking,
            "Everyday".to_string(),
            MoneyCents::new(150_000),
        );
        let active = ActiveModel::from(&account);
        let model = Model {
            id: account.id.to_string(),
            user_id: "alice".to_string(),
            kind: "checking".to_string(),
            nickname: "Everyday".to_string(),
            balance_minor: 150_000,
        };
        assert_eq!(active.id.clone().unwrap(), model.id);
        assert_eq!(Account::try_from(model).unwrap(), account);
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(AccountKind::try_from("cheque").is_err());
    }
}
