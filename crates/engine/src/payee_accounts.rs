//! Payee-held debt accounts (credit cards, loans, mortgages, utilities).

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents};

/// Category of debt instrument held by a payee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    CreditCard,
    Loan,
    Mortgage,
    Utility,
}

impl DebtCategory {
    /// Canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DebtCategory::CreditCard => "credit_card",
            DebtCategory::Loan => "loan",
            DebtCategory::Mortgage => "mortgage",
            DebtCategory::Utility => "utility",
        }
    }
}

impl TryFrom<&str> for DebtCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "credit_card" => Ok(DebtCategory::CreditCard),
            "loan" => Ok(DebtCategory::Loan),
            "mortgage" => Ok(DebtCategory::Mortgage),
            "utility" => Ok(DebtCategory::Utility),
            other => Err(EngineError::InvalidReference(format!(
                "unknown debt category: {other}"
            ))),
        }
    }
}

/// How interest accrues on a payee account.
///
/// - `None`: no interest is ever charged (utilities).
/// - `PayInFull`: statement balance is expected to be cleared each cycle.
/// - `Compound`: monthly interest on the whole outstanding balance.
/// - `LoanAmortized`: monthly interest on the principal only; payments go to
///   accrued interest first, then principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestMode {
    None,
    PayInFull,
    Compound,
    LoanAmortized,
}

impl InterestMode {
    /// Canonical string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            InterestMode::None => "none",
            InterestMode::PayInFull => "pay_in_full",
            InterestMode::Compound => "compound",
            InterestMode::LoanAmortized => "loan_amortized",
        }
    }
}

impl TryFrom<&str> for InterestMode {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "none" => Ok(InterestMode::None),
            "pay_in_full" => Ok(InterestMode::PayInFull),
            "compound" => Ok(InterestMode::Compound),
            "loan_amortized" => Ok(InterestMode::LoanAmortized),
            other => Err(EngineError::InvalidReference(format!(
                "unknown interest mode: {other}"
            ))),
        }
    }
}

/// A specific debt instrument held by a payee.
///
/// The financial fields are nullable: a cleared field stays `None` and
/// round-trips as JSON `null`. Aggregations treat `None` as zero.
#[derive(Clone, Debug, PartialEq)]
pub struct PayeeAccount {
    pub id: Uuid,
    /// Owning user. Carried directly so the account stays reachable after its
    /// payee is deleted.
    pub user_id: String,
    /// Owning payee. When the reference no longer resolves, enrichment falls
    /// back to the `"Unknown"` display name instead of failing.
    pub payee_id: Uuid,
    pub label: String,
    /// Opaque external account number.
    pub account_number: Option<String>,
    pub category: DebtCategory,
    pub interest_mode: InterestMode,
    /// Annual interest rate as a fraction (0.24 = 24% APR). Not money.
    pub interest_rate: Option<f64>,
    pub current_balance: Option<MoneyCents>,
    pub principal_balance: Option<MoneyCents>,
    pub accrued_interest: Option<MoneyCents>,
    pub due_date: Option<NaiveDate>,
    /// Month guard for the interest accrual job.
    pub last_interest_accrual: Option<NaiveDate>,
    pub loan_term_months: Option<i32>,
    pub promo_term_months: Option<i32>,
    /// Required minimum payment, when the issuer enforces one.
    pub min_payment: Option<MoneyCents>,
}

fn cents_or_zero(value: Option<MoneyCents>) -> i64 {
    value.map_or(0, MoneyCents::cents)
}

impl PayeeAccount {
    /// Applies a payment to this account's balances according to its interest
    /// mode.
    ///
    /// Balances never go below zero; an overpayment is absorbed, matching how
    /// issuers report a cleared account.
    pub fn apply_payment(&mut self, amount: MoneyCents) {
        let mut remaining = amount.cents().max(0);

        match self.interest_mode {
            InterestMode::None | InterestMode::PayInFull => {
                let current = cents_or_zero(self.current_balance) - remaining;
                self.current_balance = Some(MoneyCents::new(current).floor_zero());
            }
            InterestMode::Compound => {
                let mut accrued = cents_or_zero(self.accrued_interest);
                if accrued > 0 {
                    let applied = remaining.min(accrued);
                    accrued -= applied;
                    remaining -= applied;
                }
                let current = (cents_or_zero(self.current_balance) - remaining).max(0);
                self.accrued_interest = Some(MoneyCents::new(accrued));
                self.current_balance = Some(MoneyCents::new(current));
                self.principal_balance = Some(MoneyCents::new((current - accrued).max(0)));
            }
            InterestMode::LoanAmortized => {
                let mut accrued = cents_or_zero(self.accrued_interest);
                let mut principal = cents_or_zero(self.principal_balance);
                if accrued > 0 {
                    let applied = remaining.min(accrued);
                    accrued -= applied;
                    remaining -= applied;
                }
                if remaining > 0 && principal > 0 {
                    let applied = remaining.min(principal);
                    principal -= applied;
                }
                self.accrued_interest = Some(MoneyCents::new(accrued));
                self.principal_balance = Some(MoneyCents::new(principal));
                self.current_balance = Some(MoneyCents::new(principal + accrued));
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payee_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub payee_id: String,
    pub label: String,
    pub account_number: Option<String>,
    pub category: String,
    pub interest_mode: String,
    pub interest_rate: Option<f64>,
    pub current_balance_minor: Option<i64>,
    pub principal_balance_minor: Option<i64>,
    pub accrued_interest_minor: Option<i64>,
    pub due_date: Option<Date>,
    pub last_interest_accrual: Option<Date>,
    pub loan_term_months: Option<i32>,
    pub promo_term_months: Option<i32>,
    pub min_payment_minor: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::payees::Entity",
        from = "Column::PayeeId",
        to = "super::payees::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Payees,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::payees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payees.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PayeeAccount> for ActiveModel {
    fn from(value: &PayeeAccount) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            user_id: ActiveValue::Set(value.user_id.clone()),
            payee_id: ActiveValue::Set(value.payee_id.to_string()),
            label: ActiveValue::Set(value.label.clone()),
            account_number: ActiveValue::Set(value.account_number.clone()),
            category: ActiveValue::Set(value.category.as_str().to_string()),
            interest_mode: ActiveValue::Set(value.interest_mode.as_str().to_string()),
            interest_rate: ActiveValue::Set(value.interest_rate),
            current_balance_minor: ActiveValue::Set(value.current_balance.map(MoneyCents::cents)),
            principal_balance_minor: ActiveValue::Set(
                value.principal_balance.map(MoneyCents::cents),
            ),
            accrued_interest_minor: ActiveValue::Set(value.accrued_interest.map(MoneyCents::cents)),
            due_date: ActiveValue::Set(value.due_date),
            last_interest_accrual: ActiveValue::Set(value.last_interest_accrual),
            loan_term_months: ActiveValue::Set(value.loan_term_months),
            promo_term_months: ActiveValue::Set(value.promo_term_months),
            min_payment_minor: ActiveValue::Set(value.min_payment.map(MoneyCents::cents)),
        }
    }
}

impl TryFrom<Model> for PayeeAccount {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&model.id).map_err(|_| {
            EngineError::InvalidReference(format!("invalid payee account id: {}", model.id))
        })?;
        let payee_id = Uuid::parse_str(&model.payee_id).map_err(|_| {
            EngineError::InvalidReference(format!("invalid payee id: {}", model.payee_id))
        })?;
        Ok(PayeeAccount {
            id,
            user_id: model.user_id,
            payee_id,
            label: model.label,
            account_number: model.account_number,
            category: DebtCategory::try_from(model.category.as_str())?,
            interest_mode: InterestMode::try_from(model.interest_mode.as_str())?,
            interest_rate: model.interest_rate,
            current_balance: model.current_balance_minor.map(MoneyCents::new),
            principal_balance: model.principal_balance_minor.map(MoneyCents::new),
            accrued_interest: model.accrued_interest_minor.map(MoneyCents::new),
            due_date: model.due_date,
            last_interest_accrual: model.last_interest_accrual,
            loan_term_months: model.loan_term_months,
            promo_term_months: model.promo_term_months,
            min_payment: model.min_payment_minor.map(MoneyCents::new),
        })
    }
}
