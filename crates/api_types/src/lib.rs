//! Request/response DTOs shared by the server and its clients.
//!
//! Monetary values cross this boundary as decimal JSON numbers (`12.34` means
//! $12.34); the server converts them to integer cents. Business dates are
//! ISO-8601 `YYYY-MM-DD` strings. Nullable financial fields serialize as
//! `null` when cleared.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    Checking,
    Savings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    CreditCard,
    Loan,
    Mortgage,
    Utility,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestMode {
    None,
    PayInFull,
    Compound,
    LoanAmortized,
}

pub mod account {
    use super::*;

    /// Full writable payload; POST creates, PUT replaces.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountUpsert {
        pub kind: AccountKind,
        pub nickname: String,
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: Uuid,
        pub kind: AccountKind,
        pub nickname: String,
        pub balance: f64,
    }
}

pub mod payee {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayeeUpsert {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayeeView {
        pub id: Uuid,
        pub name: String,
    }
}

pub mod payee_account {
    use super::*;

    /// Full writable payload. Absent/`null` optional fields clear the stored
    /// value.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayeeAccountUpsert {
        pub payee_id: Uuid,
        pub label: String,
        pub account_number: Option<String>,
        pub category: DebtCategory,
        pub interest_mode: InterestMode,
        pub interest_rate: Option<f64>,
        pub current_balance: Option<f64>,
        pub principal_balance: Option<f64>,
        pub accrued_interest: Option<f64>,
        pub due_date: Option<NaiveDate>,
        pub loan_term_months: Option<i32>,
        pub promo_term_months: Option<i32>,
        pub min_payment: Option<f64>,
    }

    /// Enriched view: the stored record plus the resolved payee display name
    /// (`"Unknown"` when the payee no longer exists).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayeeAccountView {
        pub id: Uuid,
        pub payee_id: Uuid,
        pub payee_name: String,
        pub label: String,
        pub account_number: Option<String>,
        pub category: DebtCategory,
        pub interest_mode: InterestMode,
        pub interest_rate: Option<f64>,
        pub current_balance: Option<f64>,
        pub principal_balance: Option<f64>,
        pub accrued_interest: Option<f64>,
        pub due_date: Option<NaiveDate>,
        pub last_interest_accrual: Option<NaiveDate>,
        pub loan_term_months: Option<i32>,
        pub promo_term_months: Option<i32>,
        pub min_payment: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecommendedPayment {
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmortizationRow {
        /// 1-based month number.
        pub month: u32,
        pub payment: f64,
        pub principal: f64,
        pub interest: f64,
        pub remaining: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AmortizationSchedule {
        pub monthly_payment: f64,
        pub rows: Vec<AmortizationRow>,
    }
}

pub mod deposit {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DepositUpsert {
        pub account_id: Uuid,
        pub source: String,
        pub amount: f64,
        pub date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DepositView {
        pub id: Uuid,
        pub account_id: Uuid,
        pub source: String,
        pub amount: f64,
        pub date: NaiveDate,
    }
}

pub mod payment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentUpsert {
        pub checking_account_id: Uuid,
        pub payee_account_id: Uuid,
        pub amount: f64,
        pub date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentView {
        pub id: Uuid,
        pub checking_account_id: Uuid,
        pub payee_account_id: Uuid,
        pub amount: f64,
        pub date: NaiveDate,
    }
}

pub mod transfer {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferNew {
        pub from_account_id: Uuid,
        pub to_account_id: Uuid,
        pub amount: f64,
        pub date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferView {
        pub id: Uuid,
        pub from_account_id: Uuid,
        pub to_account_id: Uuid,
        pub amount: f64,
        pub date: NaiveDate,
    }
}

pub mod summary {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub total_cash: f64,
        pub total_due: f64,
        pub net_worth: f64,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DepositsBySourceQuery {
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
        pub account_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SourceTotal {
        pub name: String,
        pub count: u64,
        pub total: f64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CashflowQuery {
        pub year: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthCashflow {
        /// `"YYYY-MM"`.
        pub month: String,
        pub deposits: f64,
        pub payments: f64,
        pub net: f64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PaymentHistoryQuery {
        pub payee_account_id: Option<Uuid>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayeeBalance {
        pub payee_id: Uuid,
        pub total: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryBalance {
        pub category: DebtCategory,
        pub total: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayeeBalances {
        pub by_payee: Vec<PayeeBalance>,
        pub by_category: Vec<CategoryBalance>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UpcomingDueQuery {
        pub within_days: Option<i64>,
    }
}
