pub use accounts::{Account, AccountKind};
pub use advice::{AmortizationRow, AmortizationSchedule, amortization_schedule, amortize, recommended_payment};
pub use deposits::Deposit;
pub use enrichment::{EnrichedPayeeAccount, UNKNOWN_PAYEE, enrich};
pub use error::EngineError;
pub use interest::accrue_monthly;
pub use money::MoneyCents;
pub use ops::{
    DepositChange, Engine, EngineBuilder, PayeeAccountChange, PaymentHistoryFilter,
};
pub use payee_accounts::{DebtCategory, InterestMode, PayeeAccount};
pub use payees::Payee;
pub use payments::Payment;
pub use reports::{
    DepositFilter, MonthCashflow, MonthKey, PayeeBalanceSummary, SourceTotal, cashflow_monthly,
    deposits_by_source, payee_balance_summary, upcoming_due,
};
pub use summary::{Summary, summarize};
pub use transfers::Transfer;

pub mod accounts;
mod advice;
pub mod deposits;
mod enrichment;
mod error;
mod interest;
mod money;
mod ops;
pub mod payee_accounts;
pub mod payees;
pub mod payments;
mod reports;
mod summary;
pub mod transfers;

type ResultEngine<T> = Result<T, EngineError>;
