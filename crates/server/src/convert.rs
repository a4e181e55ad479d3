//! Mappings between the wire DTOs and the engine's domain types.
//!
//! All decimal JSON amounts pass through `MoneyCents::from_major_f64_lossy`,
//! the single coercion rule for the boundary: non-finite input becomes zero
//! cents rather than an error.

use engine::{
    Account, Deposit, EnrichedPayeeAccount, MoneyCents, Payment, Transfer,
};

use api_types::{AccountKind, DebtCategory, InterestMode, account, deposit, payee_account, payment, transfer};

pub fn money_from_wire(value: f64) -> MoneyCents {
    MoneyCents::from_major_f64_lossy(value)
}

pub fn money_opt_from_wire(value: Option<f64>) -> Option<MoneyCents> {
    value.map(money_from_wire)
}

pub fn money_to_wire(value: MoneyCents) -> f64 {
    value.to_major_f64()
}

pub fn money_opt_to_wire(value: Option<MoneyCents>) -> Option<f64> {
    value.map(money_to_wire)
}

pub fn account_kind_from_wire(kind: AccountKind) -> engine::AccountKind {
    match kind {
        AccountKind::Checking => engine::AccountKind::Checking,
        AccountKind::Savings => engine::AccountKind::Savings,
    }
}

pub fn account_kind_to_wire(kind: engine::AccountKind) -> AccountKind {
    match kind {
        engine::AccountKind::Checking => AccountKind::Checking,
        engine::AccountKind::Savings => AccountKind::Savings,
    }
}

pub fn category_from_wire(category: DebtCategory) -> engine::DebtCategory {
    match category {
        DebtCategory::CreditCard => engine::DebtCategory::CreditCard,
        DebtCategory::Loan => engine::DebtCategory::Loan,
        DebtCategory::Mortgage => engine::DebtCategory::Mortgage,
        DebtCategory::Utility => engine::DebtCategory::Utility,
    }
}

pub fn category_to_wire(category: engine::DebtCategory) -> DebtCategory {
    match category {
        engine::DebtCategory::CreditCard => DebtCategory::CreditCard,
        engine::DebtCategory::Loan => DebtCategory::Loan,
        engine::DebtCategory::Mortgage => DebtCategory::Mortgage,
        engine::DebtCategory::Utility => DebtCategory::Utility,
    }
}

pub fn interest_mode_from_wire(mode: InterestMode) -> engine::InterestMode {
    match mode {
        InterestMode::None => engine::InterestMode::None,
        InterestMode::PayInFull => engine::InterestMode::PayInFull,
        InterestMode::Compound => engine::InterestMode::Compound,
        InterestMode::LoanAmortized => engine::InterestMode::LoanAmortized,
    }
}

pub fn interest_mode_to_wire(mode: engine::InterestMode) -> InterestMode {
    match mode {
        engine::InterestMode::None => InterestMode::None,
        engine::InterestMode::PayInFull => InterestMode::PayInFull,
        engine::InterestMode::Compound => InterestMode::Compound,
        engine::InterestMode::LoanAmortized => InterestMode::LoanAmortized,
    }
}

pub fn account_view(account: Account) -> account::AccountView {
    account::AccountView {
        id: account.id,
        kind: account_kind_to_wire(account.kind),
        nickname: account.nickname,
        balance: money_to_wire(account.balance),
    }
}

pub fn payee_account_view(enriched: EnrichedPayeeAccount) -> payee_account::PayeeAccountView {
    let account = enriched.account;
    payee_account::PayeeAccountView {
        id: account.id,
        payee_id: account.payee_id,
        payee_name: enriched.payee_name,
        label: account.label,
        account_number: account.account_number,
        category: category_to_wire(account.category),
        interest_mode: interest_mode_to_wire(account.interest_mode),
        interest_rate: account.interest_rate,
        current_balance: money_opt_to_wire(account.current_balance),
        principal_balance: money_opt_to_wire(account.principal_balance),
        accrued_interest: money_opt_to_wire(account.accrued_interest),
        due_date: account.due_date,
        last_interest_accrual: account.last_interest_accrual,
        loan_term_months: account.loan_term_months,
        promo_term_months: account.promo_term_months,
        min_payment: money_opt_to_wire(account.min_payment),
    }
}

pub fn deposit_view(deposit: Deposit) -> deposit::DepositView {
    deposit::DepositView {
        id: deposit.id,
        account_id: deposit.account_id,
        source: deposit.source,
        amount: money_to_wire(deposit.amount),
        date: deposit.date,
    }
}

pub fn payment_view(payment: Payment) -> payment::PaymentView {
    payment::PaymentView {
        id: payment.id,
        checking_account_id: payment.checking_account_id,
        payee_account_id: payment.payee_account_id,
        amount: money_to_wire(payment.amount),
        date: payment.date,
    }
}

pub fn transfer_view(value: Transfer) -> transfer::TransferView {
    transfer::TransferView {
        id: value.id,
        from_account_id: value.from_account_id,
        to_account_id: value.to_account_id,
        amount: money_to_wire(value.amount),
        date: value.date,
    }
}
