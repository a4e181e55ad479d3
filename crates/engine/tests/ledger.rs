use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

use engine::{
    AccountKind, DebtCategory, DepositChange, DepositFilter, Engine, EngineError, InterestMode,
    MoneyCents, PayeeAccountChange, PaymentHistoryFilter, UNKNOWN_PAYEE,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["alice".into(), "password".into()],
    ))
    .await
    .unwrap();
    let engine = Engine::builder().database(db.clone()).build();
    (engine, db)
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn cents(value: i64) -> MoneyCents {
    MoneyCents::new(value)
}

fn card_change(payee_id: Uuid, label: &str) -> PayeeAccountChange {
    PayeeAccountChange {
        payee_id,
        label: label.to_string(),
        account_number: None,
        category: DebtCategory::CreditCard,
        interest_mode: InterestMode::PayInFull,
        interest_rate: None,
        current_balance: Some(cents(30_000)),
        principal_balance: None,
        accrued_interest: None,
        due_date: None,
        loan_term_months: None,
        promo_term_months: None,
        min_payment: None,
    }
}

#[tokio::test]
async fn account_crud_and_listing_order() {
    let (engine, _db) = engine_with_db().await;

    let checking = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(150_000))
        .await
        .unwrap();
    engine
        .create_account("alice", AccountKind::Savings, "Rainy day", cents(25_050))
        .await
        .unwrap();

    let accounts = engine.list_accounts("alice").await.unwrap();
    assert_eq!(accounts.len(), 2);
    // Ordered by nickname.
    assert_eq!(accounts[0].nickname, "Everyday");
    assert_eq!(accounts[1].nickname, "Rainy day");

    let updated = engine
        .update_account(
            "alice",
            checking.id,
            AccountKind::Checking,
            "Main checking",
            cents(160_000),
        )
        .await
        .unwrap();
    assert_eq!(updated.nickname, "Main checking");
    assert_eq!(updated.balance, cents(160_000));

    engine.delete_account("alice", checking.id).await.unwrap();
    let accounts = engine.list_accounts("alice").await.unwrap();
    assert_eq!(accounts.len(), 1);

    let err = engine.account("alice", checking.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn other_users_records_are_invisible() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password) VALUES (?, ?)",
        vec!["bob".into(), "password".into()],
    ))
    .await
    .unwrap();

    let account = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(1_000))
        .await
        .unwrap();

    assert!(engine.list_accounts("bob").await.unwrap().is_empty());
    let err = engine.account("bob", account.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn deposit_lifecycle_keeps_balances_in_step() {
    let (engine, _db) = engine_with_db().await;
    let first = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(100_000))
        .await
        .unwrap();
    let second = engine
        .create_account("alice", AccountKind::Savings, "Rainy day", cents(0))
        .await
        .unwrap();

    let deposit = engine
        .create_deposit(
            "alice",
            DepositChange {
                account_id: first.id,
                source: "Employer A".to_string(),
                amount: cents(50_000),
                date: date("2025-03-14"),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        engine.account("alice", first.id).await.unwrap().balance,
        cents(150_000)
    );

    // Moving the deposit to another account re-targets the credit.
    engine
        .update_deposit(
            "alice",
            deposit.id,
            DepositChange {
                account_id: second.id,
                source: "Employer A".to_string(),
                amount: cents(40_000),
                date: date("2025-03-14"),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        engine.account("alice", first.id).await.unwrap().balance,
        cents(100_000)
    );
    assert_eq!(
        engine.account("alice", second.id).await.unwrap().balance,
        cents(40_000)
    );

    engine.delete_deposit("alice", deposit.id).await.unwrap();
    assert_eq!(
        engine.account("alice", second.id).await.unwrap().balance,
        cents(0)
    );
    assert!(engine.list_deposits("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn deposit_rejects_non_positive_amount() {
    let (engine, _db) = engine_with_db().await;
    let account = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(0))
        .await
        .unwrap();

    let err = engine
        .create_deposit(
            "alice",
            DepositChange {
                account_id: account.id,
                source: "Employer A".to_string(),
                amount: cents(0),
                date: date("2025-03-14"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn payment_debits_checking_and_applies_interest_mode() {
    let (engine, _db) = engine_with_db().await;
    let checking = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(100_000))
        .await
        .unwrap();
    let payee = engine.create_payee("alice", "Card Co").await.unwrap();

    let mut change = card_change(payee.id, "Visa");
    change.interest_mode = InterestMode::Compound;
    change.current_balance = Some(cents(50_000));
    change.accrued_interest = Some(cents(2_000));
    let card = engine.create_payee_account("alice", change).await.unwrap();

    engine
        .create_payment("alice", checking.id, card.id, cents(10_000), date("2025-04-01"))
        .await
        .unwrap();

    assert_eq!(
        engine.account("alice", checking.id).await.unwrap().balance,
        cents(90_000)
    );

    // Interest is cleared first, then the balance shrinks by the remainder.
    let enriched = engine.enriched_payee_accounts("alice").await.unwrap();
    let card = &enriched[0].account;
    assert_eq!(card.current_balance, Some(cents(42_000)));
    assert_eq!(card.accrued_interest, Some(cents(0)));
    assert_eq!(card.principal_balance, Some(cents(42_000)));
}

#[tokio::test]
async fn payment_history_filters_by_account_and_window() {
    let (engine, _db) = engine_with_db().await;
    let checking = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(1_000_000))
        .await
        .unwrap();
    let payee = engine.create_payee("alice", "Card Co").await.unwrap();
    let visa = engine
        .create_payee_account("alice", card_change(payee.id, "Visa"))
        .await
        .unwrap();
    let store = engine
        .create_payee_account("alice", card_change(payee.id, "Store card"))
        .await
        .unwrap();

    for (target, day) in [
        (visa.id, "2025-01-10"),
        (visa.id, "2025-02-10"),
        (store.id, "2025-02-15"),
    ] {
        engine
            .create_payment("alice", checking.id, target, cents(1_000), date(day))
            .await
            .unwrap();
    }

    let all = engine
        .payment_history("alice", PaymentHistoryFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    // Newest first.
    assert_eq!(all[0].date, date("2025-02-15"));

    let only_visa = engine
        .payment_history(
            "alice",
            PaymentHistoryFilter {
                payee_account_id: Some(visa.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(only_visa.len(), 2);

    let february = engine
        .payment_history(
            "alice",
            PaymentHistoryFilter {
                payee_account_id: None,
                start_date: Some(date("2025-02-01")),
                end_date: Some(date("2025-02-28")),
            },
        )
        .await
        .unwrap();
    assert_eq!(february.len(), 2);
}

#[tokio::test]
async fn transfer_moves_funds_and_guards_balance() {
    let (engine, _db) = engine_with_db().await;
    let from = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(30_000))
        .await
        .unwrap();
    let to = engine
        .create_account("alice", AccountKind::Savings, "Rainy day", cents(0))
        .await
        .unwrap();

    engine
        .create_transfer("alice", from.id, to.id, cents(10_000), date("2025-05-01"))
        .await
        .unwrap();
    assert_eq!(
        engine.account("alice", from.id).await.unwrap().balance,
        cents(20_000)
    );
    assert_eq!(
        engine.account("alice", to.id).await.unwrap().balance,
        cents(10_000)
    );

    let err = engine
        .create_transfer("alice", from.id, to.id, cents(50_000), date("2025-05-02"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    let err = engine
        .create_transfer("alice", from.id, from.id, cents(1), date("2025-05-02"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidReference(_)));

    assert_eq!(engine.list_transfers("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn payment_and_transfer_reject_non_positive_amounts() {
    let (engine, _db) = engine_with_db().await;
    let checking = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(10_000))
        .await
        .unwrap();
    let savings = engine
        .create_account("alice", AccountKind::Savings, "Rainy day", cents(0))
        .await
        .unwrap();
    let payee = engine.create_payee("alice", "Card Co").await.unwrap();
    let card = engine
        .create_payee_account("alice", card_change(payee.id, "Visa"))
        .await
        .unwrap();

    let err = engine
        .create_payment("alice", checking.id, card.id, cents(0), date("2025-05-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .create_transfer("alice", checking.id, savings.id, cents(-100), date("2025-05-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn transfer_only_data_leaves_chart_reports_empty() {
    let (engine, _db) = engine_with_db().await;
    let from = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(50_000))
        .await
        .unwrap();
    let to = engine
        .create_account("alice", AccountKind::Savings, "Rainy day", cents(0))
        .await
        .unwrap();

    engine
        .create_transfer("alice", from.id, to.id, cents(20_000), date("2025-05-01"))
        .await
        .unwrap();
    engine
        .create_transfer("alice", from.id, to.id, cents(5_000), date("2025-06-01"))
        .await
        .unwrap();

    // Transfers move money between accounts but never feed the charts.
    assert!(
        engine
            .deposits_by_source("alice", DepositFilter::default())
            .await
            .unwrap()
            .is_empty()
    );
    assert!(engine.cashflow_monthly("alice", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_payee_leaves_unknown_enrichment() {
    let (engine, _db) = engine_with_db().await;
    let payee = engine.create_payee("alice", "Card Co").await.unwrap();
    engine
        .create_payee_account("alice", card_change(payee.id, "Visa"))
        .await
        .unwrap();

    engine.delete_payee("alice", payee.id).await.unwrap();

    let enriched = engine.enriched_payee_accounts("alice").await.unwrap();
    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].payee_name, UNKNOWN_PAYEE);
}

#[tokio::test]
async fn summary_totals_cash_due_and_net() {
    let (engine, _db) = engine_with_db().await;
    engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(150_000))
        .await
        .unwrap();
    engine
        .create_account("alice", AccountKind::Savings, "Rainy day", cents(25_050))
        .await
        .unwrap();

    let payee = engine.create_payee("alice", "Card Co").await.unwrap();
    engine
        .create_payee_account("alice", card_change(payee.id, "Visa"))
        .await
        .unwrap();
    let mut no_balance = card_change(payee.id, "Paid off");
    no_balance.current_balance = None;
    engine
        .create_payee_account("alice", no_balance)
        .await
        .unwrap();

    let summary = engine.summary("alice").await.unwrap();
    assert_eq!(summary.total_cash, cents(175_050));
    assert_eq!(summary.total_due, cents(30_000));
    assert_eq!(summary.net_worth, cents(145_050));
}

#[tokio::test]
async fn deposits_by_source_report_with_filters() {
    let (engine, _db) = engine_with_db().await;
    let first = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(0))
        .await
        .unwrap();
    let second = engine
        .create_account("alice", AccountKind::Savings, "Rainy day", cents(0))
        .await
        .unwrap();

    for (account, source, amount, day) in [
        (first.id, "Employer A", 200_000, "2025-01-15"),
        (first.id, "Employer A", 200_000, "2025-02-15"),
        (second.id, "Client B", 75_000, "2025-02-20"),
    ] {
        engine
            .create_deposit(
                "alice",
                DepositChange {
                    account_id: account,
                    source: source.to_string(),
                    amount: cents(amount),
                    date: date(day),
                },
            )
            .await
            .unwrap();
    }

    let totals = engine
        .deposits_by_source("alice", DepositFilter::default())
        .await
        .unwrap();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].name, "Employer A");
    assert_eq!(totals[0].count, 2);
    assert_eq!(totals[0].total, cents(400_000));

    let february = engine
        .deposits_by_source(
            "alice",
            DepositFilter {
                start_date: Some(date("2025-02-01")),
                end_date: Some(date("2025-02-28")),
                account_id: Some(second.id),
            },
        )
        .await
        .unwrap();
    assert_eq!(february.len(), 1);
    assert_eq!(february[0].name, "Client B");
}

#[tokio::test]
async fn cashflow_monthly_buckets_and_year_filter() {
    let (engine, _db) = engine_with_db().await;
    let checking = engine
        .create_account("alice", AccountKind::Checking, "Everyday", cents(1_000_000))
        .await
        .unwrap();
    let payee = engine.create_payee("alice", "Card Co").await.unwrap();
    let card = engine
        .create_payee_account("alice", card_change(payee.id, "Visa"))
        .await
        .unwrap();

    engine
        .create_deposit(
            "alice",
            DepositChange {
                account_id: checking.id,
                source: "Employer A".to_string(),
                amount: cents(200_000),
                date: date("2025-01-15"),
            },
        )
        .await
        .unwrap();
    engine
        .create_payment("alice", checking.id, card.id, cents(30_000), date("2025-01-20"))
        .await
        .unwrap();
    engine
        .create_payment("alice", checking.id, card.id, cents(5_000), date("2024-12-20"))
        .await
        .unwrap();

    let months = engine.cashflow_monthly("alice", None).await.unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month.to_string(), "2024-12");
    assert_eq!(months[1].deposits, cents(200_000));
    assert_eq!(months[1].payments, cents(30_000));
    assert_eq!(months[1].net, cents(170_000));

    let only_2025 = engine.cashflow_monthly("alice", Some(2025)).await.unwrap();
    assert_eq!(only_2025.len(), 1);
    assert_eq!(only_2025[0].month.to_string(), "2025-01");
}

#[tokio::test]
async fn upcoming_due_respects_horizon() {
    let (engine, _db) = engine_with_db().await;
    let payee = engine.create_payee("alice", "Card Co").await.unwrap();

    let mut soon = card_change(payee.id, "Soon");
    soon.due_date = Some(date("2025-06-10"));
    engine.create_payee_account("alice", soon).await.unwrap();

    let mut later = card_change(payee.id, "Later");
    later.due_date = Some(date("2025-07-15"));
    engine.create_payee_account("alice", later).await.unwrap();

    let due = engine
        .upcoming_due("alice", date("2025-06-01"), 21)
        .await
        .unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].account.label, "Soon");
}

#[tokio::test]
async fn monthly_accrual_runs_once_per_month() {
    let (engine, _db) = engine_with_db().await;
    let payee = engine.create_payee("alice", "Loan Co").await.unwrap();

    let mut change = card_change(payee.id, "Card");
    change.interest_mode = InterestMode::Compound;
    change.interest_rate = Some(0.12);
    change.current_balance = Some(cents(100_000));
    change.accrued_interest = Some(cents(0));
    engine.create_payee_account("alice", change).await.unwrap();

    let updated = engine
        .accrue_monthly_interest("alice", date("2025-06-01"))
        .await
        .unwrap();
    assert_eq!(updated, 1);

    // 1% monthly on $1,000.00.
    let enriched = engine.enriched_payee_accounts("alice").await.unwrap();
    assert_eq!(enriched[0].account.current_balance, Some(cents(101_000)));
    assert_eq!(enriched[0].account.accrued_interest, Some(cents(1_000)));

    // Second run in the same month is a no-op.
    let updated = engine
        .accrue_monthly_interest("alice", date("2025-06-20"))
        .await
        .unwrap();
    assert_eq!(updated, 0);
}

#[tokio::test]
async fn recommended_payment_for_promo_card() {
    let (engine, _db) = engine_with_db().await;
    let payee = engine.create_payee("alice", "Card Co").await.unwrap();

    let mut change = card_change(payee.id, "Promo card");
    change.current_balance = Some(cents(60_000));
    change.promo_term_months = Some(6);
    change.min_payment = Some(cents(2_500));
    let card = engine.create_payee_account("alice", change).await.unwrap();

    let recommended = engine.recommended_payment("alice", card.id).await.unwrap();
    assert_eq!(recommended, cents(10_000));
}
