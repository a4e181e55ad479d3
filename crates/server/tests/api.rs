use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::{ServerState, router};

async fn test_app() -> Router {
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
    router(ServerState {
        engine: std::sync::Arc::new(engine),
        db,
    })
}

fn basic_auth() -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode("alice:password");
    format!("Basic {encoded}")
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth());
    let request = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(value.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn requests_without_credentials_are_unauthorized() {
    let app = test_app().await;
    let response = app
        .oneshot(Request::get("/accounts").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn account_crud_roundtrip_with_decimal_amounts() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/accounts",
        Some(json!({"kind": "checking", "nickname": "Everyday", "balance": 1500.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["balance"], json!(1500.0));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, "GET", "/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/accounts/{id}"),
        Some(json!({"kind": "savings", "nickname": "Stash", "balance": 250.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["kind"], json!("savings"));
    assert_eq!(updated["balance"], json!(250.5));

    let (status, _) = send(&app, "DELETE", &format!("/accounts/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/accounts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

async fn create_payee(app: &Router, name: &str) -> String {
    let (status, created) = send(app, "POST", "/payees", Some(json!({"name": name}))).await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_str().unwrap().to_string()
}

fn card_payload(payee_id: &str) -> Value {
    json!({
        "payee_id": payee_id,
        "label": "Visa",
        "account_number": null,
        "category": "credit_card",
        "interest_mode": "pay_in_full",
        "interest_rate": null,
        "current_balance": 300.0,
        "principal_balance": null,
        "accrued_interest": null,
        "due_date": null,
        "loan_term_months": null,
        "promo_term_months": null,
        "min_payment": null
    })
}

#[tokio::test]
async fn cleared_nullable_fields_roundtrip_as_null() {
    let app = test_app().await;
    let payee_id = create_payee(&app, "Card Co").await;

    let (status, created) = send(&app, "POST", "/payeeAccounts", Some(card_payload(&payee_id))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["current_balance"], json!(300.0));
    assert!(created["due_date"].is_null());
    assert!(created["min_payment"].is_null());
    let id = created["id"].as_str().unwrap().to_string();

    // Clearing the balance with an explicit null sticks.
    let mut payload = card_payload(&payee_id);
    payload["current_balance"] = Value::Null;
    let (status, updated) = send(&app, "PUT", &format!("/payeeAccounts/{id}"), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["current_balance"].is_null());

    let (_, listed) = send(&app, "GET", "/payeeAccounts", None).await;
    assert!(listed[0]["current_balance"].is_null());
}

#[tokio::test]
async fn deleted_payee_shows_as_unknown_in_listing() {
    let app = test_app().await;
    let payee_id = create_payee(&app, "Card Co").await;
    send(&app, "POST", "/payeeAccounts", Some(card_payload(&payee_id))).await;

    let (status, _) = send(&app, "DELETE", &format!("/payees/{payee_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, listed) = send(&app, "GET", "/payeeAccounts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["payee_name"], json!("Unknown"));
}

#[tokio::test]
async fn summary_reports_cash_due_and_net() {
    let app = test_app().await;
    send(
        &app,
        "POST",
        "/accounts",
        Some(json!({"kind": "checking", "nickname": "Everyday", "balance": 1500.0})),
    )
    .await;
    let payee_id = create_payee(&app, "Card Co").await;
    send(&app, "POST", "/payeeAccounts", Some(card_payload(&payee_id))).await;

    let (status, summary) = send(&app, "GET", "/summary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_cash"], json!(1500.0));
    assert_eq!(summary["total_due"], json!(300.0));
    assert_eq!(summary["net_worth"], json!(1200.0));
}

#[tokio::test]
async fn deposit_credits_account_and_feeds_reports() {
    let app = test_app().await;
    let (_, account) = send(
        &app,
        "POST",
        "/accounts",
        Some(json!({"kind": "checking", "nickname": "Everyday", "balance": 0.0})),
    )
    .await;
    let account_id = account["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/deposits",
        Some(json!({
            "account_id": account_id,
            "source": "Employer A",
            "amount": 2000.0,
            "date": "2025-01-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, accounts) = send(&app, "GET", "/accounts", None).await;
    assert_eq!(accounts[0]["balance"], json!(2000.0));

    let (status, report) = send(&app, "GET", "/reports/depositsBySource", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report[0]["name"], json!("Employer A"));
    assert_eq!(report[0]["count"], json!(1));
    assert_eq!(report[0]["total"], json!(2000.0));

    let (status, months) = send(&app, "GET", "/reports/cashflowMonthly?year=2025", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(months[0]["month"], json!("2025-01"));
    assert_eq!(months[0]["deposits"], json!(2000.0));
    assert_eq!(months[0]["net"], json!(2000.0));
}

#[tokio::test]
async fn overdrawn_transfer_is_unprocessable() {
    let app = test_app().await;
    let (_, from) = send(
        &app,
        "POST",
        "/accounts",
        Some(json!({"kind": "checking", "nickname": "Everyday", "balance": 10.0})),
    )
    .await;
    let (_, to) = send(
        &app,
        "POST",
        "/accounts",
        Some(json!({"kind": "savings", "nickname": "Stash", "balance": 0.0})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/transfers",
        Some(json!({
            "from_account_id": from["id"],
            "to_account_id": to["id"],
            "amount": 100.0,
            "date": "2025-03-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn payment_roundtrip_updates_balances() {
    let app = test_app().await;
    let (_, account) = send(
        &app,
        "POST",
        "/accounts",
        Some(json!({"kind": "checking", "nickname": "Everyday", "balance": 1000.0})),
    )
    .await;
    let account_id = account["id"].as_str().unwrap().to_string();
    let payee_id = create_payee(&app, "Card Co").await;
    let (_, card) = send(&app, "POST", "/payeeAccounts", Some(card_payload(&payee_id))).await;
    let card_id = card["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/payments",
        Some(json!({
            "checking_account_id": account_id,
            "payee_account_id": card_id,
            "amount": 100.0,
            "date": "2025-02-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, accounts) = send(&app, "GET", "/accounts", None).await;
    assert_eq!(accounts[0]["balance"], json!(900.0));

    let (_, cards) = send(&app, "GET", "/payeeAccounts", None).await;
    assert_eq!(cards[0]["current_balance"], json!(200.0));

    let (status, history) = send(
        &app,
        "GET",
        &format!("/reports/paymentHistory?payee_account_id={card_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["amount"], json!(100.0));
}

#[tokio::test]
async fn amortization_requires_a_loan_term() {
    let app = test_app().await;
    let payee_id = create_payee(&app, "Card Co").await;
    let (_, card) = send(&app, "POST", "/payeeAccounts", Some(card_payload(&payee_id))).await;
    let card_id = card["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "GET",
        &format!("/payeeAccounts/{card_id}/amortization"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    // Pay-in-full cards recommend clearing the whole balance.
    let (status, recommended) = send(
        &app,
        "GET",
        &format!("/payeeAccounts/{card_id}/recommendedPayment"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recommended["amount"], json!(300.0));
}
