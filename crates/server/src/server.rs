use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{
    accounts, deposits, payee_accounts, payees, payments, reports, summary, transfers, user,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<user::Model> = user::Entity::find()
        .filter(user::Column::Username.eq(auth_header.username()))
        .filter(user::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Builds the full authenticated API router. Exposed so tests can drive the
/// service without binding a socket.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/{id}",
            get(accounts::get)
                .put(accounts::update)
                .delete(accounts::delete),
        )
        .route("/payees", get(payees::list).post(payees::create))
        .route(
            "/payees/{id}",
            put(payees::update).delete(payees::delete),
        )
        .route(
            "/payeeAccounts",
            get(payee_accounts::list).post(payee_accounts::create),
        )
        .route(
            "/payeeAccounts/{id}",
            put(payee_accounts::update).delete(payee_accounts::delete),
        )
        .route(
            "/payeeAccounts/{id}/recommendedPayment",
            get(payee_accounts::recommended_payment),
        )
        .route(
            "/payeeAccounts/{id}/amortization",
            get(payee_accounts::amortization),
        )
        .route("/deposits", get(deposits::list).post(deposits::create))
        .route(
            "/deposits/{id}",
            put(deposits::update).delete(deposits::delete),
        )
        .route("/payments", get(payments::list).post(payments::create))
        .route(
            "/payments/{id}",
            put(payments::update).delete(payments::delete),
        )
        .route("/transfers", get(transfers::list).post(transfers::create))
        .route("/summary", get(summary::get))
        .route(
            "/reports/depositsBySource",
            get(reports::deposits_by_source),
        )
        .route("/reports/cashflowMonthly", get(reports::cashflow_monthly))
        .route("/reports/paymentHistory", get(reports::payment_history))
        .route("/reports/payeeBalances", get(reports::payee_balances))
        .route("/reports/upcomingDue", get(reports::upcoming_due))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(engine: Engine, db: DatabaseConnection, bind: &str) {
    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
