//! Payment API endpoints.
//!
//! Creating a payment runs the balance side effects (checking debit, payee
//! account application); editing or deleting one only rewrites the record.

use api_types::payment::{PaymentUpsert, PaymentView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, convert, server::ServerState, user};

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PaymentUpsert>,
) -> Result<(StatusCode, Json<PaymentView>), ServerError> {
    let payment = state
        .engine
        .create_payment(
            &user.username,
            payload.checking_account_id,
            payload.payee_account_id,
            convert::money_from_wire(payload.amount),
            payload.date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(convert::payment_view(payment))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<PaymentView>>, ServerError> {
    let payments = state.engine.list_payments(&user.username).await?;

    Ok(Json(payments.into_iter().map(convert::payment_view).collect()))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentUpsert>,
) -> Result<Json<PaymentView>, ServerError> {
    let payment = state
        .engine
        .update_payment(
            &user.username,
            id,
            payload.checking_account_id,
            payload.payee_account_id,
            convert::money_from_wire(payload.amount),
            payload.date,
        )
        .await?;

    Ok(Json(convert::payment_view(payment)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_payment(&user.username, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
