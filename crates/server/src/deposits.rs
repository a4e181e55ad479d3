//! Deposit API endpoints.

use api_types::deposit::{DepositUpsert, DepositView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::DepositChange;
use uuid::Uuid;

use crate::{ServerError, convert, server::ServerState, user};

fn change_from(payload: DepositUpsert) -> DepositChange {
    DepositChange {
        account_id: payload.account_id,
        source: payload.source,
        amount: convert::money_from_wire(payload.amount),
        date: payload.date,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<DepositUpsert>,
) -> Result<(StatusCode, Json<DepositView>), ServerError> {
    let deposit = state
        .engine
        .create_deposit(&user.username, change_from(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(convert::deposit_view(deposit))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<DepositView>>, ServerError> {
    let deposits = state.engine.list_deposits(&user.username).await?;

    Ok(Json(deposits.into_iter().map(convert::deposit_view).collect()))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DepositUpsert>,
) -> Result<Json<DepositView>, ServerError> {
    let deposit = state
        .engine
        .update_deposit(&user.username, id, change_from(payload))
        .await?;

    Ok(Json(convert::deposit_view(deposit)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_deposit(&user.username, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
