//! Cash account API endpoints.

use api_types::account::{AccountUpsert, AccountView};
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
    Json(payload): Json<AccountUpsert>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let account = state
        .engine
        .create_account(
            &user.username,
            convert::account_kind_from_wire(payload.kind),
            &payload.nickname,
            convert::money_from_wire(payload.balance),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(convert::account_view(account))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.list_accounts(&user.username).await?;

    Ok(Json(accounts.into_iter().map(convert::account_view).collect()))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountView>, ServerError> {
    let account = state.engine.account(&user.username, id).await?;

    Ok(Json(convert::account_view(account)))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AccountUpsert>,
) -> Result<Json<AccountView>, ServerError> {
    let account = state
        .engine
        .update_account(
            &user.username,
            id,
            convert::account_kind_from_wire(payload.kind),
            &payload.nickname,
            convert::money_from_wire(payload.balance),
        )
        .await?;

    Ok(Json(convert::account_view(account)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_account(&user.username, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
