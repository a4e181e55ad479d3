//! Payee API endpoints.

use api_types::payee::{PayeeUpsert, PayeeView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};

fn view(payee: engine::Payee) -> PayeeView {
    PayeeView {
        id: payee.id,
        name: payee.name,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PayeeUpsert>,
) -> Result<(StatusCode, Json<PayeeView>), ServerError> {
    let payee = state
        .engine
        .create_payee(&user.username, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(view(payee))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<PayeeView>>, ServerError> {
    let payees = state.engine.list_payees(&user.username).await?;

    Ok(Json(payees.into_iter().map(view).collect()))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PayeeUpsert>,
) -> Result<Json<PayeeView>, ServerError> {
    let payee = state
        .engine
        .update_payee(&user.username, id, &payload.name)
        .await?;

    Ok(Json(view(payee)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_payee(&user.username, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
