//! Transfer API endpoints. Create-only.

use api_types::transfer::{TransferNew, TransferView};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{ServerError, convert, server::ServerState, user};

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransferNew>,
) -> Result<(StatusCode, Json<TransferView>), ServerError> {
    let transfer = state
        .engine
        .create_transfer(
            &user.username,
            payload.from_account_id,
            payload.to_account_id,
            convert::money_from_wire(payload.amount),
            payload.date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(convert::transfer_view(transfer))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransferView>>, ServerError> {
    let transfers = state.engine.list_transfers(&user.username).await?;

    Ok(Json(
        transfers.into_iter().map(convert::transfer_view).collect(),
    ))
}
