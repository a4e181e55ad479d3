//! Dashboard summary endpoint.

use api_types::summary::Summary;
use axum::{Extension, Json, extract::State};

use crate::{ServerError, convert, server::ServerState, user};

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Summary>, ServerError> {
    let summary = state.engine.summary(&user.username).await?;

    Ok(Json(Summary {
        total_cash: convert::money_to_wire(summary.total_cash),
        total_due: convert::money_to_wire(summary.total_due),
        net_worth: convert::money_to_wire(summary.net_worth),
    }))
}
