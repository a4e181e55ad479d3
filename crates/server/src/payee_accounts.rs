//! Payee-account API endpoints, including the advice routes.

use api_types::payee_account::{
    AmortizationRow, AmortizationSchedule, PayeeAccountUpsert, PayeeAccountView,
    RecommendedPayment,
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::PayeeAccountChange;
use uuid::Uuid;

use crate::{ServerError, convert, server::ServerState, user};

fn change_from(payload: PayeeAccountUpsert) -> PayeeAccountChange {
    PayeeAccountChange {
        payee_id: payload.payee_id,
        label: payload.label,
        account_number: payload.account_number,
        category: convert::category_from_wire(payload.category),
        interest_mode: convert::interest_mode_from_wire(payload.interest_mode),
        interest_rate: payload.interest_rate,
        current_balance: convert::money_opt_from_wire(payload.current_balance),
        principal_balance: convert::money_opt_from_wire(payload.principal_balance),
        accrued_interest: convert::money_opt_from_wire(payload.accrued_interest),
        due_date: payload.due_date,
        loan_term_months: payload.loan_term_months,
        promo_term_months: payload.promo_term_months,
        min_payment: convert::money_opt_from_wire(payload.min_payment),
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PayeeAccountUpsert>,
) -> Result<(StatusCode, Json<PayeeAccountView>), ServerError> {
    let account = state
        .engine
        .create_payee_account(&user.username, change_from(payload))
        .await?;
    let enriched = state
        .engine
        .enriched_payee_account(&user.username, account.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(convert::payee_account_view(enriched)),
    ))
}

/// Listing returns the enriched view: every record carries its payee's
/// display name, `"Unknown"` when the payee has been deleted.
pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<PayeeAccountView>>, ServerError> {
    let enriched = state.engine.enriched_payee_accounts(&user.username).await?;

    Ok(Json(
        enriched
            .into_iter()
            .map(convert::payee_account_view)
            .collect(),
    ))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PayeeAccountUpsert>,
) -> Result<Json<PayeeAccountView>, ServerError> {
    state
        .engine
        .update_payee_account(&user.username, id, change_from(payload))
        .await?;
    let enriched = state
        .engine
        .enriched_payee_account(&user.username, id)
        .await?;

    Ok(Json(convert::payee_account_view(enriched)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_payee_account(&user.username, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn recommended_payment(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecommendedPayment>, ServerError> {
    let amount = state.engine.recommended_payment(&user.username, id).await?;

    Ok(Json(RecommendedPayment {
        amount: convert::money_to_wire(amount),
    }))
}

pub async fn amortization(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AmortizationSchedule>, ServerError> {
    let schedule = state
        .engine
        .amortization_schedule(&user.username, id)
        .await?;

    Ok(Json(AmortizationSchedule {
        monthly_payment: convert::money_to_wire(schedule.monthly_payment),
        rows: schedule
            .rows
            .into_iter()
            .map(|row| AmortizationRow {
                month: row.month,
                payment: convert::money_to_wire(row.payment),
                principal: convert::money_to_wire(row.principal),
                interest: convert::money_to_wire(row.interest),
                remaining: convert::money_to_wire(row.remaining),
            })
            .collect(),
    }))
}
