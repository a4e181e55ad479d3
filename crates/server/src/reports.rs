//! Report API endpoints backing the dashboard charts.

use api_types::payee_account::PayeeAccountView;
use api_types::report::{
    CashflowQuery, CategoryBalance, DepositsBySourceQuery, MonthCashflow, PayeeBalance,
    PayeeBalances, PaymentHistoryQuery, SourceTotal, UpcomingDueQuery,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::Utc;
use engine::{DepositFilter, PaymentHistoryFilter};

use crate::{ServerError, convert, server::ServerState, user};

/// Default horizon for the upcoming-due report, in days.
const DEFAULT_DUE_HORIZON_DAYS: i64 = 21;

pub async fn deposits_by_source(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<DepositsBySourceQuery>,
) -> Result<Json<Vec<SourceTotal>>, ServerError> {
    let filter = DepositFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        account_id: query.account_id,
    };
    let totals = state
        .engine
        .deposits_by_source(&user.username, filter)
        .await?;

    Ok(Json(
        totals
            .into_iter()
            .map(|row| SourceTotal {
                name: row.name,
                count: row.count,
                total: convert::money_to_wire(row.total),
            })
            .collect(),
    ))
}

pub async fn cashflow_monthly(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<CashflowQuery>,
) -> Result<Json<Vec<MonthCashflow>>, ServerError> {
    let months = state
        .engine
        .cashflow_monthly(&user.username, query.year)
        .await?;

    Ok(Json(
        months
            .into_iter()
            .map(|row| MonthCashflow {
                month: row.month.to_string(),
                deposits: convert::money_to_wire(row.deposits),
                payments: convert::money_to_wire(row.payments),
                net: convert::money_to_wire(row.net),
            })
            .collect(),
    ))
}

pub async fn payment_history(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<PaymentHistoryQuery>,
) -> Result<Json<Vec<api_types::payment::PaymentView>>, ServerError> {
    let filter = PaymentHistoryFilter {
        payee_account_id: query.payee_account_id,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    let payments = state.engine.payment_history(&user.username, filter).await?;

    Ok(Json(payments.into_iter().map(convert::payment_view).collect()))
}

pub async fn payee_balances(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<PayeeBalances>, ServerError> {
    let summary = state.engine.payee_balance_summary(&user.username).await?;

    Ok(Json(PayeeBalances {
        by_payee: summary
            .by_payee
            .into_iter()
            .map(|(payee_id, total)| PayeeBalance {
                payee_id,
                total: convert::money_to_wire(total),
            })
            .collect(),
        by_category: summary
            .by_category
            .into_iter()
            .map(|(category, total)| CategoryBalance {
                category: convert::category_to_wire(category),
                total: convert::money_to_wire(total),
            })
            .collect(),
    }))
}

pub async fn upcoming_due(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<UpcomingDueQuery>,
) -> Result<Json<Vec<PayeeAccountView>>, ServerError> {
    let within_days = query.within_days.unwrap_or(DEFAULT_DUE_HORIZON_DAYS);
    let due = state
        .engine
        .upcoming_due(&user.username, Utc::now().date_naive(), within_days)
        .await?;

    Ok(Json(
        due.into_iter().map(convert::payee_account_view).collect(),
    ))
}
