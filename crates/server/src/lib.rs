use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use interest_job::interest_accrual_loop;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod accounts;
mod convert;
mod deposits;
mod interest_job;
mod payee_accounts;
mod payees;
mod payments;
mod reports;
mod server;
mod summary;
mod transfers;
mod user;

pub mod types {
    pub mod account {
        pub use api_types::account::{AccountUpsert, AccountView};
    }

    pub mod payee {
        pub use api_types::payee::{PayeeUpsert, PayeeView};
    }

    pub mod payee_account {
        pub use api_types::payee_account::{
            AmortizationRow, AmortizationSchedule, PayeeAccountUpsert, PayeeAccountView,
            RecommendedPayment,
        };
    }

    pub mod deposit {
        pub use api_types::deposit::{DepositUpsert, DepositView};
    }

    pub mod payment {
        pub use api_types::payment::{PaymentUpsert, PaymentView};
    }

    pub mod transfer {
        pub use api_types::transfer::{TransferNew, TransferView};
    }

    pub mod summary {
        pub use api_types::summary::Summary;
    }

    pub mod report {
        pub use api_types::report::{
            CashflowQuery, DepositsBySourceQuery, MonthCashflow, PayeeBalances,
            PaymentHistoryQuery, SourceTotal, UpcomingDueQuery,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InsufficientFunds(_)
        | EngineError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
