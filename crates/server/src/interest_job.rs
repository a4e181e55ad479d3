use std::time::Duration;

use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::user;
use engine::Engine;

const ACCRUAL_INTERVAL: Duration = Duration::from_secs(60 * 60 * 12);

/// Applies monthly interest for every user on a fixed cadence.
///
/// The engine skips accounts that already accrued this calendar month, so the
/// loop can run well more often than once a month without double-charging.
pub async fn interest_accrual_loop(engine: Engine, db: DatabaseConnection) {
    let mut ticker = tokio::time::interval(ACCRUAL_INTERVAL);
    loop {
        ticker.tick().await;

        let users = match user::Entity::find().all(&db).await {
            Ok(users) => users,
            Err(err) => {
                tracing::error!("failed to list users for interest accrual: {err}");
                continue;
            }
        };

        let today = Utc::now().date_naive();
        for user in users {
            match engine.accrue_monthly_interest(&user.username, today).await {
                Ok(0) => {}
                Ok(updated) => {
                    tracing::info!(user = %user.username, updated, "applied monthly interest");
                }
                Err(err) => {
                    tracing::error!(user = %user.username, "interest accrual failed: {err}");
                }
            }
        }
    }
}
