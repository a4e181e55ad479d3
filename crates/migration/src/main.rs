//! Migration CLI: `cargo run -p migration -- [up|down|fresh|status]`.
//!
//! Targets the database the workspace `settings.toml` points at, so the CLI
//! and the app binary always agree on which file to migrate. `DATABASE_URL`
//! overrides the settings when set.

use config::{Config, File};
use sea_orm::Database;
use sea_orm_migration::prelude::*;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
enum DatabaseSetting {
    Memory,
    Sqlite(String),
}

fn database_url() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }

    let configured = Config::builder()
        .add_source(File::with_name("settings").required(false))
        .build()
        .ok()
        .and_then(|settings| settings.get::<DatabaseSetting>("server.database").ok());

    match configured {
        Some(DatabaseSetting::Memory) => String::from("sqlite::memory:"),
        Some(DatabaseSetting::Sqlite(path)) => format!("sqlite:{path}?mode=rwc"),
        None => String::from("sqlite:./centavo.db?mode=rwc"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().unwrap_or_else(|| "up".to_string());

    let db = Database::connect(database_url()).await?;

    match cmd.as_str() {
        "up" => migration::Migrator::up(&db, None).await?,
        "down" => migration::Migrator::down(&db, None).await?,
        "fresh" => migration::Migrator::fresh(&db).await?,
        "status" => {
            migration::Migrator::status(&db).await?;
        }
        _ => {
            eprintln!("Usage: cargo run -p migration -- [up|down|fresh|status]");
            std::process::exit(2);
        }
    }

    Ok(())
}
