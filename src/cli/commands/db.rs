use serde_json::json;

use crate::cli::utils::{connect, output_success};
use crate::cli::OutputFormat;
use crate::database::{seed, DatabaseManager};

pub async fn migrate(output_format: OutputFormat) -> anyhow::Result<()> {
    let (pool, _) = connect().await?;
    DatabaseManager::migrate(&pool).await?;
    output_success(output_format, "Migrations applied", None)
}

pub async fn seed(output_format: OutputFormat) -> anyhow::Result<()> {
    let (pool, _) = connect().await?;
    DatabaseManager::migrate(&pool).await?;
    let report = seed::seed_defaults(&pool).await?;

    let message = if report.seeded.is_empty() {
        "All tables already had content".to_string()
    } else {
        format!("Seeded {}", report.seeded.join(", "))
    };
    output_success(output_format, &message, Some(json!(report)))
}
