use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::config::{self, AppConfig};
use crate::database::DatabaseManager;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let Some(data_value) = data {
                response["data"] = data_value;
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print rows as JSON, or as text lines built by `line`
pub fn output_rows<T: Serialize>(
    output_format: OutputFormat,
    rows: &[T],
    line: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "success": true, "data": rows }))?);
        }
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("(none)");
            }
            for row in rows {
                println!("{}", line(row));
            }
        }
    }
    Ok(())
}

/// Connect using the same configuration as the server
pub async fn connect() -> anyhow::Result<(sqlx::PgPool, &'static AppConfig)> {
    let _ = dotenvy::dotenv();
    let config = config::config();
    let pool = DatabaseManager::connect(&config.database).await?;
    Ok((pool, config))
}
