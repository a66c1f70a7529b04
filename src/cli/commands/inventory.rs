use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{connect, output_rows, output_success};
use crate::cli::OutputFormat;
use crate::database::models::{InventoryItem, NewInventoryItem};
use crate::database::{Repository, ResourceInput};

#[derive(Subcommand)]
pub enum InventoryCommands {
    #[command(about = "List stock for every product and size")]
    List,

    #[command(about = "Set absolute stock for a product (and size)")]
    Set {
        #[arg(help = "Product key, e.g. tshirt or vinyl")]
        product: String,
        #[arg(help = "New quantity")]
        quantity: i32,
        #[arg(long, help = "Size for sized products")]
        size: Option<String>,
    },
}

pub async fn handle(cmd: InventoryCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let (pool, _) = connect().await?;

    match cmd {
        InventoryCommands::List => {
            let rows = Repository::<InventoryItem>::new(pool).select_all().await?;
            output_rows(output_format, &rows, |row| {
                format!(
                    "{:<8} {:<4} {}",
                    row.product,
                    row.size.as_deref().unwrap_or("-"),
                    row.quantity
                )
            })
        }
        InventoryCommands::Set { product, quantity, size } => {
            let input = NewInventoryItem { product, size, quantity };
            if let Err(errors) = input.validate() {
                anyhow::bail!("invalid inventory entry: {}", errors);
            }

            let size = input
                .size
                .as_deref()
                .and_then(|s| crate::services::catalog::find(&input.product)?.canonical_size(s));
            let row = InventoryItem::set_stock(&pool, &input.product, size, input.quantity).await?;
            output_success(
                output_format,
                &format!("{} {} now at {}", row.product, row.size.as_deref().unwrap_or(""), row.quantity),
                Some(json!(row)),
            )
        }
    }
}
