pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "bandsite")]
#[command(about = "Band site CLI - database setup, admin password and merch stock")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Apply database migrations")]
    Migrate,

    #[command(about = "Seed empty tables with default content")]
    Seed,

    #[command(about = "Print the ADMIN_PASSWORD_HASH value for a password")]
    HashPassword {
        #[arg(help = "Admin password")]
        password: String,
    },

    #[command(about = "Merch inventory management")]
    Inventory {
        #[command(subcommand)]
        cmd: commands::inventory::InventoryCommands,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Migrate => commands::db::migrate(output_format).await,
        Commands::Seed => commands::db::seed(output_format).await,
        Commands::HashPassword { password } => commands::password::hash(&password, output_format),
        Commands::Inventory { cmd } => commands::inventory::handle(cmd, output_format).await,
    }
}
