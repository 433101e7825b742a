//! Flower shop CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create or update the schema
//! fs-cli migrate
//!
//! # Load flower inventory from YAML
//! fs-cli seed flowers.yaml
//!
//! # Create a user
//! fs-cli user create -e ann@example.com -n "Ann Lee" -p petals
//! ```
//!
//! All commands read `SHOP_DATABASE_URL` (or `DATABASE_URL`) the same way the
//! server does.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fs-cli")]
#[command(author, version, about = "Flower shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert flowers listed in a YAML file
    Seed {
        /// Path to the YAML file
        file: PathBuf,
    },
    /// Manage shop users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Full name
        #[arg(short, long)]
        name: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file } => commands::seed::flowers(&file).await?,
        Commands::User { action } => match action {
            UserAction::Create {
                email,
                name,
                password,
            } => {
                commands::user::create(&email, &name, &password).await?;
            }
        },
    }
    Ok(())
}
