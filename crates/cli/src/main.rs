//! Confeitaria CLI - scriptable order edits and quote output.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! confeitaria-cli catalog --search trufa
//!
//! # Build an order
//! confeitaria-cli set 1 20
//! confeitaria-cli add 14
//! confeitaria-cli date 2026-12-25
//!
//! # Send it
//! confeitaria-cli message
//! confeitaria-cli whatsapp
//! ```
//!
//! Reads the same saved order as the interactive `confeitaria` shell.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use confeitaria_storefront::config::AppConfig;
use confeitaria_storefront::error::Result;
use confeitaria_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "confeitaria-cli")]
#[command(author, version, about = "Lorena Felicio Confeitaria order tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the catalog
    Catalog {
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category key, or `all`
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// List category keys
    Categories,
    /// Set a product's quantity (clamped to 0..=999)
    Set {
        product_id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Add one unit of a product
    Add { product_id: String },
    /// Remove one unit of a product
    Remove { product_id: String },
    /// Set the delivery date (YYYY-MM-DD); omit to clear it
    Date { date: Option<String> },
    /// Empty the order
    Clear,
    /// Show the order summary
    Summary,
    /// Print the quote request text
    Message,
    /// Print the WhatsApp link for the quote request
    Whatsapp {
        /// Digits-only phone number, country code first
        #[arg(short, long)]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "confeitaria_storefront=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                println!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let state = AppState::new(AppConfig::from_env()?)?;
    match cli.command {
        Commands::Catalog { search, category } => {
            Ok(commands::catalog::list(&state, &search, &category))
        }
        Commands::Categories => Ok(commands::catalog::categories(&state)),
        Commands::Set {
            product_id,
            quantity,
        } => commands::order::set(&state, &product_id, quantity),
        Commands::Add { product_id } => commands::order::add(&state, &product_id),
        Commands::Remove { product_id } => commands::order::remove(&state, &product_id),
        Commands::Date { date } => commands::order::date(&state, date.as_deref()),
        Commands::Clear => Ok(commands::order::clear(&state)),
        Commands::Summary => Ok(commands::order::summary(&state)),
        Commands::Message => commands::order::message(&state),
        Commands::Whatsapp { phone } => commands::order::whatsapp(&state, phone.as_deref()),
    }
}
