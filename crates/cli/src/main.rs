//! Car Finder CLI - browse the catalog and manage the wishlist.
//!
//! # Usage
//!
//! ```bash
//! # Search the catalog (filters are optional and combine conjunctively)
//! car-finder search --brand Tata --max-price 1500000 --sort price-asc --page 2
//!
//! # Show one car in full
//! car-finder show car-003
//!
//! # Manage the wishlist
//! car-finder wishlist toggle car-003
//! car-finder wishlist list
//! car-finder wishlist count
//!
//! # Watch the wishlist for changes from any process
//! car-finder wishlist watch
//! ```
//!
//! # Environment Variables
//!
//! - `CAR_FINDER_DATA_DIR` - Directory holding the persisted wishlist
//!   (default: `$HOME/.car-finder`)

#![cfg_attr(not(test), forbid(unsafe_code))]
// Printing is this crate's job
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "car-finder")]
#[command(author, version, about = "Car Finder catalog browser")]
struct Cli {
    /// Base URL of the catalog service
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog with filters, sorting, and pagination
    Search {
        /// Exact brand to keep (omit for all brands)
        #[arg(long)]
        brand: Option<String>,

        /// Inclusive minimum price
        #[arg(long)]
        min_price: Option<String>,

        /// Inclusive maximum price
        #[arg(long)]
        max_price: Option<String>,

        /// Exact fuel type to keep (omit for all fuel types)
        #[arg(long)]
        fuel_type: Option<String>,

        /// Exact seating capacity to keep (omit for any)
        #[arg(long)]
        seats: Option<String>,

        /// Free text matched against name, brand, and model
        #[arg(long, short)]
        query: Option<String>,

        /// Sort order: default, price-asc, price-desc
        #[arg(long, default_value = "default")]
        sort: String,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: String,
    },
    /// Show the full details of one car
    Show {
        /// Car id (e.g. car-003)
        id: String,
    },
    /// Manage the persisted wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a car id to the wishlist (idempotent)
    Add { id: String },
    /// Remove a car id from the wishlist (idempotent)
    Remove { id: String },
    /// Add the id if absent, remove it if present
    Toggle { id: String },
    /// Empty the wishlist
    Clear,
    /// List the wishlisted cars, resolved against the catalog
    List,
    /// Print the number of wishlisted ids
    Count,
    /// Subscribe to wishlist changes and print them as they arrive
    Watch,
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
        Commands::Search {
            brand,
            min_price,
            max_price,
            fuel_type,
            seats,
            query,
            sort,
            page,
        } => {
            let spec = commands::search::spec_from_args(
                brand, min_price, max_price, fuel_type, seats, query, sort, page,
            );
            commands::search::run(&cli.server, &spec).await?;
        }
        Commands::Show { id } => commands::show::run(&cli.server, &id).await?,
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { id } => commands::wishlist::add(&id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&id)?,
            WishlistAction::Toggle { id } => commands::wishlist::toggle(&id)?,
            WishlistAction::Clear => commands::wishlist::clear()?,
            WishlistAction::List => commands::wishlist::list(&cli.server).await?,
            WishlistAction::Count => commands::wishlist::count()?,
            WishlistAction::Watch => commands::wishlist::watch().await?,
        },
    }
    Ok(())
}
