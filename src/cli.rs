use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::pricing::constants::DEFAULT_VAT_RATE;

/// Catering quote — prices meals, packets and services into a marked-up quote.
#[derive(Parser, Debug)]
#[command(name = "catering_quote")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the catalog JSON file.
    #[arg(long, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Path to the cart JSON file.
    #[arg(long, default_value = "cart.json")]
    pub cart: PathBuf,

    /// VAT rate (percent) for standalone gross prices.
    #[arg(long, default_value_t = DEFAULT_VAT_RATE)]
    pub vat_rate: f64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the grouped cart with net and gross totals.
    Quote {
        /// Also export the quote to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List catalog items with net and VAT-inclusive prices.
    Items,

    /// Show the price of a single item, found by id or name.
    Price {
        /// Item id or (fuzzy) name.
        query: String,
    },

    /// Interactively edit the cart.
    Edit,
}

impl Default for Command {
    fn default() -> Self {
        Command::Quote { csv: None }
    }
}
