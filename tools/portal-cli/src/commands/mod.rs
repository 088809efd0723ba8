//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod list;
pub mod quote;

use clap::{Args, Subcommand};

/// Listing controls shared by `cart list` and `list`.
#[derive(Args, Clone)]
pub struct PageArgs {
    /// Page to show (1-based).
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default: from config).
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Column to sort by.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Add a product, merging with an existing line of the same variant.
    Add {
        /// Item code.
        item: String,

        /// Unit price in won.
        #[arg(long)]
        price: i64,

        /// Quantity to add.
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,

        /// Option code.
        #[arg(long, default_value = "")]
        option: String,

        /// Option value code.
        #[arg(long, default_value = "")]
        value: String,

        /// Option value display name.
        #[arg(long)]
        value_name: Option<String>,

        /// Product name.
        #[arg(long)]
        name: Option<String>,

        /// Seller company name.
        #[arg(long)]
        company: Option<String>,

        /// Unit label.
        #[arg(long)]
        unit: Option<String>,

        /// Specification text.
        #[arg(long)]
        spec: Option<String>,
    },

    /// Remove a line.
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },

    /// Set a line's quantity.
    SetQty {
        #[command(flatten)]
        line: LineArgs,

        /// New quantity (values below 1 become 1).
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Change a line's quantity by a delta.
    Bump {
        #[command(flatten)]
        line: LineArgs,

        /// Amount to add; negative to subtract.
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Delete the whole cart.
    Clear,

    /// Move the guest cart into the current customer's cart.
    Adopt,
}

/// Identifies one cart line.
#[derive(Args, Clone)]
pub struct LineArgs {
    /// Item code.
    pub item: String,

    /// Option code.
    #[arg(long, default_value = "")]
    pub option: String,

    /// Option value code.
    #[arg(long, default_value = "")]
    pub value: String,
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Item codes to quote; every variant of each item is included.
    #[arg(required_unless_present = "all")]
    pub items: Vec<String>,

    /// Quote every line in the cart.
    #[arg(long, conflicts_with = "items")]
    pub all: bool,

    /// Note for the sales team.
    #[arg(short, long)]
    pub memo: Option<String>,
}

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// JSON file holding an array of records or a `{"data": [...]}` envelope.
    pub file: String,

    /// Search text.
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Fields to search in (default: from config).
    #[arg(long = "in", value_delimiter = ',')]
    pub search_in: Vec<String>,

    /// Columns to print.
    #[arg(long, value_delimiter = ',', default_value = "itemCd,itemNm")]
    pub columns: Vec<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value and write it back.
    Set {
        /// Config key (e.g., listing.page_size).
        key: String,
        /// New value; lists are comma-separated.
        value: String,
    },

    /// Initialize a new config file.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
