//! Till configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Till command line configuration
#[derive(Debug, Parser)]
#[command(
    name = "till",
    version,
    about = "Point-of-sale billing helper",
    long_about = None
)]
pub(crate) struct Config {
    /// Menu and receipt storage settings.
    #[command(flatten)]
    pub(crate) store: StoreConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Process exit status for a failed parse. Help and version output exit with 0.
pub(crate) fn exit_status(error: &clap::Error) -> u8 {
    u8::try_from(error.exit_code()).unwrap_or(2)
}

/// Where the menu and receipts live.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Menu CSV file; created with the default menu if missing
    #[arg(short, long, env = "TILL_MENU_PATH", default_value = "menu.csv")]
    pub(crate) menu_path: PathBuf,

    /// Directory receipts are written to
    #[arg(short, long, env = "TILL_RECEIPT_DIR", default_value = ".")]
    pub(crate) receipt_dir: PathBuf,

    /// Restaurant name printed on receipts
    #[arg(long, env = "TILL_RESTAURANT", default_value = "Tasty Bites")]
    pub(crate) restaurant: String,
}

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show the menu
    Menu,

    /// Bill a single order and save the receipt
    Bill(BillArgs),

    /// Take orders interactively on stdin
    Shell,
}

#[derive(Debug, Args)]
pub(crate) struct BillArgs {
    /// Item and quantity as NAME=QTY; repeat for more lines
    #[arg(short, long = "item", value_parser = parse_order_line, required = true)]
    pub(crate) items: Vec<OrderLine>,

    /// Discount percentage between 0 and 100
    #[arg(short, long)]
    pub(crate) discount: Option<String>,
}

/// Raw `NAME=QTY` order input; the quantity is validated when the item is added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OrderLine {
    pub(crate) name: String,
    pub(crate) quantity: String,
}

fn parse_order_line(s: &str) -> Result<OrderLine, String> {
    let (name, quantity) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=QTY, got {s:?}"))?;

    Ok(OrderLine {
        name: name.to_string(),
        quantity: quantity.to_string(),
    })
}
