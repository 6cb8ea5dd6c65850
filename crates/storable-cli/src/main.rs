//! Storable CLI
//!
//! Command-line interface for the typed storage wrapper

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use storable_core::logging_facility::{self, Profile};
use storable_core::{StorageConfig, DEFAULT_QUOTA};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "storable")]
#[command(about = "Storable - typed JSON key-value storage", long_about = None)]
struct Cli {
    /// Snapshot file of the durable store
    #[arg(long, global = true, default_value = ".storable/local.json")]
    store: PathBuf,

    /// Capacity of each store in UTF-16 code units (0 for unlimited)
    #[arg(long, global = true, default_value_t = DEFAULT_QUOTA)]
    quota: usize,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Dev)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Dev,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Walk both stores through set, list, clear and a delayed pop
    Demo(commands::demo::DemoArgs),
    #[command(flatten)]
    Item(commands::item::ItemCommand),
}

/// Options shared by every command
pub struct Settings {
    pub store_path: PathBuf,
    pub config: StorageConfig,
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log_format {
        LogFormat::Dev => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let quota = (cli.quota > 0).then_some(cli.quota);
    let settings = Settings {
        store_path: cli.store,
        config: StorageConfig::with_quota(quota),
    };

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(args, &settings),
        Commands::Item(command) => commands::item::execute(command, &settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
