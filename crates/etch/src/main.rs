//! # etch
//!
//! Etch - Turn markup fragments into DOM-building JavaScript.
//!
//! ## Name Origin
//!
//! **Etching** transfers a drawing onto a plate line by line. This binary is
//! the command-line face of the toolchain: it reads a fragment, loads
//! `etch.config.json` defaults and prints the statements that draw it again.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "etch")]
#[command(about = "Turn markup fragments into DOM-building JavaScript", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ./etch.config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log parser diagnostics and progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a markup fragment (default command)
    #[command(visible_alias = "atelier")]
    Convert(commands::convert::ConvertArgs),

    /// Print the JSON Schema for etch.config.json
    Schema,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Schema) => {
            commands::schema::run();
            Ok(())
        }
        Some(Commands::Convert(args)) => {
            let config = config::load_config(cli.config.as_deref());
            commands::convert::run(args, &config.convert)
        }
        None => {
            // Default to convert with default args (stdin to stdout)
            let config = config::load_config(cli.config.as_deref());
            commands::convert::run(commands::convert::ConvertArgs::default(), &config.convert)
        }
    };

    if let Err(e) = result {
        eprintln!("\x1b[31mError:\x1b[0m {e}");
        std::process::exit(1);
    }
}
