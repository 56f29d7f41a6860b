//! changetrail CLI
//!
//! Command-line harness for producing audit records from change documents

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "changetrail")]
#[command(about = "changetrail - Audit-trail records for data-store changes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Audit change notifications and print one JSON record per change
    Record(commands::record::RecordArgs),
    /// Diff two value-set documents
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Record(args) => commands::record::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
