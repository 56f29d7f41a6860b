//! Diff command
//!
//! Usage: changetrail diff <ORIGINAL> <CURRENT> [--json]

use std::path::PathBuf;

use anyhow::Result;
use changetrail_core::diff::{diff_values, render_human_summary};
use changetrail_core::ValueSet;
use clap::Args;

use super::read_document;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Value set before the change (YAML or JSON object)
    pub original: PathBuf,

    /// Value set after the change (YAML or JSON object)
    pub current: PathBuf,

    /// Print the diff as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<()> {
    let original: ValueSet = read_document(&args.original)?;
    let current: ValueSet = read_document(&args.current)?;

    let diff = diff_values(&original, &current)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        print!("{}", render_human_summary(&diff));
    }

    Ok(())
}
