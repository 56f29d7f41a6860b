//! Record command
//!
//! Usage: changetrail record <NOTIFICATION>... --user <TOKEN> [--config <FILE>]
//!
//! Every notification file holds one change notification or a list of them.
//! All changes are audited by one auditor, so they share a timestamp.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use changetrail_core::logging_facility;
use changetrail_core::{Auditor, AuditorConfig, ChangeNotification};
use clap::Args;
use serde::Deserialize;

use super::read_document;

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Change notification documents (YAML or JSON)
    #[arg(required = true)]
    pub notifications: Vec<PathBuf>,

    /// Token of the user who made the changes
    #[arg(short, long)]
    pub user: String,

    /// Auditor configuration (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NotificationDocument {
    Many(Vec<ChangeNotification>),
    One(ChangeNotification),
}

/// Execute record command
pub fn execute(args: RecordArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => AuditorConfig::load(path)
            .with_context(|| format!("Invalid configuration {}", path.display()))?,
        None => AuditorConfig::default(),
    };
    logging_facility::init(config.log_profile);

    let mut entries = Vec::new();
    for path in &args.notifications {
        match read_document::<NotificationDocument>(path)? {
            NotificationDocument::Many(many) => entries.extend(many.into_iter().map(Arc::new)),
            NotificationDocument::One(one) => entries.push(Arc::new(one)),
        }
    }

    let auditor = Auditor::from_config(&config);
    let audits = auditor.record_changes(&entries, &args.user)?;

    // Documents carry final values, so pending ids resolve immediately.
    for audit in audits {
        let record = audit.into_record()?;
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}
