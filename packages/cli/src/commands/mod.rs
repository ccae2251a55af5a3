pub mod compose;
pub mod create;
pub mod delete;
pub mod history;
pub mod init;
pub mod media;
pub mod overrides;
pub mod publish;

pub use compose::{compose, ComposeArgs};
pub use create::{create, CreateArgs};
pub use delete::{delete, DeleteArgs};
pub use history::{history, HistoryArgs};
pub use init::{init, InitArgs};
pub use media::{media, MediaArgs};
pub use overrides::{overrides, OverrideArgs};
pub use publish::{publish, PublishArgs};

use crate::config::Config;
use anyhow::{bail, Result};
use clap::ValueEnum;
use colored::Colorize;
use std::sync::Arc;
use vellum_editor::{DispatchReport, EditSession};
use vellum_store::JsonFileStore;

/// Output format of read-only commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Open the entry file and load an editing session over it
pub async fn open_session(cwd: &str, entry: Option<&str>) -> Result<EditSession<JsonFileStore>> {
    let config = Config::load(cwd)?;
    let entry = config.resolve_entry(entry)?;
    let store = JsonFileStore::open(config.entry_path(cwd, &entry)).await?;
    Ok(EditSession::load(Arc::new(store)).await?)
}

/// Print failed store calls and turn them into an error exit
pub fn check_report(report: &DispatchReport) -> Result<()> {
    if report.is_persisted() {
        return Ok(());
    }

    for failure in &report.failures {
        eprintln!("  {} {} - {}", "✗".red(), failure.call, failure.error);
    }
    bail!(
        "{} of {} store calls failed; local state was kept",
        report.failures.len(),
        report.issued
    )
}
