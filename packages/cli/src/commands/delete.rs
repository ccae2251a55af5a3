use super::{check_report, open_session};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use vellum_editor::Command;
use vellum_model::{RevisionId, TrackKind};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Track holding the revision
    #[arg(short, long)]
    pub track: TrackKind,

    /// Revision to delete
    pub revision: String,
}

pub async fn delete(args: DeleteArgs, cwd: &str, entry: Option<&str>) -> Result<()> {
    let mut session = open_session(cwd, entry).await?;

    let report = session
        .dispatch(Command::DeleteRevision {
            track: args.track,
            revision_id: RevisionId::new(&args.revision),
        })
        .await?;
    check_report(&report)?;

    println!(
        "{} Deleted {} revision {} ({} left)",
        "✓".green(),
        args.track,
        args.revision.bright_white(),
        session.state().track_len(args.track)
    );
    Ok(())
}
