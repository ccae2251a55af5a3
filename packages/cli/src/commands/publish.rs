use super::{check_report, open_session};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use vellum_model::{RevisionId, TrackKind};

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Track to publish
    #[arg(short, long)]
    pub track: TrackKind,

    /// Revision to make live
    #[arg(required_unless_present = "unset")]
    pub revision: Option<String>,

    /// Leave the track without a live revision
    #[arg(long, conflicts_with = "revision")]
    pub unset: bool,
}

pub async fn publish(args: PublishArgs, cwd: &str, entry: Option<&str>) -> Result<()> {
    let mut session = open_session(cwd, entry).await?;
    let overrides_before = session.state().overrides().len();

    let revision = args.revision.as_deref().map(RevisionId::new);
    session.store().set_live(args.track, revision.clone()).await?;
    let report = session.refresh_live().await?;

    match revision {
        Some(id) => println!(
            "{} {} is live on the {} track",
            "✓".green(),
            id.to_string().bright_white(),
            args.track
        ),
        None => println!("{} {} track has no live revision", "✓".green(), args.track),
    }

    let now_live = overrides_before - session.state().overrides().len();
    if now_live > 0 {
        println!("  {} overrides now follow the live revision", now_live);
    }
    check_report(&report)
}
