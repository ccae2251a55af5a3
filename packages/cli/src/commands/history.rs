use super::{open_session, Format};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use vellum_editor::EntryState;
use vellum_model::{LeafAddress, RevisionId, Track, TrackKind};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Track to list
    #[arg(short, long, default_value = "rich-content")]
    pub track: TrackKind,

    /// Show the compacted history of one rich-content module (e.g. hero#0)
    #[arg(short, long)]
    pub leaf: Option<LeafAddress>,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,
}

pub async fn history(args: HistoryArgs, cwd: &str, entry: Option<&str>) -> Result<()> {
    let session = open_session(cwd, entry).await?;
    let state = session.state();

    match &args.leaf {
        Some(leaf) => print_leaf_history(state, leaf, args.format),
        None => print_track(state, args.track, args.format),
    }
}

fn print_track(state: &EntryState, track: TrackKind, format: Format) -> Result<()> {
    let live = state.live().get(track);
    let rows = match track {
        TrackKind::Heading => revision_rows(state.heading().track()),
        TrackKind::Bullets => revision_rows(state.bullets().track()),
        TrackKind::Images => revision_rows(state.images().track()),
        TrackKind::Video => revision_rows(state.video().track()),
        TrackKind::RichContent => revision_rows(state.rich_content().track()),
    };

    if format == Format::Json {
        let json: Vec<_> = rows
            .iter()
            .map(|(id, seq, created_at)| {
                serde_json::json!({
                    "id": id,
                    "seq": seq,
                    "createdAt": created_at,
                    "live": Some(*id) == live,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("{}", format!("⚠️  The {} track has no revisions", track).yellow());
        return Ok(());
    }

    println!("{}", format!("{} history (newest first)", track).bright_blue().bold());
    for (id, seq, created_at) in &rows {
        let marker = if Some(*id) == live {
            "live".green().bold().to_string()
        } else {
            String::new()
        };
        println!("  {:>4}  {}  {}  {}", seq, id, created_at.as_str().dimmed(), marker);
    }
    Ok(())
}

/// Id, sequence number and timestamp of every revision, newest first
fn revision_rows<P>(track: &Track<P>) -> Vec<(&RevisionId, u64, String)> {
    track
        .iter()
        .map(|revision| (&revision.id, revision.seq, revision.created_at.to_rfc3339()))
        .collect()
}

fn print_leaf_history(state: &EntryState, leaf: &LeafAddress, format: Format) -> Result<()> {
    let history = state.history(leaf);
    let effective = state.effective_revision(leaf);

    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        println!("{}", format!("⚠️  No revision has a module at {}", leaf).yellow());
        return Ok(());
    }

    println!("{}", format!("{} versions of {}", history.len(), leaf).bright_blue().bold());
    for entry in &history {
        let shown = effective.map(|id| entry.covers(id)).unwrap_or(false);
        let marker = if shown {
            "shown".green().bold().to_string()
        } else {
            String::new()
        };
        println!(
            "  v{:<3} {}  ({} revisions)  {}",
            entry.version,
            entry.revision_id,
            entry.covers.len(),
            marker
        );
    }
    Ok(())
}
