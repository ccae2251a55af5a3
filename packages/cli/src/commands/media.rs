use super::{open_session, Format};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use vellum_editor::{media_references, MediaRole};

#[derive(Debug, Args)]
pub struct MediaArgs {
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,
}

/// List the media an export of the composed document would bundle
pub async fn media(args: MediaArgs, cwd: &str, entry: Option<&str>) -> Result<()> {
    let session = open_session(cwd, entry).await?;
    let references = session
        .state()
        .compose()
        .map(|document| media_references(&document))
        .unwrap_or_default();

    if args.format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&references)?);
        return Ok(());
    }

    if references.is_empty() {
        println!("{}", "⚠️  No media referenced".yellow());
        return Ok(());
    }

    for reference in &references {
        let role = match reference.role {
            MediaRole::Primary => "primary".normal(),
            MediaRole::HiRes => "hi-res".dimmed(),
        };
        println!(
            "  {:<10} img {:<2} {:<8} {}",
            reference.address.to_string(),
            reference.image_position,
            role,
            reference.reference
        );
    }
    Ok(())
}
