use super::open_session;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use vellum_model::{BulletSet, Payload, TrackKind};

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Track to append to (heading, bullets, images, video, rich-content)
    #[arg(short, long)]
    pub track: TrackKind,

    /// JSON file holding the payload
    pub payload: PathBuf,
}

pub async fn create(args: CreateArgs, cwd: &str, entry: Option<&str>) -> Result<()> {
    let payload = read_payload(args.track, &args.payload)?;
    let mut session = open_session(cwd, entry).await?;

    let revision = session.create_revision(payload).await?;

    println!(
        "{} Created {} revision {} (seq {})",
        "✓".green(),
        args.track,
        revision.id.to_string().bright_white(),
        revision.seq
    );
    Ok(())
}

/// Read a payload for `track` from a JSON file.
///
/// The `kind` tag may be omitted. A bullets payload may also be a plain
/// array of lines.
pub fn read_payload(track: TrackKind, path: &Path) -> Result<Payload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read payload file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)?;
    parse_payload(track, value)
}

fn parse_payload(track: TrackKind, value: Value) -> Result<Payload> {
    match value {
        Value::Array(lines) if track == TrackKind::Bullets => {
            let lines = lines
                .into_iter()
                .map(|line| match line {
                    Value::String(text) => text,
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>();
            Ok(Payload::Bullets(BulletSet::from_lines(lines)?))
        }
        Value::Object(mut fields) => {
            fields
                .entry("kind")
                .or_insert_with(|| Value::String(track.as_str().to_string()));
            let payload: Payload = serde_json::from_value(Value::Object(fields))?;
            Ok(payload)
        }
        _ => anyhow::bail!("Payload for the {} track must be a JSON object", track),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_tag_is_optional() {
        let payload = parse_payload(TrackKind::Heading, json!({ "text": "Trail Shoe" })).unwrap();
        assert_eq!(payload.kind(), TrackKind::Heading);
    }

    #[test]
    fn test_bullets_from_plain_lines() {
        let payload =
            parse_payload(TrackKind::Bullets, json!(["Light", null, "Grippy"])).unwrap();
        match payload {
            Payload::Bullets(set) => {
                assert_eq!(set.iter().collect::<Vec<_>>(), vec!["Light", "Grippy"]);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_too_many_bullets() {
        let result = parse_payload(TrackKind::Bullets, json!(["a", "b", "c", "d", "e", "f"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_rich_content_payload() {
        let payload = parse_payload(
            TrackKind::RichContent,
            json!({
                "sections": [{
                    "section_type": "hero",
                    "modules": [{ "headline": "Built to last", "body": "", "images": [] }]
                }]
            }),
        )
        .unwrap();
        assert_eq!(payload.kind(), TrackKind::RichContent);
    }
}
