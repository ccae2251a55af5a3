use super::{open_session, Format};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use vellum_editor::ComposedDocument;

#[derive(Debug, Args)]
pub struct ComposeArgs {
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: Format,
}

pub async fn compose(args: ComposeArgs, cwd: &str, entry: Option<&str>) -> Result<()> {
    let session = open_session(cwd, entry).await?;

    let Some(document) = session.state().compose() else {
        println!("{}", "⚠️  The rich-content track has no revisions".yellow());
        return Ok(());
    };

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&document)?),
        Format::Text => print_document(&document),
    }
    Ok(())
}

fn print_document(document: &ComposedDocument) {
    let title = if document.is_hybrid() {
        format!("Composed on {} (hybrid)", document.base)
    } else {
        format!("Composed on {}", document.base)
    };
    println!("{}", title.bright_blue().bold());

    for section in &document.sections {
        println!();
        println!("{}", section.section_type.as_str().bold());
        for composed in &section.modules {
            let source = if composed.source == document.base {
                String::new()
            } else {
                format!("← {}", composed.source).yellow().to_string()
            };
            println!(
                "  #{:<2} {}  {}",
                composed.address.module_position, composed.module.headline, source
            );
        }
    }
}
