use super::{check_report, open_session};
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use vellum_editor::Command;
use vellum_model::{LeafAddress, RevisionId};

#[derive(Debug, Args)]
pub struct OverrideArgs {
    #[command(subcommand)]
    pub action: OverrideAction,
}

#[derive(Debug, Subcommand)]
pub enum OverrideAction {
    /// Show one module from another rich-content revision
    Set {
        /// Module address, e.g. hero#0
        leaf: LeafAddress,
        revision: String,
    },

    /// Put one module, or every module with --all, back on the live revision
    Clear {
        #[arg(required_unless_present = "all")]
        leaf: Option<LeafAddress>,

        #[arg(long, conflicts_with = "leaf")]
        all: bool,
    },

    /// Fill every module of the current layout from one revision
    All { revision: String },

    /// Step one module to its previous version
    Older { leaf: LeafAddress },

    /// Step one module to its next version
    Newer { leaf: LeafAddress },

    /// Put one module back on the live revision
    Live { leaf: LeafAddress },
}

impl OverrideAction {
    fn into_command(self) -> Command {
        match self {
            OverrideAction::Set { leaf, revision } => Command::SetLeafOverride {
                leaf,
                revision_id: RevisionId::new(revision),
            },
            OverrideAction::Clear { leaf: Some(leaf), .. } => Command::ClearLeafOverride { leaf },
            OverrideAction::Clear { leaf: None, .. } => Command::ClearAllOverrides,
            OverrideAction::All { revision } => Command::ApplyRevisionToAllLeaves {
                revision_id: RevisionId::new(revision),
            },
            OverrideAction::Older { leaf } => Command::LeafStepOlder { leaf },
            OverrideAction::Newer { leaf } => Command::LeafStepNewer { leaf },
            OverrideAction::Live { leaf } => Command::LeafJumpToLive { leaf },
        }
    }
}

pub async fn overrides(args: OverrideArgs, cwd: &str, entry: Option<&str>) -> Result<()> {
    let mut session = open_session(cwd, entry).await?;
    let command = args.action.into_command();
    let name = command.name();

    let report = session.dispatch(command).await?;
    check_report(&report)?;

    if !report.changed && report.issued == 0 {
        println!("{} {}: nothing to change", "⚠️".yellow(), name);
        return Ok(());
    }

    println!(
        "{} {} ({} store calls, {} overrides active)",
        "✓".green(),
        name,
        report.issued,
        session.state().overrides().len()
    );
    for (leaf, revision_id) in session.state().overrides().iter() {
        println!("  {} → {}", leaf, revision_id.to_string().bright_white());
    }
    Ok(())
}
