mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    compose, create, delete, history, init, media, overrides, publish, ComposeArgs, CreateArgs,
    DeleteArgs, HistoryArgs, InitArgs, MediaArgs, OverrideArgs, PublishArgs,
};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Vellum - browse and compose versioned catalog content
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog entry to operate on (defaults to defaultEntry from config)
    #[arg(short, long, global = true)]
    entry: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a Vellum workspace
    Init(InitArgs),

    /// Append a revision to a track from a JSON payload file
    Create(CreateArgs),

    /// Delete a heading, bullets, images or video revision
    Delete(DeleteArgs),

    /// List a track's revisions, or one module's compacted history
    History(HistoryArgs),

    /// Make a revision live
    Publish(PublishArgs),

    /// Point rich-content modules at other revisions
    Override(OverrideArgs),

    /// Print the composed rich-content document
    Compose(ComposeArgs),

    /// List media referenced by the composed document
    Media(MediaArgs),
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    let config = Config::load(&cwd)?;
    init_tracing(&config.log_filter);

    let entry = cli.entry.as_deref();
    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Create(args) => create(args, &cwd, entry).await,
        Command::Delete(args) => delete(args, &cwd, entry).await,
        Command::History(args) => history(args, &cwd, entry).await,
        Command::Publish(args) => publish(args, &cwd, entry).await,
        Command::Override(args) => overrides(args, &cwd, entry).await,
        Command::Compose(args) => compose(args, &cwd, entry).await,
        Command::Media(args) => media(args, &cwd, entry).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
