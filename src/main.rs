use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use lazyslide::app::App;
use lazyslide::bootstrap::{init_logging, install_panic_hook, TerminalSession};
use lazyslide::config::Config;
use lazyslide::deck::Deck;
use lazyslide::export::{ExportPlan, Exporter, JsonDeckWriter, TerminalCapture};
use lazyslide::logging;
use lazyslide::runtime::Runner;
use lazyslide::ui::ViewOptions;

/// Present slide decks in the terminal.
#[derive(Parser, Debug)]
#[command(name = "lazyslide")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (default: ~/.config/lazyslide/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a deck in the presenter
    Present {
        /// Deck file
        deck: PathBuf,
    },
    /// Render the decks listed in an export plan to files
    Export {
        /// Export plan (TOML)
        plan: PathBuf,

        /// Output directory, overriding the plan's
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::new(),
    };
    init_logging(&config);

    match args.command {
        Command::Present { deck } => present(config, &deck).await,
        Command::Export { plan, output } => export(&config, &plan, output),
    }
}

async fn present(config: Config, path: &Path) -> Result<()> {
    let deck = Deck::load(path).with_context(|| format!("Failed to load deck {}", path.display()))?;
    logging::info(&format!(
        "Presenting {} ({} slides)",
        deck.display_title(),
        deck.len()
    ));

    install_panic_hook();
    let mut session = TerminalSession::new()?;
    let app = App::new(config, deck);

    let result = Runner::new(session.terminal_mut(), app).run().await;
    drop(session);

    if let Err(err) = &result {
        logging::error(&format!("Presenter stopped: {}", err));
    }
    result.context("Presenter failed")
}

fn export(config: &Config, plan_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let mut plan = ExportPlan::load(plan_path)?;
    if let Some(output) = output {
        // relative to where the command runs, not to the plan
        plan.output_dir = std::env::current_dir()?.join(output);
    }
    logging::info(&format!(
        "Exporting {} chapters from {}",
        plan.chapters.len(),
        plan_path.display()
    ));

    let capture = TerminalCapture::new(plan.width, plan.height, config.theme.clone());
    let writer = JsonDeckWriter::new(plan.output_path(), plan.width, plan.height);
    let mut exporter = Exporter::new(plan, ViewOptions::from_config(config), capture, writer);

    let summary = exporter.run()?;
    for deck in &summary.decks {
        println!("{}", deck.display());
    }
    println!("{} slides in {} files", summary.slides, summary.decks.len());
    Ok(())
}
