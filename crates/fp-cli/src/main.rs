//! CLI frontend for Fablepath branching stories.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fablepath",
    about = "Fablepath: write, check and present branching picture stories",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the sample story to a new file as a starting point
    Init {
        /// Path of the story file to create
        path: PathBuf,
    },

    /// Load a story and report problems
    Check {
        /// Story file (default: the bundled sample)
        story: Option<PathBuf>,
    },

    /// Print a table of pages and where each one leads
    Outline {
        /// Story file (default: the bundled sample)
        story: Option<PathBuf>,
    },

    /// Present a story in the terminal
    Play {
        /// Story file (default: the bundled sample)
        story: Option<PathBuf>,

        /// Audio player command for narration
        #[arg(long)]
        player: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init::run(&path),
        Commands::Check { story } => commands::check::run(story.as_deref()),
        Commands::Outline { story } => commands::outline::run(story.as_deref()),
        Commands::Play { story, player } => {
            commands::play::run(story.as_deref(), player.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
