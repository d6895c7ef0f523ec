//! Standalone TUI binary for Fablepath.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fp_present::{Presenter, PresenterConfig};
use fp_story::{Story, check_path_or_sample};
use fp_tui::narration::CommandNarrator;

#[derive(Parser)]
#[command(
    name = "fablepath-tui",
    about = "Present a Fablepath story in the terminal",
    version
)]
struct Args {
    /// Story file (JSON). Plays the bundled sample when omitted.
    #[arg(long)]
    story: Option<PathBuf>,

    /// Milliseconds between revealed characters
    #[arg(long, default_value = "20")]
    reveal_ms: u64,

    /// Milliseconds a fade to black takes
    #[arg(long, default_value = "500")]
    fade_ms: u64,

    /// Audio player command for narration, e.g. "mpv --no-video --really-quiet"
    #[arg(long)]
    player: Option<String>,

    /// Write logs to this file (the terminal is busy with the story)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path)
    {
        eprintln!("error: {e}");
        process::exit(1);
    }

    let story = match load_story(args.story.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let config = PresenterConfig::new()
        .with_reveal_interval(Duration::from_millis(args.reveal_ms))
        .with_fade_duration(Duration::from_millis(args.fade_ms));
    let mut presenter = Presenter::new(story, config);
    if let Some(narrator) = args.player.as_deref().and_then(CommandNarrator::parse) {
        tracing::info!(player = narrator.program(), "narration enabled");
        presenter = presenter.with_narrator(narrator);
    }

    let app = fp_tui::app::TuiApp::new(presenter);

    if let Err(e) = fp_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Send logs to `path` without ANSI colours.
fn init_logging(path: &Path) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("cannot create log file {}: {e}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Load and check a story, printing any diagnostics.
fn load_story(path: Option<&Path>) -> Result<Story, String> {
    let result = check_path_or_sample(path).map_err(|e| e.to_string())?;
    eprint!("{}", result.render());
    if result.has_errors() {
        eprintln!(
            "  {} error(s), {} warning(s)",
            result.error_count(),
            result.warning_count()
        );
    }
    result
        .into_story()
        .ok_or_else(|| "story has errors".to_string())
}
