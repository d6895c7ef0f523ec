//! Launch the fablepath-tui standalone binary.

use std::path::Path;

/// Check the story, then hand it to the fablepath-tui binary.
pub fn run(story: Option<&Path>, player: Option<&str>) -> Result<(), String> {
    super::load_story(story)?;

    let mut command = std::process::Command::new("fablepath-tui");
    if let Some(path) = story {
        command.arg("--story").arg(path);
    }
    if let Some(player) = player {
        command.arg("--player").arg(player);
    }

    match command.status() {
        Ok(s) if s.success() => Ok(()),
        Ok(s) => Err(format!("fablepath-tui exited with {s}")),
        Err(_) => Err(
            "fablepath-tui binary not found. Install with: cargo install --path crates/fp-tui"
                .into(),
        ),
    }
}
