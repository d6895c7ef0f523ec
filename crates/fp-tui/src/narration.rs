//! Narration through an external audio player.
//!
//! The clip reference is handed to a player program (for example `mpv
//! --no-video` or `afplay`) as its last argument. Pausing kills the player.

use std::process::{Child, Command, Stdio};

use fp_present::{NarrationError, Narrator, Playback};

/// Starts one player process per clip.
#[derive(Debug, Clone)]
pub struct CommandNarrator {
    program: String,
    args: Vec<String>,
}

impl CommandNarrator {
    /// Build from a command line such as `"mpv --no-video --really-quiet"`.
    /// Returns `None` for a blank command line.
    pub fn parse(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words.next()?;
        Some(Self {
            program,
            args: words.collect(),
        })
    }

    /// The player program.
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Narrator for CommandNarrator {
    fn start(&mut self, clip: &str) -> Result<Box<dyn Playback>, NarrationError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(clip)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| NarrationError::Spawn {
                clip: clip.to_string(),
                source,
            })?;
        tracing::debug!(program = %self.program, clip, pid = child.id(), "narration started");
        Ok(Box::new(ChildPlayback { child }))
    }
}

/// A running player process.
#[derive(Debug)]
struct ChildPlayback {
    child: Child,
}

impl Playback for ChildPlayback {
    fn pause(&mut self) {
        // The player may already have exited on its own.
        if let Ok(Some(_)) = self.child.try_wait() {
            return;
        }
        if let Err(err) = self.child.kill() {
            tracing::debug!(error = %err, "narration player already gone");
        }
        if let Err(err) = self.child.wait() {
            tracing::warn!(error = %err, "failed to reap narration player");
        }
    }
}
