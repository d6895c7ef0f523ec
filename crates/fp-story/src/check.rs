//! Loading a story together with everything wrong with it.

use std::path::Path;

use crate::diagnostics::{Diagnostic, Severity, render_diagnostics};
use crate::error::{StoryError, StoryResult};
use crate::story::Story;
use crate::validate::validate_story;

/// Name used in diagnostics for the built-in story.
pub const SAMPLE_NAME: &str = "<sample>";

/// The result of parsing and validating a story source.
#[derive(Debug)]
pub struct CheckResult {
    /// The parsed story, or `None` when the source is not a valid story file.
    pub story: Option<Story>,
    /// Parse failures and validation issues, in the order found.
    pub diagnostics: Vec<Diagnostic>,
    /// The source text the diagnostics point into.
    pub source: String,
    /// Name of the source in rendered output.
    pub filename: String,
}

impl CheckResult {
    /// Whether the story cannot be presented.
    pub fn has_errors(&self) -> bool {
        self.story.is_none() || self.error_count() > 0
    }

    /// Number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Render every diagnostic with ariadne. Empty when the story is clean.
    pub fn render(&self) -> String {
        render_diagnostics(&self.source, &self.filename, &self.diagnostics)
    }

    /// The story, if it parsed and has no errors.
    pub fn into_story(self) -> Option<Story> {
        if self.has_errors() { None } else { self.story }
    }
}

/// Parse and validate story JSON.
pub fn check_source(source: impl Into<String>, filename: impl Into<String>) -> CheckResult {
    let source = source.into();
    let filename = filename.into();

    let (story, diagnostics) = match Story::from_json(&source) {
        Ok(story) => {
            let diagnostics = validate_story(&story).iter().map(Diagnostic::from).collect();
            (Some(story), diagnostics)
        }
        Err(err) => (None, vec![Diagnostic::from_story_error(&source, &err)]),
    };

    tracing::debug!(
        file = %filename,
        diagnostics = diagnostics.len(),
        parsed = story.is_some(),
        "checked story"
    );
    CheckResult {
        story,
        diagnostics,
        source,
        filename,
    }
}

/// Read, parse and validate a story file.
///
/// Only an unreadable file is an `Err`; everything else is reported in the
/// returned diagnostics.
pub fn check_file(path: &Path) -> StoryResult<CheckResult> {
    let source = std::fs::read_to_string(path).map_err(|source| StoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(check_source(source, path.display().to_string()))
}

/// Check `path`, or the built-in story when `path` is `None`.
pub fn check_path_or_sample(path: Option<&Path>) -> StoryResult<CheckResult> {
    match path {
        Some(path) => check_file(path),
        None => Ok(check_source(Story::sample_json(), SAMPLE_NAME)),
    }
}
