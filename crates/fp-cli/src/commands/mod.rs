pub mod check;
pub mod init;
pub mod outline;
pub mod play;

use std::path::Path;

use colored::Colorize;
use fp_story::{CheckResult, Story, check_path_or_sample};

/// Load and validate a story file, or the bundled sample when `path` is
/// `None`, and print diagnostics. Returns the story if there are no errors.
fn load_story(path: Option<&Path>) -> Result<Story, String> {
    let result = check_path_or_sample(path).map_err(|e| e.to_string())?;
    print_diagnostics(&result);

    if result.story.is_none() {
        return Err("story failed to load".into());
    }
    let filename = result.filename.clone();
    result
        .into_story()
        .ok_or_else(|| format!("{filename} has errors"))
}

/// Print diagnostics to stderr using ariadne, followed by totals.
fn print_diagnostics(result: &CheckResult) {
    if result.diagnostics.is_empty() {
        return;
    }

    eprint!("{}", result.render());

    let errors = result.error_count();
    let warnings = result.warning_count();
    let warning_text = format!(
        "{} warning{}",
        warnings,
        if warnings == 1 { "" } else { "s" }
    );

    if errors > 0 {
        let error_text = format!("{} error{}", errors, if errors == 1 { "" } else { "s" });
        eprintln!("  {}, {}", error_text.red().bold(), warning_text);
    } else if warnings > 0 {
        eprintln!("  {}", warning_text.yellow());
    }
}
