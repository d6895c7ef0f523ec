use std::path::Path;

use colored::Colorize;

pub fn run(story: Option<&Path>) -> Result<(), String> {
    let story = super::load_story(story)?;

    println!(
        "  {} for '{}'.",
        "All checks passed".green().bold(),
        story.title
    );
    println!(
        "  {} pages, {} choices",
        story.page_count(),
        story.choice_count()
    );

    Ok(())
}
