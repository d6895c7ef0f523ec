use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use fp_present::{Control, navigation_for};
use fp_story::{Page, Story};

const EXCERPT_CHARS: usize = 48;

pub fn run(story: Option<&Path>) -> Result<(), String> {
    let story = super::load_story(story)?;

    println!("  {}", story.title);
    println!();

    if story.is_empty() {
        println!("  No pages.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Text", "Narration", "Navigation"]);

    for page in &story.pages {
        let narration = page.audio.clone().unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            page.id.to_string(),
            excerpt(&page.text),
            narration,
            navigation(&story, page),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} pages, {} choices",
        story.page_count(),
        story.choice_count()
    );

    Ok(())
}

/// The first few words of a page, cut on a character boundary.
fn excerpt(text: &str) -> String {
    if text.is_empty() {
        return "—".to_string();
    }
    if text.chars().count() > EXCERPT_CHARS {
        let cut: String = text.chars().take(EXCERPT_CHARS - 3).collect();
        format!("{}...", cut.trim_end())
    } else {
        text.to_string()
    }
}

/// One line per control, flagging targets that do not exist.
fn navigation(story: &Story, page: &Page) -> String {
    navigation_for(story, page)
        .iter()
        .map(|control| match control {
            Control::Choice { target, .. } | Control::Continue { target }
                if story.find(*target).is_none() =>
            {
                format!("{control} (missing)")
            }
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
