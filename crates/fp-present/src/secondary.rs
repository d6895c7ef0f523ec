//! The lower text region of a page.

use fp_story::Page;

/// Compute the secondary text for `page`.
///
/// Explicit choices win over ascending-id continuation:
/// - one choice: its text, unprefixed;
/// - several choices: `"{n}) {text}"` lines, numbered from 1 in list order;
/// - no choices and a later page: that page's full text, as a preview;
/// - otherwise: `terminal_prompt`.
pub fn secondary_text(page: &Page, next: Option<&Page>, terminal_prompt: &str) -> String {
    match page.choices() {
        [] => match next {
            Some(next) => next.text.clone(),
            None => terminal_prompt.to_string(),
        },
        [only] => only.text.clone(),
        choices => choices
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}) {}", i + 1, c.text))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// The first `count` characters of `text`.
pub fn revealed(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}
