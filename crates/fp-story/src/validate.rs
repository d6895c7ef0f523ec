//! Structural validation of a loaded story.
//!
//! The presenter tolerates dangling references and shows a fallback page for
//! them, so those are reported as warnings. Problems that break page ordering
//! or the cover sentinel are errors.

use std::collections::HashSet;
use std::fmt;

use crate::page::{Page, PageId};
use crate::story::Story;

/// A warning or error found during story validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The page the issue was found on, or `None` for story-wide issues.
    pub page: Option<PageId>,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(page: Option<PageId>, message: impl Into<String>) -> Self {
        Self {
            page,
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(page: Option<PageId>, message: impl Into<String>) -> Self {
        Self {
            page,
            message: message.into(),
            is_error: false,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        match self.page {
            Some(id) => write!(f, "{level}: page {id}: {}", self.message),
            None => write!(f, "{level}: story: {}", self.message),
        }
    }
}

/// Validate a story.
///
/// Returns every issue found; an empty list means the story is clean.
pub fn validate_story(story: &Story) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if story.is_empty() {
        issues.push(ValidationIssue::error(None, "story has no pages"));
        return issues;
    }

    validate_ordering(story, &mut issues);

    for page in &story.pages {
        validate_page(story, page, &mut issues);
    }

    validate_reachability(story, &mut issues);

    issues
}

/// Ids must be positive and strictly increasing in list order.
fn validate_ordering(story: &Story, issues: &mut Vec<ValidationIssue>) {
    let mut previous: Option<PageId> = None;
    for page in &story.pages {
        if page.id.is_cover() {
            issues.push(ValidationIssue::error(
                Some(page.id),
                "page id 0 is reserved for the cover screen",
            ));
        }
        if let Some(prev) = previous
            && page.id <= prev
        {
            issues.push(ValidationIssue::error(
                Some(page.id),
                format!("page ids must be strictly increasing (follows page {prev})"),
            ));
        }
        previous = Some(page.id);
    }
}

fn validate_page(story: &Story, page: &Page, issues: &mut Vec<ValidationIssue>) {
    if page.text.is_empty() {
        issues.push(ValidationIssue::warning(Some(page.id), "page text is empty"));
    }

    if page.choices.as_ref().is_some_and(|c| c.is_empty()) {
        issues.push(ValidationIssue::error(
            Some(page.id),
            "choices list is present but empty",
        ));
    }

    for (index, choice) in page.choices().iter().enumerate() {
        if story.find(choice.next_page_id).is_none() {
            issues.push(ValidationIssue::warning(
                Some(page.id),
                format!(
                    "choice {} ('{}') leads to unknown page {}",
                    index + 1,
                    choice.text,
                    choice.next_page_id
                ),
            ));
        }
    }
}

/// Walk the story from its first page the way a reader can.
fn validate_reachability(story: &Story, issues: &mut Vec<ValidationIssue>) {
    let Some(first) = story.first_page() else {
        return;
    };

    let mut seen: HashSet<PageId> = HashSet::new();
    let mut stack = vec![first.id];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let Some(page) = story.find(id) else {
            continue;
        };
        if page.has_choices() {
            stack.extend(page.choices().iter().map(|c| c.next_page_id));
        } else if let Some(next) = story.next_after(page.id) {
            stack.push(next.id);
        }
    }

    for page in &story.pages {
        if !seen.contains(&page.id) {
            issues.push(ValidationIssue::warning(
                Some(page.id),
                "page is unreachable from the first page",
            ));
        }
    }
}
