//! Navigation controls.

use std::fmt;

use fp_story::{Page, PageId, Story};

/// A navigation control offered once a page is fully revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Take the choice at `index` (0-based) to `target`.
    Choice {
        /// Position in the page's choice list.
        index: usize,
        /// Page the choice leads to.
        target: PageId,
    },
    /// Continue to the next page by ascending id.
    Continue {
        /// The next page.
        target: PageId,
    },
    /// Return to the cover screen.
    StartOver,
}

impl Control {
    /// Short label for the control: the 1-based choice number, an arrow, or a
    /// loop sign.
    pub fn label(&self) -> String {
        match self {
            Control::Choice { index, .. } => (index + 1).to_string(),
            Control::Continue { .. } => "\u{2192}".to_string(),
            Control::StartOver => "\u{21ba}".to_string(),
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Choice { index, target } => write!(f, "choice {} (page {target})", index + 1),
            Control::Continue { target } => write!(f, "continue (page {target})"),
            Control::StartOver => write!(f, "start over"),
        }
    }
}

/// The controls a fully revealed `page` offers.
///
/// A page with choices offers one control per choice, in order. Otherwise it
/// continues to the next page by ascending id, or starts over when it is the
/// last page.
pub fn navigation_for(story: &Story, page: &Page) -> Vec<Control> {
    if page.has_choices() {
        page.choices()
            .iter()
            .enumerate()
            .map(|(index, c)| Control::Choice {
                index,
                target: c.next_page_id,
            })
            .collect()
    } else if let Some(next) = story.next_after(page.id) {
        vec![Control::Continue { target: next.id }]
    } else {
        vec![Control::StartOver]
    }
}
