//! Render model.
//!
//! A [`View`] is everything a front end needs to draw one frame. It is
//! derived from the presenter's state on demand and holds no state of its
//! own, so drawing as often as the host likes has no side effects.

use fp_story::PageId;

use crate::control::Control;
use crate::narration::NarrationPreference;

/// What to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// The cover screen.
    Cover(CoverView),
    /// A story page.
    Page(PageView),
    /// Fallback for a page id that resolves to nothing.
    UnknownPage(UnknownPageView),
}

impl View {
    /// Navigation controls currently offered.
    pub fn controls(&self) -> &[Control] {
        match self {
            View::Cover(_) => &[],
            View::Page(page) => &page.controls,
            View::UnknownPage(unknown) => &unknown.controls,
        }
    }

    /// Black overlay opacity in `[0, 1]`.
    pub fn overlay(&self) -> f32 {
        match self {
            View::Cover(_) => 0.0,
            View::Page(page) => page.overlay,
            View::UnknownPage(unknown) => unknown.overlay,
        }
    }
}

/// The cover screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverView {
    /// Story title.
    pub title: String,
    /// Cover background image reference.
    pub image: String,
    /// Question put to the reader.
    pub prompt: String,
    /// The narration options, in display order.
    pub options: [NarrationPreference; 2],
}

/// A story page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Page id.
    pub page: PageId,
    /// Background image reference.
    pub image: String,
    /// Revealed part of the primary text.
    pub primary: String,
    /// Whether the primary text is fully shown.
    pub primary_complete: bool,
    /// Revealed part of the secondary text. `None` until the primary text is
    /// complete.
    pub secondary: Option<String>,
    /// Whether the secondary text is fully shown.
    pub secondary_complete: bool,
    /// Navigation controls; empty until the page is ready.
    pub controls: Vec<Control>,
    /// Black overlay opacity in `[0, 1]`.
    pub overlay: f32,
    /// Whether a narration clip is playing.
    pub narrating: bool,
    /// Whether reader input is accepted.
    pub inputs_enabled: bool,
}

/// Fallback for a missing page.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownPageView {
    /// The id that failed to resolve.
    pub page: PageId,
    /// Navigation controls; only "start over".
    pub controls: Vec<Control>,
    /// Black overlay opacity in `[0, 1]`.
    pub overlay: f32,
}
