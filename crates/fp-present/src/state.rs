//! Presentation states.

use std::time::Duration;

use fp_story::PageId;

use crate::narration::NarrationPreference;
use crate::schedule::VisitId;

/// One entry into a page.
///
/// Reveal progress lives here, so entering any page (even the same one again)
/// starts from a fresh visit with both indices at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageVisit {
    /// Unique id of this visit.
    pub id: VisitId,
    /// The page being shown.
    pub page: PageId,
    /// Narration preference carried through the session.
    pub preference: NarrationPreference,
    /// When the page was entered.
    pub entered_at: Duration,
    /// Characters of the primary text shown.
    pub primary_shown: usize,
    /// Characters of the secondary text shown.
    pub secondary_shown: usize,
}

impl PageVisit {
    /// Start a visit with nothing revealed.
    pub fn new(
        id: VisitId,
        page: PageId,
        preference: NarrationPreference,
        entered_at: Duration,
    ) -> Self {
        Self {
            id,
            page,
            preference,
            entered_at,
            primary_shown: 0,
            secondary_shown: 0,
        }
    }
}

/// Where a transition leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Another page, keeping the narration preference.
    Page(PageId),
    /// Back to the cover, clearing the narration preference.
    Cover,
}

/// The presenter's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationState {
    /// Pre-story screen asking for a narration preference.
    Cover,
    /// Primary text is still growing.
    Revealing(PageVisit),
    /// Primary text complete; secondary text is growing.
    AwaitingSecondary(PageVisit),
    /// Everything revealed; navigation enabled.
    Ready(PageVisit),
    /// Fading to black; input disabled.
    Transitioning {
        /// The visit being left, still rendered under the fade.
        visit: PageVisit,
        /// Where the fade leads.
        destination: Destination,
        /// When the screen is fully black. A fade that starts while the page
        /// is still fading in ends sooner, rising from the current opacity.
        ends_at: Duration,
    },
    /// The current page id resolves to no page. Only "start over" is offered.
    Unknown(PageVisit),
}

impl PresentationState {
    /// The visit of the current page, if on one.
    pub fn visit(&self) -> Option<&PageVisit> {
        match self {
            PresentationState::Cover => None,
            PresentationState::Revealing(v)
            | PresentationState::AwaitingSecondary(v)
            | PresentationState::Ready(v)
            | PresentationState::Unknown(v)
            | PresentationState::Transitioning { visit: v, .. } => Some(v),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            PresentationState::Cover => "cover",
            PresentationState::Revealing(_) => "revealing",
            PresentationState::AwaitingSecondary(_) => "awaiting-secondary",
            PresentationState::Ready(_) => "ready",
            PresentationState::Transitioning { .. } => "transitioning",
            PresentationState::Unknown(_) => "unknown-page",
        }
    }
}
