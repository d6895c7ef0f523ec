//! Presentation state machine for Fablepath stories.
//!
//! A [`Presenter`] walks a [`fp_story::Story`] from the cover screen through
//! character-by-character text reveal, choice or continue navigation, and
//! timed fade transitions. It is driven by two kinds of input: reader actions
//! (choosing a narration preference, activating a control) and the passage of
//! time, fed in through [`Presenter::advance`]. Rendering reads the derived
//! [`View`].
//!
//! All timed work goes through a [`Scheduler`] whose tasks are tagged with the
//! page visit they belong to, so work scheduled for one page can never touch
//! another.

/// Presenter timing and text configuration.
pub mod config;
/// Navigation controls offered to the reader.
pub mod control;
/// Error types for the presenter and narration.
pub mod error;
/// Narration playback ownership.
pub mod narration;
/// The state machine driver.
pub mod presenter;
/// Cancellable, visit-scoped timers.
pub mod schedule;
/// Secondary text computation.
pub mod secondary;
/// Presentation states and page visits.
pub mod state;
/// Render model derived from the current state.
pub mod view;

pub use config::PresenterConfig;
pub use control::{Control, navigation_for};
pub use error::{NarrationError, PresentError, PresentResult};
pub use narration::{NarrationPreference, NarrationSlot, Narrator, NullNarrator, Playback};
pub use presenter::Presenter;
pub use schedule::{Scheduler, Task, VisitId};
pub use secondary::secondary_text;
pub use state::{Destination, PageVisit, PresentationState};
pub use view::{CoverView, PageView, UnknownPageView, View};
