//! Terminal presenter for Fablepath stories.
//!
//! Drives an [`fp_present::Presenter`] from a crossterm event loop and draws
//! its view with ratatui: a tinted background standing in for the page art,
//! the revealed text boxes, navigation buttons, and a fading black overlay.

/// Application state and input handling.
pub mod app;
/// Narration through an external player process.
pub mod narration;
/// Drawing the presenter's view.
pub mod render;
/// Layout helpers and popups.
pub mod shared;
/// Terminal setup, teardown, and the event loop.
pub mod terminal;
