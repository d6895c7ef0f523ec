//! Story data for Fablepath: pages, choices, and the ordered story they form.
//!
//! A [`Story`] is static content. This crate loads it from JSON, checks it for
//! structural problems, and renders parse failures as located diagnostics. It
//! holds no presentation state; see `fp-present` for the state machine that
//! walks a story.

/// Loading a story together with its diagnostics.
pub mod check;
/// Located diagnostics for story files.
pub mod diagnostics;
/// Error types used throughout the crate.
pub mod error;
/// Page, choice, and page identifier types.
pub mod page;
/// The ordered page collection and its lookups.
pub mod story;
/// Structural checks over a loaded story.
pub mod validate;

/// Re-export the load-and-check entry points.
pub use check::{CheckResult, check_file, check_path_or_sample, check_source};
/// Re-export error types.
pub use error::{StoryError, StoryResult};
/// Re-export page types.
pub use page::{Choice, Page, PageId};
/// Re-export the story model.
pub use story::Story;
/// Re-export validation entry points.
pub use validate::{ValidationIssue, validate_story};
