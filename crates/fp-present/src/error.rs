//! Error types for the presenter.

use thiserror::Error;

/// Result type for presenter operations.
pub type PresentResult<T> = Result<T, PresentError>;

/// Reader input the presenter refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentError {
    /// The story has no pages to start on.
    #[error("the story has no pages")]
    EmptyStory,

    /// Narration can only be chosen on the cover screen.
    #[error("narration preference can only be chosen on the cover")]
    NotOnCover,

    /// Navigation is only possible once the page is fully revealed.
    #[error("page is not ready for navigation")]
    NotReady,

    /// The page has no choice with this index.
    #[error("no such choice: {0}")]
    NoSuchChoice(usize),

    /// The control is not offered in the current state.
    #[error("control not available: {0}")]
    Unavailable(String),
}

/// Errors starting narration playback.
#[derive(Debug, Error)]
pub enum NarrationError {
    /// The player process could not be started.
    #[error("cannot start narration for {clip}: {source}")]
    Spawn {
        /// Clip reference.
        clip: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// No playback device is available.
    #[error("narration unavailable: {0}")]
    Unavailable(String),
}
