//! Narration playback.
//!
//! A page visit owns at most one playback handle, held in a
//! [`NarrationSlot`]. The slot pauses and drops the handle when the page is
//! left, when a new clip starts, and when the slot itself is dropped.

use crate::error::NarrationError;

/// How the reader chose to experience the story on the cover screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationPreference {
    /// Play each page's narration clip.
    Voice,
    /// Read silently.
    Silent,
}

impl NarrationPreference {
    /// Both options, in cover screen order.
    pub const ALL: [NarrationPreference; 2] =
        [NarrationPreference::Voice, NarrationPreference::Silent];

    /// Cover screen label.
    pub fn label(self) -> &'static str {
        match self {
            NarrationPreference::Voice => "Read to me",
            NarrationPreference::Silent => "I'll read myself",
        }
    }

    /// Whether clips should be played.
    pub fn wants_voice(self) -> bool {
        self == NarrationPreference::Voice
    }
}

/// Something that can start playing a narration clip.
pub trait Narrator {
    /// Start playing `clip`, returning a handle that stops it.
    fn start(&mut self, clip: &str) -> Result<Box<dyn Playback>, NarrationError>;
}

/// A clip that is playing.
pub trait Playback {
    /// Stop playback. Called exactly once, before the handle is dropped.
    fn pause(&mut self);
}

/// Narrator with no output device. Playback "starts" and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNarrator;

struct NullPlayback;

impl Playback for NullPlayback {
    fn pause(&mut self) {}
}

impl Narrator for NullNarrator {
    fn start(&mut self, clip: &str) -> Result<Box<dyn Playback>, NarrationError> {
        tracing::debug!(clip, "narration requested with no output device");
        Ok(Box::new(NullPlayback))
    }
}

/// Owner of the single active playback handle.
#[derive(Default)]
pub struct NarrationSlot {
    handle: Option<Box<dyn Playback>>,
}

impl std::fmt::Debug for NarrationSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrationSlot")
            .field("active", &self.is_active())
            .finish()
    }
}

impl NarrationSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Release any current handle, then start `clip` on `narrator`.
    pub fn start(&mut self, narrator: &mut dyn Narrator, clip: &str) -> Result<(), NarrationError> {
        self.release();
        self.handle = Some(narrator.start(clip)?);
        Ok(())
    }

    /// Pause and drop the current handle, if any.
    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.pause();
        }
    }

    /// Whether a clip is playing.
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for NarrationSlot {
    fn drop(&mut self) {
        self.release();
    }
}
