use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a page. Ids are positive and strictly increasing across a
/// story, so the id also orders pages for "continue" navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u32);

impl PageId {
    /// Sentinel for the cover screen. Never the id of a real page.
    pub const COVER: PageId = PageId(0);

    /// Returns true for the cover sentinel.
    pub fn is_cover(self) -> bool {
        self == Self::COVER
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single navigation choice on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// The text shown to the reader.
    pub text: String,
    /// Page to go to when this choice is taken. Not checked on load.
    pub next_page_id: PageId,
}

impl Choice {
    /// Create a new choice leading to `next_page_id`.
    pub fn new(text: impl Into<String>, next_page_id: u32) -> Self {
        Self {
            text: text.into(),
            next_page_id: PageId(next_page_id),
        }
    }
}

/// One narrative unit: background art, text, optional narration and choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Unique, ascending page id.
    pub id: PageId,
    /// Background image reference.
    pub image: String,
    /// Primary text, revealed one character at a time.
    pub text: String,
    /// Narration clip reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// Navigation choices. When absent, the reader continues to the next
    /// page by ascending id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
}

impl Page {
    /// Create a page without narration or choices.
    pub fn new(id: u32, image: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: PageId(id),
            image: image.into(),
            text: text.into(),
            audio: None,
            choices: None,
        }
    }

    /// Set the narration clip.
    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.get_or_insert_with(Vec::new).push(choice);
        self
    }

    /// The page's choices. An absent list and an empty list both read as no
    /// choices.
    pub fn choices(&self) -> &[Choice] {
        self.choices.as_deref().unwrap_or(&[])
    }

    /// Whether the page offers explicit choices.
    pub fn has_choices(&self) -> bool {
        !self.choices().is_empty()
    }

    /// Length of the primary text in characters.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}
