//! The ordered page collection.

use serde::{Deserialize, Serialize};

use crate::error::{StoryError, StoryResult};
use crate::page::{Page, PageId};

const SAMPLE_STORY: &str = include_str!("../stories/forest.json");

/// An immutable, ordered list of pages plus cover metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Title shown on the cover screen.
    #[serde(default = "default_title")]
    pub title: String,
    /// Cover background image reference.
    #[serde(default, rename = "cover")]
    pub cover_image: String,
    /// Pages in ascending id order.
    pub pages: Vec<Page>,
}

fn default_title() -> String {
    "Untitled Story".to_string()
}

impl Story {
    /// Create an empty story.
    pub fn new(title: impl Into<String>, cover_image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            cover_image: cover_image.into(),
            pages: Vec::new(),
        }
    }

    /// Append a page.
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// The built-in forest story as JSON text.
    pub fn sample_json() -> &'static str {
        SAMPLE_STORY
    }

    /// Parse a story from JSON text.
    pub fn from_json(source: &str) -> StoryResult<Self> {
        let story: Story = serde_json::from_str(source).map_err(StoryError::Parse)?;
        tracing::debug!(title = %story.title, pages = story.pages.len(), "parsed story");
        Ok(story)
    }

    /// Serialize the story as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> StoryResult<String> {
        serde_json::to_string_pretty(self).map_err(StoryError::Serialize)
    }

    /// Look up a page by id.
    pub fn find(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// The first page in list order.
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// The first page in list order whose id is strictly greater than `id`.
    pub fn next_after(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id > id)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of choices across all pages.
    pub fn choice_count(&self) -> usize {
        self.pages.iter().map(|p| p.choices().len()).sum()
    }

    /// Whether the story has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
