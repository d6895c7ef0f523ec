//! Presenter configuration.

use std::time::Duration;

/// Default delay between revealed characters.
pub const DEFAULT_REVEAL_INTERVAL: Duration = Duration::from_millis(20);
/// Default length of the fade to black between pages.
pub const DEFAULT_FADE_DURATION: Duration = Duration::from_millis(500);
/// Default secondary text on a page with nowhere left to go.
pub const DEFAULT_TERMINAL_PROMPT: &str = "The end of your journey awaits...";
/// Default question asked on the cover screen.
pub const DEFAULT_COVER_PROMPT: &str = "How would you like to experience the story?";

/// Timing and fixed text used by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterConfig {
    /// Delay between revealed characters. Exactly one character per tick.
    pub reveal_interval: Duration,
    /// Length of the fade to black before a page change. Also used for the
    /// fade in after a page is entered.
    pub fade_duration: Duration,
    /// Secondary text for a page with no choices and no later page.
    pub terminal_prompt: String,
    /// Question shown on the cover screen.
    pub cover_prompt: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            reveal_interval: DEFAULT_REVEAL_INTERVAL,
            fade_duration: DEFAULT_FADE_DURATION,
            terminal_prompt: DEFAULT_TERMINAL_PROMPT.to_string(),
            cover_prompt: DEFAULT_COVER_PROMPT.to_string(),
        }
    }
}

impl PresenterConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reveal interval. A zero interval is raised to one millisecond
    /// so reveal always advances through the scheduler.
    pub fn with_reveal_interval(mut self, interval: Duration) -> Self {
        self.reveal_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Set the fade duration.
    pub fn with_fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    /// Set the terminal prompt.
    pub fn with_terminal_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.terminal_prompt = prompt.into();
        self
    }

    /// Set the cover prompt.
    pub fn with_cover_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.cover_prompt = prompt.into();
        self
    }
}
