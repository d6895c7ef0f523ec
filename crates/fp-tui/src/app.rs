//! Application state: the presenter plus terminal-only bookkeeping.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use fp_present::{Control, NarrationPreference, PresentResult, Presenter, View};

/// Redraw interval while something is moving on screen.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// Longest wait for input when nothing is moving.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Main application state for the terminal presenter.
pub struct TuiApp {
    /// The state machine being presented.
    pub presenter: Presenter,
    /// Whether to show the help popup.
    pub show_help: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Screen areas of the navigation buttons from the last draw.
    pub control_areas: Vec<(Rect, Control)>,
    /// Screen areas of the cover options from the last draw.
    pub cover_areas: Vec<(Rect, NarrationPreference)>,
    started: Instant,
}

impl TuiApp {
    /// Create a new app around a presenter. The session clock starts now.
    pub fn new(presenter: Presenter) -> Self {
        Self {
            presenter,
            show_help: false,
            should_quit: false,
            control_areas: Vec::new(),
            cover_areas: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Bring the presenter up to the current instant.
    pub fn tick(&mut self) {
        let now = self.elapsed();
        self.presenter.advance(now);
    }

    /// How long the event loop may wait for input before the next redraw.
    pub fn poll_timeout(&self) -> Duration {
        let cap = if self.presenter.is_animating() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        let now = self.presenter.now().max(self.elapsed());
        self.presenter
            .next_deadline()
            .map_or(cap, |due| due.saturating_sub(now).min(cap))
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        self.tick();
        let result = match self.presenter.view() {
            View::Cover(_) => match key.code {
                KeyCode::Char('v') | KeyCode::Char('1') => {
                    self.presenter.choose_narration(NarrationPreference::Voice)
                }
                KeyCode::Char('s') | KeyCode::Char('2') => {
                    self.presenter.choose_narration(NarrationPreference::Silent)
                }
                _ => Ok(()),
            },
            view => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                    let index = c as usize - '1' as usize;
                    self.presenter.select_choice(index)
                }
                KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ') => {
                    self.activate_only_control(view.controls())
                }
                KeyCode::Char('r') => self.presenter.start_over(),
                _ => Ok(()),
            },
        };

        if let Err(err) = result {
            tracing::debug!(key = ?key.code, error = %err, "input ignored");
        }
    }

    /// Handle mouse input: a left click on a button activates it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) || self.show_help {
            return;
        }
        self.tick();

        let preference = hit_test(&self.cover_areas, mouse.column, mouse.row);
        let control = hit_test(&self.control_areas, mouse.column, mouse.row);

        let result = match (preference, control) {
            (Some(preference), _) => self.presenter.choose_narration(preference),
            (None, Some(control)) => self.presenter.activate(control),
            (None, None) => Ok(()),
        };
        if let Err(err) = result {
            tracing::debug!(error = %err, "click ignored");
        }
    }

    /// Enter and friends act when there is exactly one way forward.
    fn activate_only_control(&mut self, controls: &[Control]) -> PresentResult<()> {
        match controls {
            [only] => self.presenter.activate(*only),
            _ => Ok(()),
        }
    }
}

/// Find the item whose area contains the cell at `col`, `row`.
fn hit_test<T: Copy>(areas: &[(Rect, T)], col: u16, row: u16) -> Option<T> {
    areas
        .iter()
        .find(|(r, _)| col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height)
        .map(|(_, item)| *item)
}
