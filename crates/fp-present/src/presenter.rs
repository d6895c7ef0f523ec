//! The presentation state machine.
//!
//! `Presenter` owns the only mutable presentation state, the scheduler, and
//! the narration slot. Every change goes through one of its transition
//! methods, and every exit from a page releases narration and cancels that
//! visit's pending tasks before anything else happens.

use std::time::Duration;

use fp_story::{Page, PageId, Story};

use crate::config::PresenterConfig;
use crate::control::{Control, navigation_for};
use crate::error::{PresentError, PresentResult};
use crate::narration::{NarrationPreference, NarrationSlot, Narrator, NullNarrator};
use crate::schedule::{Scheduled, Scheduler, Task, VisitId};
use crate::secondary::{revealed, secondary_text};
use crate::state::{Destination, PageVisit, PresentationState};
use crate::view::{CoverView, PageView, UnknownPageView, View};

/// Drives a story from the cover screen through pages and back.
///
/// Time is supplied by the caller through [`Presenter::advance`] as a
/// duration since the session began; the presenter never reads a clock.
pub struct Presenter {
    story: Story,
    config: PresenterConfig,
    state: PresentationState,
    scheduler: Scheduler,
    narration: NarrationSlot,
    narrator: Box<dyn Narrator>,
    last_visit: VisitId,
    now: Duration,
}

impl std::fmt::Debug for Presenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter")
            .field("story", &self.story.title)
            .field("state", &self.state)
            .field("pending", &self.scheduler.len())
            .field("narration", &self.narration)
            .field("now", &self.now)
            .finish()
    }
}

impl Presenter {
    /// Create a presenter on the cover screen with no narration device.
    pub fn new(story: Story, config: PresenterConfig) -> Self {
        Self {
            story,
            config,
            state: PresentationState::Cover,
            scheduler: Scheduler::new(),
            narration: NarrationSlot::new(),
            narrator: Box::new(NullNarrator),
            last_visit: VisitId(0),
            now: Duration::ZERO,
        }
    }

    /// Use `narrator` for narration playback.
    pub fn with_narrator(mut self, narrator: impl Narrator + 'static) -> Self {
        self.narrator = Box::new(narrator);
        self
    }

    /// The story being presented.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The configuration in use.
    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    /// The current state.
    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// The latest instant the presenter has been advanced to.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Id of the page shown, or [`PageId::COVER`] on the cover screen.
    pub fn current_page(&self) -> PageId {
        self.state.visit().map_or(PageId::COVER, |v| v.page)
    }

    /// Characters of the primary text shown.
    pub fn text_reveal_index(&self) -> usize {
        self.state.visit().map_or(0, |v| v.primary_shown)
    }

    /// Characters of the secondary text shown.
    pub fn bottom_text_reveal_index(&self) -> usize {
        self.state.visit().map_or(0, |v| v.secondary_shown)
    }

    /// Whether the secondary text region is visible.
    pub fn show_choices(&self) -> bool {
        self.state.visit().is_some_and(|v| {
            self.story
                .find(v.page)
                .is_some_and(|page| v.primary_shown >= page.text_len())
        })
    }

    /// Narration preference; `None` only on the cover screen.
    pub fn use_voice(&self) -> Option<NarrationPreference> {
        self.state.visit().map(|v| v.preference)
    }

    /// Whether a narration clip is playing.
    pub fn is_playing(&self) -> bool {
        self.narration.is_active()
    }

    /// Whether a fade transition is in progress.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, PresentationState::Transitioning { .. })
    }

    /// When the next scheduled task is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Whether the picture will change without reader input: a task is
    /// pending or the overlay is still fading.
    pub fn is_animating(&self) -> bool {
        self.next_deadline().is_some() || self.overlay() > 0.0
    }

    /// Leave the cover screen for the first page.
    pub fn choose_narration(&mut self, preference: NarrationPreference) -> PresentResult<()> {
        if !matches!(self.state, PresentationState::Cover) {
            return Err(PresentError::NotOnCover);
        }
        let first = self
            .story
            .first_page()
            .map(|p| p.id)
            .ok_or(PresentError::EmptyStory)?;

        tracing::info!(?preference, "narration preference chosen");
        self.enter_page(first, preference);
        Ok(())
    }

    /// Run every task due at or before `now`, in order.
    ///
    /// Each task runs at its own due instant, so a late call catches up
    /// exactly as if it had been made on time.
    pub fn advance(&mut self, now: Duration) {
        while let Some(scheduled) = self.scheduler.pop_due(now) {
            self.now = self.now.max(scheduled.due);
            self.apply(scheduled);
        }
        self.now = self.now.max(now);
    }

    /// Navigation controls currently offered. Empty unless the page is ready.
    pub fn controls(&self) -> Vec<Control> {
        match &self.state {
            PresentationState::Ready(visit) => match self.story.find(visit.page) {
                Some(page) => navigation_for(&self.story, page),
                None => vec![Control::StartOver],
            },
            PresentationState::Unknown(_) => vec![Control::StartOver],
            _ => Vec::new(),
        }
    }

    /// Activate a navigation control, starting the fade to its destination.
    pub fn activate(&mut self, control: Control) -> PresentResult<()> {
        if !matches!(
            self.state,
            PresentationState::Ready(_) | PresentationState::Unknown(_)
        ) {
            return Err(PresentError::NotReady);
        }
        if !self.controls().contains(&control) {
            return Err(PresentError::Unavailable(control.to_string()));
        }

        let destination = match control {
            Control::Choice { target, .. } | Control::Continue { target } => {
                Destination::Page(target)
            }
            Control::StartOver => Destination::Cover,
        };
        self.begin_transition(destination);
        Ok(())
    }

    /// Take the choice at `index` (0-based).
    pub fn select_choice(&mut self, index: usize) -> PresentResult<()> {
        let control =
            self.find_control(|c| matches!(c, Control::Choice { index: i, .. } if *i == index))?;
        match control {
            Some(control) => self.activate(control),
            None => Err(PresentError::NoSuchChoice(index)),
        }
    }

    /// Continue to the next page by ascending id.
    pub fn continue_on(&mut self) -> PresentResult<()> {
        match self.find_control(|c| matches!(c, Control::Continue { .. }))? {
            Some(control) => self.activate(control),
            None => Err(PresentError::Unavailable("continue".to_string())),
        }
    }

    /// Return to the cover screen. Offered on terminal and unknown pages.
    pub fn start_over(&mut self) -> PresentResult<()> {
        match self.find_control(|c| matches!(c, Control::StartOver))? {
            Some(control) => self.activate(control),
            None => Err(PresentError::Unavailable("start over".to_string())),
        }
    }

    /// Derive the render model for the current instant.
    pub fn view(&self) -> View {
        let Some(visit) = self.state.visit() else {
            return View::Cover(CoverView {
                title: self.story.title.clone(),
                image: self.story.cover_image.clone(),
                prompt: self.config.cover_prompt.clone(),
                options: NarrationPreference::ALL,
            });
        };

        let overlay = self.overlay();
        let Some(page) = self.story.find(visit.page) else {
            return View::UnknownPage(UnknownPageView {
                page: visit.page,
                controls: self.controls(),
                overlay,
            });
        };

        let primary_complete = visit.primary_shown >= page.text_len();
        let (secondary, secondary_complete) = if primary_complete {
            let text = self.secondary_for(page);
            let complete = visit.secondary_shown >= text.chars().count();
            (
                Some(revealed(&text, visit.secondary_shown).to_string()),
                complete,
            )
        } else {
            (None, false)
        };

        View::Page(PageView {
            page: page.id,
            image: page.image.clone(),
            primary: revealed(&page.text, visit.primary_shown).to_string(),
            primary_complete,
            secondary,
            secondary_complete,
            controls: self.controls(),
            overlay,
            narrating: self.is_playing(),
            inputs_enabled: matches!(self.state, PresentationState::Ready(_)),
        })
    }

    fn find_control(&self, pred: impl Fn(&Control) -> bool) -> PresentResult<Option<Control>> {
        if !matches!(
            self.state,
            PresentationState::Ready(_) | PresentationState::Unknown(_)
        ) {
            return Err(PresentError::NotReady);
        }
        Ok(self.controls().into_iter().find(pred))
    }

    fn secondary_for(&self, page: &Page) -> String {
        secondary_text(
            page,
            self.story.next_after(page.id),
            &self.config.terminal_prompt,
        )
    }

    fn primary_len(&self, visit: &PageVisit) -> usize {
        self.story.find(visit.page).map_or(0, Page::text_len)
    }

    fn secondary_len(&self, visit: &PageVisit) -> usize {
        self.story
            .find(visit.page)
            .map_or(0, |page| self.secondary_for(page).chars().count())
    }

    fn reveal_interval(&self) -> Duration {
        self.config.reveal_interval.max(Duration::from_millis(1))
    }

    /// Black overlay opacity: rising while fading out, falling after entry.
    fn overlay(&self) -> f32 {
        let fade = self.config.fade_duration.as_secs_f32();
        match &self.state {
            PresentationState::Cover => 0.0,
            PresentationState::Transitioning { ends_at, .. } => {
                if fade <= 0.0 {
                    1.0
                } else {
                    let left = ends_at.saturating_sub(self.now).as_secs_f32();
                    1.0 - (left / fade).clamp(0.0, 1.0)
                }
            }
            state => state.visit().map_or(0.0, |visit| self.overlay_for(visit)),
        }
    }

    /// Fade-in opacity of a visit that is on screen.
    fn overlay_for(&self, visit: &PageVisit) -> f32 {
        let fade = self.config.fade_duration.as_secs_f32();
        if fade <= 0.0 {
            return 0.0;
        }
        let elapsed = self.now.saturating_sub(visit.entered_at).as_secs_f32();
        1.0 - (elapsed / fade).clamp(0.0, 1.0)
    }

    /// Start a fresh visit of `page`. Releases everything the previous visit
    /// held first.
    fn enter_page(&mut self, page: PageId, preference: NarrationPreference) {
        self.narration.release();
        self.scheduler.clear();
        self.last_visit = self.last_visit.next();
        let visit = PageVisit::new(self.last_visit, page, preference, self.now);

        let Some(found) = self.story.find(page) else {
            tracing::warn!(page = %page, visit = %visit.id, "page not found, showing fallback");
            self.state = PresentationState::Unknown(visit);
            return;
        };

        tracing::info!(page = %page, visit = %visit.id, "entering page");
        let clip = found
            .audio
            .as_deref()
            .filter(|_| preference.wants_voice());
        if let Some(clip) = clip
            && let Err(err) = self.narration.start(&mut *self.narrator, clip)
        {
            tracing::warn!(page = %page, error = %err, "narration failed to start");
        }

        self.state = PresentationState::Revealing(visit);
        self.settle();
    }

    /// Move through any phase whose text is already complete, then schedule
    /// the next reveal tick if something is still growing.
    fn settle(&mut self) {
        loop {
            let state = std::mem::replace(&mut self.state, PresentationState::Cover);
            let (state, growing) = match state {
                PresentationState::Revealing(visit) => {
                    if visit.primary_shown < self.primary_len(&visit) {
                        (PresentationState::Revealing(visit), true)
                    } else {
                        (PresentationState::AwaitingSecondary(visit), false)
                    }
                }
                PresentationState::AwaitingSecondary(visit) => {
                    if visit.secondary_shown < self.secondary_len(&visit) {
                        (PresentationState::AwaitingSecondary(visit), true)
                    } else {
                        tracing::debug!(page = %visit.page, "page ready");
                        self.state = PresentationState::Ready(visit);
                        return;
                    }
                }
                other => {
                    self.state = other;
                    return;
                }
            };

            let visit_id = state.visit().map(|v| v.id);
            self.state = state;
            if growing {
                if let Some(id) = visit_id {
                    let due = self.now + self.reveal_interval();
                    self.scheduler.schedule(due, id, Task::RevealTick);
                }
                return;
            }
        }
    }

    fn apply(&mut self, scheduled: Scheduled) {
        let current = self.state.visit().map(|v| v.id);
        if current != Some(scheduled.visit) {
            tracing::debug!(
                visit = %scheduled.visit,
                task = ?scheduled.task,
                "discarding stale task"
            );
            return;
        }

        match scheduled.task {
            Task::RevealTick => self.reveal_one(),
            Task::FadeComplete => self.finish_transition(),
        }
    }

    fn reveal_one(&mut self) {
        let Some(visit) = self.state.visit() else {
            return;
        };
        let primary_len = self.primary_len(visit);
        let secondary_len = self.secondary_len(visit);

        match &mut self.state {
            PresentationState::Revealing(v) => {
                v.primary_shown = (v.primary_shown + 1).min(primary_len);
            }
            PresentationState::AwaitingSecondary(v) => {
                v.secondary_shown = (v.secondary_shown + 1).min(secondary_len);
            }
            other => {
                tracing::debug!(state = other.name(), "reveal tick outside reveal");
                return;
            }
        }
        self.settle();
    }

    fn begin_transition(&mut self, destination: Destination) {
        let state = std::mem::replace(&mut self.state, PresentationState::Cover);
        match state {
            PresentationState::Ready(visit) | PresentationState::Unknown(visit) => {
                // Read before the state changes: the page may still be fading in.
                let shown = 1.0 - self.overlay_for(&visit);
                self.narration.release();
                self.scheduler.cancel_visit(visit.id);
                let due = self.now + self.config.fade_duration.mul_f32(shown);
                self.scheduler.schedule(due, visit.id, Task::FadeComplete);
                tracing::info!(from = %visit.page, ?destination, "fading out");
                self.state = PresentationState::Transitioning {
                    visit,
                    destination,
                    ends_at: due,
                };
            }
            other => self.state = other,
        }
    }

    fn finish_transition(&mut self) {
        let state = std::mem::replace(&mut self.state, PresentationState::Cover);
        match state {
            PresentationState::Transitioning {
                visit,
                destination: Destination::Page(next),
                ..
            } => self.enter_page(next, visit.preference),
            PresentationState::Transitioning {
                destination: Destination::Cover,
                ..
            } => {
                self.narration.release();
                self.scheduler.clear();
                tracing::info!("returned to cover");
            }
            other => self.state = other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrationError;
    use crate::narration::Playback;
    use fp_story::Choice;
    use std::cell::RefCell;
    use std::rc::Rc;

    const TICK: Duration = Duration::from_millis(10);
    const FADE: Duration = Duration::from_millis(100);

    #[derive(Default, Clone)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl Log {
        fn entries(&self) -> Vec<String> {
            self.0.borrow().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.0.borrow().iter().filter(|e| e.starts_with(prefix)).count()
        }
    }

    struct LogNarrator(Log);

    struct LogPlayback {
        clip: String,
        log: Log,
    }

    impl Narrator for LogNarrator {
        fn start(&mut self, clip: &str) -> Result<Box<dyn Playback>, NarrationError> {
            self.0.0.borrow_mut().push(format!("play {clip}"));
            Ok(Box::new(LogPlayback {
                clip: clip.to_string(),
                log: self.0.clone(),
            }))
        }
    }

    impl Playback for LogPlayback {
        fn pause(&mut self) {
            self.log.0.borrow_mut().push(format!("pause {}", self.clip));
        }
    }

    fn config() -> PresenterConfig {
        PresenterConfig::new()
            .with_reveal_interval(TICK)
            .with_fade_duration(FADE)
    }

    fn scenario_story() -> Story {
        Story::new("Scenario", "cover.png")
            .with_page(Page::new(1, "one.png", "A").with_choice(Choice::new("X", 2)))
            .with_page(Page::new(2, "two.png", "B"))
    }

    fn branching_story() -> Story {
        Story::new("Branches", "cover.png")
            .with_page(
                Page::new(1, "one.png", "Fork")
                    .with_audio("one.mp3")
                    .with_choice(Choice::new("Left", 2))
                    .with_choice(Choice::new("Right", 3)),
            )
            .with_page(Page::new(2, "two.png", "Mist").with_audio("two.mp3"))
            .with_page(Page::new(3, "three.png", "Moon"))
    }

    /// Advance far enough to finish whatever is pending.
    fn run_out(p: &mut Presenter) {
        let later = p.now() + Duration::from_secs(600);
        p.advance(later);
    }

    fn secondary(p: &Presenter) -> Option<String> {
        match p.view() {
            View::Page(page) => page.secondary,
            _ => None,
        }
    }

    #[test]
    fn two_page_scenario() {
        let mut p = Presenter::new(scenario_story(), config());
        assert_eq!(p.current_page(), PageId::COVER);
        assert_eq!(p.use_voice(), None);

        p.choose_narration(NarrationPreference::Silent).unwrap();
        assert_eq!(p.current_page(), PageId(1));
        assert_eq!(p.text_reveal_index(), 0);
        assert_eq!(p.bottom_text_reveal_index(), 0);
        assert!(!p.show_choices());

        run_out(&mut p);
        assert!(matches!(p.state(), PresentationState::Ready(_)));
        assert_eq!(secondary(&p).as_deref(), Some("X"));
        assert_eq!(
            p.controls(),
            vec![Control::Choice {
                index: 0,
                target: PageId(2)
            }]
        );

        p.select_choice(0).unwrap();
        assert!(p.is_transitioning());
        run_out(&mut p);

        assert_eq!(p.current_page(), PageId(2));
        assert_eq!(p.use_voice(), Some(NarrationPreference::Silent));
        assert_eq!(
            secondary(&p).as_deref(),
            Some("The end of your journey awaits...")
        );
        assert_eq!(p.controls(), vec![Control::StartOver]);
    }

    #[test]
    fn reveal_is_one_char_per_tick() {
        let story = Story::new("Reveal", "").with_page(Page::new(1, "", "Hello"));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();

        p.advance(Duration::from_millis(9));
        assert_eq!(p.text_reveal_index(), 0);
        p.advance(Duration::from_millis(10));
        assert_eq!(p.text_reveal_index(), 1);
        p.advance(Duration::from_millis(35));
        assert_eq!(p.text_reveal_index(), 3);

        match p.view() {
            View::Page(view) => {
                assert_eq!(view.primary, "Hel");
                assert!(!view.primary_complete);
                assert!(view.secondary.is_none());
                assert!(view.controls.is_empty());
            }
            other => panic!("expected page view, got {other:?}"),
        }
    }

    #[test]
    fn secondary_reveal_follows_primary() {
        let story = Story::new("Preview", "")
            .with_page(Page::new(1, "", "Ab"))
            .with_page(Page::new(2, "", "Cde"));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();

        p.advance(TICK * 2);
        assert!(matches!(p.state(), PresentationState::AwaitingSecondary(_)));
        assert!(p.show_choices());
        assert_eq!(secondary(&p).as_deref(), Some(""));

        p.advance(TICK * 4);
        assert_eq!(p.bottom_text_reveal_index(), 2);
        assert_eq!(secondary(&p).as_deref(), Some("Cd"));

        p.advance(TICK * 5);
        assert!(matches!(p.state(), PresentationState::Ready(_)));
        assert_eq!(p.controls(), vec![Control::Continue { target: PageId(2) }]);
        assert!(p.next_deadline().is_none());
    }

    #[test]
    fn late_advance_catches_up_exactly() {
        let story = Story::new("Late", "").with_page(Page::new(1, "", "abcdefghij"));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();

        p.advance(Duration::from_millis(75));
        assert_eq!(p.text_reveal_index(), 7);
        assert_eq!(p.now(), Duration::from_millis(75));
    }

    #[test]
    fn choose_narration_only_on_cover() {
        let mut p = Presenter::new(scenario_story(), config());
        p.choose_narration(NarrationPreference::Voice).unwrap();
        assert_eq!(
            p.choose_narration(NarrationPreference::Silent),
            Err(PresentError::NotOnCover)
        );
        assert_eq!(p.use_voice(), Some(NarrationPreference::Voice));
    }

    #[test]
    fn empty_story_stays_on_cover() {
        let mut p = Presenter::new(Story::new("Empty", ""), config());
        assert_eq!(
            p.choose_narration(NarrationPreference::Silent),
            Err(PresentError::EmptyStory)
        );
        assert!(matches!(p.view(), View::Cover(_)));
    }

    #[test]
    fn navigation_rejected_until_ready() {
        let mut p = Presenter::new(scenario_story(), config());
        assert_eq!(p.select_choice(0), Err(PresentError::NotReady));

        p.choose_narration(NarrationPreference::Silent).unwrap();
        assert_eq!(p.select_choice(0), Err(PresentError::NotReady));
        assert!(p.controls().is_empty());

        run_out(&mut p);
        assert_eq!(p.select_choice(5), Err(PresentError::NoSuchChoice(5)));
        assert!(matches!(p.continue_on(), Err(PresentError::Unavailable(_))));
        assert!(matches!(
            p.activate(Control::StartOver),
            Err(PresentError::Unavailable(_))
        ));

        p.select_choice(0).unwrap();
        assert_eq!(p.select_choice(0), Err(PresentError::NotReady));
        let view = p.view();
        assert!(view.controls().is_empty());
    }

    #[test]
    fn start_over_clears_preference() {
        let mut p = Presenter::new(scenario_story(), config());
        p.choose_narration(NarrationPreference::Voice).unwrap();
        run_out(&mut p);
        p.select_choice(0).unwrap();
        run_out(&mut p);
        assert_eq!(p.use_voice(), Some(NarrationPreference::Voice));

        p.start_over().unwrap();
        assert!(p.is_transitioning());
        assert_eq!(p.current_page(), PageId(2));
        run_out(&mut p);

        assert!(matches!(p.state(), PresentationState::Cover));
        assert_eq!(p.current_page(), PageId::COVER);
        assert_eq!(p.use_voice(), None);
        assert!(matches!(p.view(), View::Cover(_)));

        p.choose_narration(NarrationPreference::Silent).unwrap();
        assert_eq!(p.current_page(), PageId(1));
    }

    #[test]
    fn stale_tick_is_discarded() {
        let story = Story::new("Stale", "").with_page(Page::new(1, "", "abc"));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();

        let current = p.state().visit().map(|v| v.id).unwrap();
        let stale = VisitId(current.0 - 1);
        p.scheduler.schedule(Duration::from_millis(1), stale, Task::RevealTick);
        p.scheduler.schedule(Duration::from_millis(2), stale, Task::FadeComplete);

        p.advance(Duration::from_millis(5));
        assert_eq!(p.text_reveal_index(), 0);
        assert!(matches!(p.state(), PresentationState::Revealing(_)));
    }

    #[test]
    fn leaving_a_page_cancels_its_ticks() {
        let mut p = Presenter::new(scenario_story(), config());
        p.choose_narration(NarrationPreference::Silent).unwrap();
        run_out(&mut p);
        p.select_choice(0).unwrap();

        // Only the fade remains.
        assert_eq!(p.scheduler.len(), 1);
        assert_eq!(p.next_deadline(), Some(p.now() + FADE));
    }

    #[test]
    fn narration_plays_once_per_visit_and_pauses_on_exit() {
        let log = Log::default();
        let mut p = Presenter::new(branching_story(), config()).with_narrator(LogNarrator(log.clone()));
        p.choose_narration(NarrationPreference::Voice).unwrap();
        assert!(p.is_playing());

        for step in 1..=40 {
            p.advance(TICK * step);
            let _ = p.view();
            let _ = p.view();
        }
        assert_eq!(log.count("play"), 1);

        run_out(&mut p);
        p.select_choice(0).unwrap();
        assert!(!p.is_playing());
        assert_eq!(log.entries(), ["play one.mp3", "pause one.mp3"]);

        run_out(&mut p);
        assert_eq!(p.current_page(), PageId(2));
        assert!(p.is_playing());
        assert_eq!(
            log.entries(),
            ["play one.mp3", "pause one.mp3", "play two.mp3"]
        );
    }

    #[test]
    fn silent_or_clipless_pages_do_not_play() {
        let log = Log::default();
        let mut p = Presenter::new(branching_story(), config()).with_narrator(LogNarrator(log.clone()));
        p.choose_narration(NarrationPreference::Silent).unwrap();
        run_out(&mut p);
        assert!(!p.is_playing());

        let log = Log::default();
        let mut p = Presenter::new(branching_story(), config()).with_narrator(LogNarrator(log.clone()));
        p.choose_narration(NarrationPreference::Voice).unwrap();
        run_out(&mut p);
        p.select_choice(1).unwrap();
        run_out(&mut p);
        assert_eq!(p.current_page(), PageId(3));
        assert!(!p.is_playing());
        assert_eq!(log.entries(), ["play one.mp3", "pause one.mp3"]);
    }

    #[test]
    fn failed_narration_does_not_block_the_page() {
        use std::cell::Cell;

        struct Failing(Rc<Cell<usize>>);

        impl Narrator for Failing {
            fn start(&mut self, _clip: &str) -> Result<Box<dyn Playback>, NarrationError> {
                self.0.set(self.0.get() + 1);
                Err(NarrationError::Unavailable("no device".into()))
            }
        }

        let attempts = Rc::new(Cell::new(0));
        let mut p = Presenter::new(branching_story(), config())
            .with_narrator(Failing(Rc::clone(&attempts)));
        p.choose_narration(NarrationPreference::Voice).unwrap();
        assert_eq!(attempts.get(), 1);
        assert!(!p.is_playing());

        run_out(&mut p);
        assert!(matches!(p.state(), PresentationState::Ready(_)));
        assert_eq!(p.text_reveal_index(), 4);
        assert_eq!(p.use_voice(), Some(NarrationPreference::Voice));

        p.select_choice(0).unwrap();
        run_out(&mut p);
        assert_eq!(p.current_page(), PageId(2));
        assert_eq!(attempts.get(), 2);
        assert!(!p.is_playing());
        assert!(matches!(p.state(), PresentationState::Ready(_)));
    }

    #[test]
    fn dropping_presenter_pauses_narration() {
        let log = Log::default();
        let mut p = Presenter::new(branching_story(), config()).with_narrator(LogNarrator(log.clone()));
        p.choose_narration(NarrationPreference::Voice).unwrap();
        drop(p);
        assert_eq!(log.entries(), ["play one.mp3", "pause one.mp3"]);
    }

    #[test]
    fn unknown_page_shows_fallback() {
        let story = Story::new("Dangling", "")
            .with_page(Page::new(1, "", "A").with_choice(Choice::new("Nowhere", 99)));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();
        run_out(&mut p);
        p.select_choice(0).unwrap();
        run_out(&mut p);

        assert!(matches!(p.state(), PresentationState::Unknown(_)));
        assert_eq!(p.current_page(), PageId(99));
        match p.view() {
            View::UnknownPage(view) => {
                assert_eq!(view.page, PageId(99));
                assert_eq!(view.controls, vec![Control::StartOver]);
            }
            other => panic!("expected fallback view, got {other:?}"),
        }

        p.start_over().unwrap();
        run_out(&mut p);
        assert!(matches!(p.state(), PresentationState::Cover));
    }

    #[test]
    fn choices_win_over_ascending_order() {
        let story = Story::new("Precedence", "")
            .with_page(Page::new(1, "", "A").with_choice(Choice::new("Jump", 3)))
            .with_page(Page::new(2, "", "B"))
            .with_page(Page::new(3, "", "C"));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();
        run_out(&mut p);

        assert_eq!(
            p.controls(),
            vec![Control::Choice {
                index: 0,
                target: PageId(3)
            }]
        );
        assert!(p.continue_on().is_err());
        p.select_choice(0).unwrap();
        run_out(&mut p);
        assert_eq!(p.current_page(), PageId(3));
    }

    #[test]
    fn revisiting_a_page_starts_a_fresh_visit() {
        let story = Story::new("Loop", "")
            .with_page(Page::new(1, "", "Again").with_choice(Choice::new("Once more", 1)));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();
        let first = p.state().visit().map(|v| v.id);
        run_out(&mut p);

        p.select_choice(0).unwrap();
        let t = p.now() + FADE;
        p.advance(t);

        assert_eq!(p.current_page(), PageId(1));
        assert_eq!(p.text_reveal_index(), 0);
        assert_ne!(p.state().visit().map(|v| v.id), first);
    }

    #[test]
    fn overlay_fades_out_and_back_in() {
        let mut p = Presenter::new(scenario_story(), config());
        p.choose_narration(NarrationPreference::Silent).unwrap();
        assert!((p.view().overlay() - 1.0).abs() < f32::EPSILON);

        p.advance(FADE / 2);
        assert!((p.view().overlay() - 0.5).abs() < 0.01);

        run_out(&mut p);
        assert_eq!(p.view().overlay(), 0.0);
        assert!(!p.is_animating());

        p.select_choice(0).unwrap();
        assert_eq!(p.view().overlay(), 0.0);
        let half = p.now() + FADE / 2;
        p.advance(half);
        assert!((p.view().overlay() - 0.5).abs() < 0.01);
        assert!(p.is_animating());
    }

    #[test]
    fn fade_out_starts_from_current_opacity() {
        let story = Story::new("Quick", "")
            .with_page(Page::new(1, "", "").with_choice(Choice::new("", 2)))
            .with_page(Page::new(2, "", "B"));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();
        p.advance(FADE / 10);
        assert!(matches!(p.state(), PresentationState::Ready(_)));

        let before = p.view().overlay();
        assert!((before - 0.9).abs() < 0.01);
        p.select_choice(0).unwrap();
        assert!((p.view().overlay() - before).abs() < 0.01);

        // The remaining tenth of the fade takes a tenth of the duration.
        let dark = p.next_deadline().unwrap();
        assert!(dark.abs_diff(p.now() + FADE / 10) < Duration::from_millis(1));
        p.advance(dark - Duration::from_millis(2));
        assert!(p.view().overlay() > before);
        assert!(p.is_transitioning());
        p.advance(dark);
        assert_eq!(p.current_page(), PageId(2));
    }

    #[test]
    fn empty_texts_settle_immediately() {
        let story = Story::new("Blank", "")
            .with_page(Page::new(1, "", "").with_choice(Choice::new("", 2)))
            .with_page(Page::new(2, "", "B"));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();

        assert!(matches!(p.state(), PresentationState::Ready(_)));
        assert!(p.next_deadline().is_none());
        assert_eq!(p.controls().len(), 1);
    }

    #[test]
    fn multibyte_text_reveals_by_character() {
        let story = Story::new("Unicode", "").with_page(Page::new(1, "", "Café ☕"));
        let mut p = Presenter::new(story, config());
        p.choose_narration(NarrationPreference::Silent).unwrap();
        p.advance(TICK * 4);

        match p.view() {
            View::Page(view) => assert_eq!(view.primary, "Café"),
            other => panic!("expected page view, got {other:?}"),
        }
        run_out(&mut p);
        assert_eq!(p.text_reveal_index(), 6);
    }
}
