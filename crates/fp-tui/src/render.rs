//! Drawing the presenter's view.
//!
//! Everything on screen is shaded by the view's overlay, so a fade to black
//! darkens the page art, the text and the buttons together.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use fp_present::{Control, CoverView, PageView, UnknownPageView, View};

use crate::app::TuiApp;
use crate::shared::{centered_rect, draw_help_popup, image_tint, shade};

const TEXT: (u8, u8, u8) = (235, 230, 215);
const ACCENT: (u8, u8, u8) = (230, 190, 110);
const PANEL: (u8, u8, u8) = (12, 12, 16);
const BUTTON_WIDTH: u16 = 7;
const BUTTON_HEIGHT: u16 = 3;

/// Main draw function. Records clickable areas on `app` as it goes.
pub fn draw(frame: &mut Frame, app: &mut TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Story
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let view = app.presenter.view();
    app.control_areas.clear();
    app.cover_areas.clear();

    match &view {
        View::Cover(cover) => draw_cover(frame, app, cover, chunks[0]),
        View::Page(page) => draw_page(frame, app, page, chunks[0]),
        View::UnknownPage(unknown) => draw_unknown(frame, app, unknown, chunks[0]),
    }

    let status = Paragraph::new(status_line(&view))
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[1]);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_background(frame: &mut Frame, image: &str, overlay: f32, area: Rect) {
    let background = Block::default().style(Style::default().bg(shade(image_tint(image), overlay)));
    frame.render_widget(background, area);
}

fn panel(overlay: f32) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(shade(ACCENT, overlay)))
        .style(
            Style::default()
                .bg(shade(PANEL, overlay))
                .fg(shade(TEXT, overlay)),
        )
}

fn button(label: &str, overlay: f32) -> Paragraph<'_> {
    Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(shade(ACCENT, overlay))
                .bg(shade(PANEL, overlay))
                .bold(),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(shade(ACCENT, overlay))),
        )
}

fn draw_cover(frame: &mut Frame, app: &mut TuiApp, cover: &CoverView, area: Rect) {
    draw_background(frame, &cover.image, 0.0, area);

    let card = centered_rect(70, 60, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Title and prompt
            Constraint::Length(3), // Options
        ])
        .split(card);

    let heading = Paragraph::new(vec![
        Line::from(cover.title.as_str()).style(Style::default().fg(shade(ACCENT, 0.0)).bold()),
        Line::from(""),
        Line::from(cover.prompt.as_str()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(panel(0.0));
    frame.render_widget(heading, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    for (i, (preference, cell)) in cover.options.iter().zip(columns.iter()).enumerate() {
        let label = format!("[{}] {}", i + 1, preference.label());
        frame.render_widget(button(&label, 0.0), *cell);
        app.cover_areas.push((*cell, *preference));
    }
}

fn draw_page(frame: &mut Frame, app: &mut TuiApp, page: &PageView, area: Rect) {
    let overlay = page.overlay;
    draw_background(frame, &page.image, overlay, area);

    let secondary_lines = page
        .secondary
        .as_deref()
        .map_or(1, |text| text.lines().count().max(1));
    let bottom_height = bottom_height(secondary_lines, page.controls.len(), area.height);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // Primary text
            Constraint::Min(0),                // Page art
            Constraint::Length(bottom_height), // Secondary text and buttons
        ])
        .split(area);

    let primary = Paragraph::new(page.primary.as_str())
        .wrap(Wrap { trim: false })
        .block(panel(overlay).title(format!(" {} ", page.page)));
    frame.render_widget(primary, primary_area(rows[0], &page.primary));

    let Some(secondary) = &page.secondary else {
        return;
    };

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(BUTTON_WIDTH)])
        .split(rows[2]);

    let text = Paragraph::new(secondary.as_str())
        .wrap(Wrap { trim: false })
        .block(panel(overlay));
    frame.render_widget(text, bottom[0]);

    draw_controls(frame, app, &page.controls, overlay, bottom[1]);
}

/// Room for the secondary text or the button column, whichever is taller,
/// but never more than half the screen.
fn bottom_height(secondary_lines: usize, controls: usize, screen_height: u16) -> u16 {
    let buttons = clamp_u16(controls).saturating_mul(BUTTON_HEIGHT);
    clamp_u16(secondary_lines)
        .saturating_add(2)
        .max(buttons)
        .max(5)
        .min(screen_height / 2)
}

/// The primary box grows with its text, up to the space available.
fn primary_area(area: Rect, text: &str) -> Rect {
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let lines: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(inner_width).max(1))
        .sum();
    let height = clamp_u16(lines).saturating_add(2).min(area.height);
    Rect { height, ..area }
}

/// Terminal sizes are `u16`; anything larger fills the screen anyway.
fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn draw_controls(
    frame: &mut Frame,
    app: &mut TuiApp,
    controls: &[Control],
    overlay: f32,
    area: Rect,
) {
    let cells = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            controls
                .iter()
                .map(|_| Constraint::Length(BUTTON_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (control, cell) in controls.iter().zip(cells.iter()) {
        if cell.height == 0 {
            continue;
        }
        frame.render_widget(button(&control.label(), overlay), *cell);
        app.control_areas.push((*cell, *control));
    }
}

fn draw_unknown(frame: &mut Frame, app: &mut TuiApp, unknown: &UnknownPageView, area: Rect) {
    let overlay = unknown.overlay;
    draw_background(frame, "", overlay, area);

    let card = centered_rect(60, 40, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(BUTTON_HEIGHT)])
        .split(card);

    let message = Paragraph::new(format!(
        "Page {} is missing from this story.",
        unknown.page
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(panel(overlay));
    frame.render_widget(message, rows[0]);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Min(0),
        ])
        .split(rows[1]);
    draw_controls(frame, app, &unknown.controls, overlay, buttons[1]);
}

fn status_line(view: &View) -> String {
    match view {
        View::Cover(_) => " v/1 read to me | s/2 read myself | ? help | q quit".to_string(),
        View::Page(page) => {
            let hint = match page.controls.as_slice() {
                [] => "...",
                [Control::StartOver] => "r start over",
                [_] => "Enter continue",
                _ => "1-9 choose",
            };
            let narrating = if page.narrating { " | \u{266a} narrating" } else { "" };
            format!(" page {} | {hint}{narrating} | ? help | q quit", page.page)
        }
        View::UnknownPage(unknown) => {
            format!(" page {} not found | r start over | q quit", unknown.page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use fp_present::{NarrationPreference, Presenter, PresenterConfig};
    use fp_story::{Choice, Page, Story};
    use ratatui::backend::TestBackend;

    fn story() -> Story {
        Story::new("The Lantern", "cover.png")
            .with_page(
                Page::new(1, "one.png", "A fork in the road.")
                    .with_audio("one.mp3")
                    .with_choice(Choice::new("Go left", 2))
                    .with_choice(Choice::new("Go right", 5)),
            )
            .with_page(Page::new(2, "two.png", "The end."))
    }

    fn app() -> TuiApp {
        let config = PresenterConfig::new()
            .with_reveal_interval(Duration::from_millis(1))
            .with_fade_duration(Duration::from_millis(1));
        TuiApp::new(Presenter::new(story(), config))
    }

    fn render(app: &mut TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn run_out(app: &mut TuiApp) {
        let later = app.presenter.now() + Duration::from_secs(60);
        app.presenter.advance(later);
    }

    #[test]
    fn cover_shows_title_and_options() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("The Lantern"));
        assert!(screen.contains("Read to me"));
        assert!(screen.contains("I'll read myself"));
        assert_eq!(app.cover_areas.len(), 2);
        assert!(app.control_areas.is_empty());
    }

    #[test]
    fn ready_page_records_buttons() {
        let mut app = app();
        app.presenter
            .choose_narration(NarrationPreference::Silent)
            .unwrap();
        run_out(&mut app);

        let screen = render(&mut app);
        assert!(screen.contains("A fork in the road."));
        assert!(screen.contains("1) Go left"));
        assert!(screen.contains("2) Go right"));
        assert_eq!(app.control_areas.len(), 2);
        assert!(app.cover_areas.is_empty());
    }

    #[test]
    fn revealing_page_has_no_buttons() {
        let config = PresenterConfig::new().with_reveal_interval(Duration::from_secs(1));
        let mut app = TuiApp::new(Presenter::new(story(), config));
        app.presenter
            .choose_narration(NarrationPreference::Silent)
            .unwrap();
        app.presenter.advance(Duration::from_secs(3));

        let screen = render(&mut app);
        assert!(screen.contains("A f"));
        assert!(!screen.contains("A fo"));
        assert!(app.control_areas.is_empty());
    }

    #[test]
    fn missing_page_offers_start_over() {
        let mut app = app();
        app.presenter
            .choose_narration(NarrationPreference::Silent)
            .unwrap();
        run_out(&mut app);
        app.presenter.select_choice(1).unwrap();
        run_out(&mut app);

        let screen = render(&mut app);
        assert!(screen.contains("Page 5 is missing"));
        assert_eq!(app.control_areas.len(), 1);
        assert_eq!(app.control_areas[0].1, Control::StartOver);
    }

    #[test]
    fn layout_heights_saturate() {
        assert_eq!(bottom_height(1, 2, 30), 6);
        assert_eq!(bottom_height(1, 30_000, 30), 15);
        assert_eq!(bottom_height(usize::MAX, 0, u16::MAX), u16::MAX / 2);
        assert_eq!(bottom_height(0, usize::MAX, 40), 20);

        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(primary_area(area, "").height, 3);
        assert_eq!(primary_area(area, &"a".repeat(1_000_000)).height, 5);
    }

    #[test]
    fn status_line_follows_controls() {
        let mut app = app();
        assert!(status_line(&app.presenter.view()).contains("read to me"));
        app.presenter
            .choose_narration(NarrationPreference::Voice)
            .unwrap();
        run_out(&mut app);
        let status = status_line(&app.presenter.view());
        assert!(status.contains("1-9 choose"));
        assert!(status.contains("narrating"));
    }
}
