//! Layout helpers, colour shading, and the help popup.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// A stable background tint for an image reference.
///
/// Terminals cannot show the page art, so each image gets a dark colour
/// derived from its name; the same image always gets the same tint.
pub fn image_tint(image: &str) -> (u8, u8, u8) {
    // FNV-1a
    let hash = image.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
        (h ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    });
    let channel = |shift: u32| 24 + ((hash >> shift) & 0x3f) as u8;
    (channel(0), channel(8), channel(16))
}

/// Darken `rgb` by `overlay` in `[0, 1]`; 1 is black.
pub fn shade((r, g, b): (u8, u8, u8), overlay: f32) -> Color {
    let keep = 1.0 - overlay.clamp(0.0, 1.0);
    let scale = |c: u8| (f32::from(c) * keep).round() as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

/// Draw the help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Cover:"),
        Line::from("  v / 1       Read to me"),
        Line::from("  s / 2       I'll read myself"),
        Line::from(""),
        Line::from("Pages:"),
        Line::from("  1-9         Take a choice"),
        Line::from("  Enter / →   Continue when there is one way on"),
        Line::from("  r           Start over at the end"),
        Line::from("  Mouse       Click a button"),
        Line::from(""),
        Line::from("  ?           Toggle this help"),
        Line::from("  q / Esc     Quit"),
        Line::from("  Ctrl+C      Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
