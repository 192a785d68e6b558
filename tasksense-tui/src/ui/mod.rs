//! Rendering.
//!
//! Pure view code: every function takes the app state by reference and
//! draws widgets, no state changes. One frame is drawn per loop tick.

pub mod auth;
pub mod dashboard;
pub mod form;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::{App, Screen};
use crate::notify::{Notice, NoticeLevel};

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Loading => draw_loading(frame),
        Screen::Auth => auth::draw(frame, app),
        Screen::Dashboard => dashboard::draw(frame, app),
    }
    if let Some(notice) = app.notices.latest() {
        draw_notice(frame, notice, app.notices.len());
    }
}

fn draw_loading(frame: &mut Frame) {
    let area = centered_rect(40, 20, frame.area());
    let paragraph = Paragraph::new("Restoring session...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" TaskSense "));
    frame.render_widget(paragraph, area);
}

/// One-line banner along the bottom edge. Styled by severity, dismissed
/// with `Esc` or by waiting out the TTL.
fn draw_notice(frame: &mut Frame, notice: &Notice, count: usize) {
    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let banner = Rect::new(area.x, area.y + area.height - 1, area.width, 1);

    let style = match notice.level {
        NoticeLevel::Info => Style::default().fg(Color::Black).bg(Color::Green),
        NoticeLevel::Error => Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    };
    let text = if count > 1 {
        format!(" {} (+{} more, Esc to dismiss) ", notice.text, count - 1)
    } else {
        format!(" {} (Esc to dismiss) ", notice.text)
    };

    frame.render_widget(Clear, banner);
    frame.render_widget(Paragraph::new(text).style(style), banner);
}

/// Centers a rect of the given percentage size inside `r`.
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
