//! Auth screen rendering.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::auth::{AuthField, AuthMode};
use crate::ui::centered_rect;

pub fn draw(frame: &mut Frame, app: &App) {
    let form = &app.auth;
    let area = centered_rect(60, 60, frame.area());

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" TaskSense | {} ", form.mode.label()));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(inner);

    let tagline = match form.mode {
        AuthMode::SignIn => "Sign in to pick up where you left off",
        AuthMode::SignUp => "Create an account to start tracking tasks",
    };
    frame.render_widget(
        Paragraph::new(tagline)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[0],
    );

    let email_style = field_style(form.focus == AuthField::Email);
    frame.render_widget(
        Paragraph::new(form.email.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Email ")
                .border_style(email_style),
        ),
        chunks[1],
    );

    let masked = "*".repeat(form.password.chars().count());
    let password_style = field_style(form.focus == AuthField::Password);
    frame.render_widget(
        Paragraph::new(masked.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Password ")
                .border_style(password_style),
        ),
        chunks[2],
    );

    if form.submitting {
        let label = match form.mode {
            AuthMode::SignIn => "Signing in...",
            AuthMode::SignUp => "Creating account...",
        };
        frame.render_widget(
            Paragraph::new(label)
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            chunks[3],
        );
    }

    let other_mode = match form.mode {
        AuthMode::SignIn => "Sign Up",
        AuthMode::SignUp => "Sign In",
    };
    let hints = Line::from(vec![
        key_span("Tab"),
        Span::raw(" field  "),
        key_span("Enter"),
        Span::raw(" submit  "),
        key_span("Ctrl+R"),
        Span::raw(format!(" switch to {}  ", other_mode)),
        key_span("Esc"),
        Span::raw(" quit"),
    ]);
    frame.render_widget(
        Paragraph::new(hints).alignment(Alignment::Center),
        chunks[4],
    );

    // Put the cursor at the end of the focused input.
    let (cursor_area, len) = match form.focus {
        AuthField::Email => (chunks[1], form.email.chars().count()),
        AuthField::Password => (chunks[2], masked.chars().count()),
    };
    frame.set_cursor_position(Position::new(
        cursor_area.x + len as u16 + 1,
        cursor_area.y + 1,
    ));
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
