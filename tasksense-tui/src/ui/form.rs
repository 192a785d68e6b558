//! Modal create/edit form rendering.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::dashboard::Dashboard;
use crate::form::{FormField, TaskForm};
use crate::ui::centered_rect;

pub fn draw(frame: &mut Frame, dashboard: &Dashboard) {
    let form = match &dashboard.form {
        Some(form) => form,
        None => return,
    };

    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", form.heading()));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    draw_input(frame, chunks[0], " Title ", &form.title, form.focus == FormField::Title);
    draw_input(
        frame,
        chunks[1],
        " Description ",
        &form.description,
        form.focus == FormField::Description,
    );
    draw_input(
        frame,
        chunks[2],
        " Due date (YYYY-MM-DD) ",
        &form.due_date,
        form.focus == FormField::DueDate,
    );

    let status_label = format!("< {} >", form.status.label());
    frame.render_widget(
        Paragraph::new(status_label).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(field_style(form.focus == FormField::Status)),
        ),
        chunks[3],
    );

    if dashboard.classifying {
        frame.render_widget(
            Paragraph::new("Analyzing urgency...")
                .style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center),
            chunks[4],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(
            " Tab next field | Left/Right status | Enter save | Esc cancel ",
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center),
        chunks[5],
    );

    set_cursor(frame, form, &chunks);
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    frame.render_widget(
        Paragraph::new(value).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(field_style(focused)),
        ),
        area,
    );
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn set_cursor(frame: &mut Frame, form: &TaskForm, chunks: &[Rect]) {
    let (area, len) = match form.focus {
        FormField::Title => (chunks[0], form.title.chars().count()),
        FormField::Description => (chunks[1], form.description.chars().count()),
        FormField::DueDate => (chunks[2], form.due_date.chars().count()),
        FormField::Status => return,
    };
    frame.set_cursor_position(Position::new(area.x + len as u16 + 1, area.y + 1));
}
