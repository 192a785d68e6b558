//! Dashboard rendering: header, filter bar, task list and key hints.

use chrono::{Local, Timelike, Utc};
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use tasksense_shared::models::task::{Task, TaskStatus, Urgency};

use crate::app::App;
use crate::dashboard::Dashboard;
use crate::ui::form;

pub fn draw(frame: &mut Frame, app: &App) {
    let dashboard = match &app.dashboard {
        Some(dashboard) => dashboard,
        None => return,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, dashboard, chunks[0]);
    draw_filter_bar(frame, dashboard, chunks[1]);
    draw_task_list(frame, dashboard, chunks[2]);
    draw_hints(frame, dashboard, chunks[3]);

    if dashboard.form.is_some() {
        form::draw(frame, dashboard);
    }
}

fn draw_header(frame: &mut Frame, dashboard: &Dashboard, area: ratatui::layout::Rect) {
    let lines = vec![
        greeting_line(dashboard),
        stats_line(dashboard),
        quote_line(dashboard),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" TaskSense ")),
        area,
    );
}

fn greeting_line(dashboard: &Dashboard) -> Line<'static> {
    Line::from(Span::styled(
        format!(
            "{}, {}!",
            greeting(Local::now().hour()),
            dashboard.user.display_name()
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn stats_line(dashboard: &Dashboard) -> Line<'static> {
    let stats = dashboard.stats();
    Line::from(format!(
        "{} total | {} pending | {} in progress | {} done | {}% complete",
        stats.total,
        stats.pending,
        stats.in_progress,
        stats.done,
        stats.completion_percent()
    ))
}

fn quote_line(dashboard: &Dashboard) -> Line<'static> {
    Line::from(Span::styled(
        format!("\"{}\" - {}", dashboard.quote.text, dashboard.quote.author),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))
}

fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

fn draw_filter_bar(frame: &mut Frame, dashboard: &Dashboard, area: ratatui::layout::Rect) {
    let search = if dashboard.search_active {
        format!("{}_", dashboard.filter.search)
    } else if dashboard.filter.search.is_empty() {
        "(press / to search)".to_string()
    } else {
        dashboard.filter.search.clone()
    };

    let line = Line::from(vec![
        Span::raw("Status: "),
        Span::styled(
            dashboard.filter.status.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Search: "),
        Span::styled(
            search,
            if dashboard.search_active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            },
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Filter ")),
        area,
    );
}

fn draw_task_list(frame: &mut Frame, dashboard: &Dashboard, area: ratatui::layout::Rect) {
    let title = if dashboard.is_loading {
        " Tasks (refreshing...) "
    } else {
        " Tasks "
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if dashboard.visible.is_empty() {
        let message = if dashboard.tasks.is_empty() {
            "No tasks yet. Press n to create your first task."
        } else {
            "No tasks match the current filter."
        };
        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = dashboard.visible.iter().map(task_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(dashboard.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_item(task: &Task) -> ListItem<'_> {
    let (marker, marker_style) = match task.status {
        TaskStatus::Pending => ("[ ]", Style::default()),
        TaskStatus::InProgress => ("[>]", Style::default().fg(Color::Cyan)),
        TaskStatus::Done => ("[x]", Style::default().fg(Color::Green)),
    };

    let title_style = if task.status == TaskStatus::Done {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default()
    };

    let first = vec![
        Span::styled(marker, marker_style),
        Span::raw(" "),
        Span::styled(task.title.clone(), title_style),
        Span::raw("  "),
        urgency_span(task.urgency),
    ];

    let mut meta = vec![Span::styled(
        format!("    added {}", task.created_at.format("%Y-%m-%d")),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(due) = task.due_date {
        let overdue = task.is_overdue(Utc::now());
        let style = if overdue {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if overdue {
            format!("  due {} (overdue)", due.format("%Y-%m-%d"))
        } else {
            format!("  due {}", due.format("%Y-%m-%d"))
        };
        meta.push(Span::styled(text, style));
    }

    let mut lines = vec![Line::from(first), Line::from(meta)];
    if let Some(description) = &task.description {
        lines.push(Line::from(Span::styled(
            format!("    {}", description),
            Style::default().fg(Color::DarkGray),
        )));
    }
    ListItem::new(Text::from(lines))
}

fn urgency_span(urgency: Option<Urgency>) -> Span<'static> {
    match urgency {
        Some(Urgency::High) => Span::styled(
            "HIGH",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Some(Urgency::Medium) => Span::styled("MEDIUM", Style::default().fg(Color::Yellow)),
        Some(Urgency::Low) => Span::styled("LOW", Style::default().fg(Color::Green)),
        None => Span::styled("-", Style::default().fg(Color::DarkGray)),
    }
}

fn draw_hints(frame: &mut Frame, dashboard: &Dashboard, area: ratatui::layout::Rect) {
    let text = if dashboard.classifying {
        Line::from(Span::styled(
            " Analyzing urgency... ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
    } else if dashboard.search_active {
        Line::from(" type to search | Enter keep | Esc clear ")
    } else {
        Line::from(
            " n new | e edit | s status | d delete | f filter | / search | r refresh | i quote | o sign out | q quit ",
        )
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
