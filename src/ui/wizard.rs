//! Wizard step rendering

use crate::app::App;
use crate::form::{FieldKind, FieldSpec};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Draw the active step: progress header, fields, footer
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + section
            Constraint::Length(1), // Progress gauge
            Constraint::Min(6),    // Fields
            Constraint::Length(2), // Status + hints
        ])
        .margin(1)
        .split(area);

    draw_header(frame, chunks[0], app);
    draw_gauge(frame, chunks[1], app);
    draw_fields(frame, chunks[2], app);
    draw_footer(frame, chunks[3], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let progress = app.wizard.progress();
    let lines = vec![
        Line::from(Span::styled(
            " 1715 Collective — Application ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(progress.label, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(progress.section, Style::default().fg(Color::White)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_gauge(frame: &mut Frame, area: Rect, app: &App) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .ratio(app.wizard.progress().fraction)
        .label("");
    frame.render_widget(gauge, area);
}

fn draw_fields(frame: &mut Frame, area: Rect, app: &App) {
    let fields = app.wizard.visible_fields();
    let active_index = app.wizard.active_field_index();

    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|field| Constraint::Length(field_height(field, app)))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        draw_field(frame, chunks[i], field, app, i == active_index);
    }
}

/// Rows a field needs: borders plus value, options, counter and error
fn field_height(field: &FieldSpec, app: &App) -> u16 {
    let mut height: u16 = match &field.kind {
        FieldKind::Text { multiline: true } => 5,
        _ => 3,
    };
    if field.is_multiline() && field.max_len.is_some() {
        height += 1;
    }
    if !app.wizard.error(field.name).is_empty() {
        height += 1;
    }
    height
}

fn draw_field(frame: &mut Frame, area: Rect, field: &FieldSpec, app: &App, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines = match &field.kind {
        FieldKind::Text { .. } => text_lines(field, app, is_active),
        FieldKind::Checkbox => vec![checkbox_line(field, app, is_active)],
        FieldKind::Radio { options } => {
            vec![options_line(field, options, app, is_active, true)]
        }
        FieldKind::CheckboxGroup { options } => {
            vec![options_line(field, options, app, is_active, false)]
        }
    };

    let error = app.wizard.error(field.name);
    if !error.is_empty() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn text_lines(field: &FieldSpec, app: &App, is_active: bool) -> Vec<Line<'static>> {
    let value = app.wizard.values.text(field.name).to_string();
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines: Vec<Line> = if value.is_empty() && !is_active {
        vec![Line::from(Span::styled("(empty)", value_style))]
    } else {
        let mut lines: Vec<Line> = value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled("▌", Style::default().fg(Color::Cyan)));
            }
        }
        lines
    };

    if field.is_multiline() {
        if let Some(max) = field.max_len {
            lines.push(Line::from(Span::styled(
                format!("{} / {max}", value.chars().count()),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines
}

fn checkbox_line(field: &FieldSpec, app: &App, is_active: bool) -> Line<'static> {
    let checked = app.wizard.values.is_checked(field.name);
    let marker = if checked { "[x]" } else { "[ ]" };
    let style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(Span::styled(
        format!("{marker} {}", field.label),
        style,
    ))
}

fn options_line(
    field: &FieldSpec,
    options: &[crate::form::definition::FieldOption],
    app: &App,
    is_active: bool,
    exclusive: bool,
) -> Line<'static> {
    let cursor = app.option_cursor();
    let mut spans = Vec::new();

    for (i, option) in options.iter().enumerate() {
        let selected = if exclusive {
            app.wizard.values.selected(field.name) == Some(option.value)
        } else {
            app.wizard.values.is_option_checked(field.name, option.value)
        };
        let marker = match (exclusive, selected) {
            (true, true) => "(•)",
            (true, false) => "( )",
            (false, true) => "[x]",
            (false, false) => "[ ]",
        };
        let style = if is_active && i == cursor {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{marker} {}", option.label), style));
        if i + 1 < options.len() {
            spans.push(Span::raw("   "));
        }
    }
    Line::from(spans)
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let progress = app.wizard.progress();

    let mut status_spans = Vec::new();
    if app.submit_state.is_submitting() {
        status_spans.push(Span::styled(
            app.submit_state.submit_label(),
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(message) = app.submit_state.error_message() {
        status_spans.push(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        ));
    } else if progress.submit_visible {
        status_spans.push(Span::styled(
            format!("[ {} ]", app.submit_state.submit_label()),
            Style::default().fg(Color::Green),
        ));
    }

    let mut hints = vec!["Tab next field", "Space toggle"];
    if progress.next_visible {
        hints.push("Enter next step");
    } else {
        hints.push("Enter submit");
    }
    if progress.back_enabled {
        hints.push("Esc back");
    } else {
        hints.push("Esc quit");
    }

    let lines = vec![
        Line::from(status_spans),
        Line::from(Span::styled(
            hints.join(" · "),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
