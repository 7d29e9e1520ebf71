use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme::{Theme, borders, symbols};
use super::widgets::{help_bar, spinner_char, status_bar};
use crate::app::state::{AppState, FormField, FormState, StatusKind};
use crate::constants::{FORM_MAX_WIDTH, INPUT_HEIGHT};
use unicode_width::UnicodeWidthStr;

struct FormLayout {
    status_area: Rect,
    name_area: Rect,
    email_area: Rect,
    message_area: Rect,
    buttons_area: Rect,
    outcome_area: Rect,
    help_area: Rect,
}

fn compute_layout(area: Rect) -> FormLayout {
    // Keep the form readable on wide terminals
    let width = area.width.min(FORM_MAX_WIDTH);
    let column = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Status bar
            Constraint::Length(INPUT_HEIGHT), // Name
            Constraint::Length(INPUT_HEIGHT), // Email
            Constraint::Min(5),               // Message
            Constraint::Length(3),            // Buttons
            Constraint::Length(1),            // Outcome line
            Constraint::Length(1),            // Help bar
        ])
        .split(column);

    FormLayout {
        status_area: chunks[0],
        name_area: chunks[1],
        email_area: chunks[2],
        message_area: chunks[3],
        buttons_area: chunks[4],
        outcome_area: chunks[5],
        help_area: chunks[6],
    }
}

pub fn render_form(frame: &mut Frame, state: &AppState) {
    let layout = compute_layout(frame.area());
    let form = &state.form;

    status_bar(frame, layout.status_area, "Contact", &activity_text(state));

    render_field(
        frame,
        layout.name_area,
        "Name",
        &form.name,
        state.focus == FormField::Name,
    );
    render_field(
        frame,
        layout.email_area,
        "Email",
        &form.email,
        state.focus == FormField::Email,
    );
    render_message_field(
        frame,
        layout.message_area,
        &form.message,
        state.focus == FormField::Message,
    );

    render_buttons(frame, layout.buttons_area, state);
    render_outcome(frame, layout.outcome_area, form);

    let hints: &[(&str, &str)] = &[
        ("Tab", "next"),
        ("Ctrl+P", "polish"),
        ("Ctrl+S", "send"),
        ("F1", "help"),
        ("Esc", "quit"),
    ];
    help_bar(frame, layout.help_area, hints);
}

/// Right side of the status bar: what is in flight, or AI availability
fn activity_text(state: &AppState) -> String {
    let form = &state.form;
    match (form.is_polishing, form.is_submitting) {
        (true, true) => format!("{} Polishing and sending...", spinner_char()),
        (true, false) => format!("{} Polishing...", spinner_char()),
        (false, true) => format!("{} Sending...", spinner_char()),
        (false, false) if state.ai_configured => format!("{} AI ready", symbols::AI),
        (false, false) => String::new(),
    }
}

fn field_block(label: String, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(label);
    if focused {
        block
            .border_style(Theme::border_focused())
            .border_type(borders::input_focused())
    } else {
        block.border_style(Theme::border())
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let block = field_block(format!(" {} ", label), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (text, style) = if focused {
        (format!("{}│", value), Theme::text())
    } else {
        (value.to_string(), Theme::text_secondary())
    };

    frame.render_widget(Paragraph::new(text).style(style), inner);
}

fn render_message_field(frame: &mut Frame, area: Rect, message: &str, focused: bool) {
    let title = format!(" Message ({} chars) ", message.chars().count());
    let block = field_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (text, style) = if focused {
        (format!("{}│", message), Theme::text())
    } else {
        (message.to_string(), Theme::text_secondary())
    };

    // Follow the cursor once the text outgrows the box
    let scroll = wrapped_rows(&text, inner.width).saturating_sub(inner.height);

    let paragraph = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Rows `text` occupies once word-wrapped to `width` columns.
///
/// A trailing newline opens an empty row. Words wider than the box are hard-broken.
fn wrapped_rows(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = text.split('\n').map(|line| line_rows(line, width)).sum();
    rows.min(u16::MAX as usize) as u16
}

fn line_rows(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut col = 0;
    for word in line.split_inclusive(' ') {
        let visible = word.trim_end_matches(' ').width();
        if col > 0 && col + visible > width {
            rows += 1;
            col = 0;
        }
        col += word.width();
        while col > width {
            rows += 1;
            col -= width;
        }
    }
    rows
}

fn render_buttons(frame: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.form;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let polish_label = if form.is_polishing {
        format!("{} Polishing...", spinner_char())
    } else {
        format!("{} Polish with AI", symbols::AI)
    };
    render_button(
        frame,
        chunks[0],
        &polish_label,
        form.can_polish(),
        state.focus == FormField::PolishButton,
    );

    let send_label = if form.is_submitting {
        format!("{} Sending...", spinner_char())
    } else {
        "Send Message".to_string()
    };
    render_button(
        frame,
        chunks[1],
        &send_label,
        form.can_submit(),
        state.focus == FormField::SendButton,
    );
}

fn render_button(frame: &mut Frame, area: Rect, label: &str, enabled: bool, focused: bool) {
    let style = button_style(enabled, focused);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });

    let paragraph = Paragraph::new(Line::from(Span::styled(label.to_string(), style)))
        .centered()
        .block(block);
    frame.render_widget(paragraph, area);
}

fn button_style(enabled: bool, focused: bool) -> Style {
    match (enabled, focused) {
        (false, _) => Theme::button_disabled(),
        (true, true) => Theme::button_focused(),
        (true, false) => Theme::button(),
    }
}

/// The single status line: latest success or error
fn render_outcome(frame: &mut Frame, area: Rect, form: &FormState) {
    let Some(ref status) = form.status else {
        return;
    };

    let (symbol, style) = match status.kind {
        StatusKind::Success => (symbols::SUCCESS, Theme::text_success()),
        StatusKind::Error => (symbols::ERROR, Theme::text_error()),
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", symbol), style),
        Span::styled(status.text.clone(), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
