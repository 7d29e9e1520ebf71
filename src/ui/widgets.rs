//! Common UI widgets and utilities

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::constants::SPINNER_FRAME_MS;

/// Simple status bar with left and right text
pub fn status_bar(frame: &mut Frame, area: Rect, left: &str, right: &str) {
    let style = Theme::status_bar();

    let available = area
        .width
        .saturating_sub(left.width() as u16 + right.width() as u16 + 4);
    let line = Line::from(vec![
        Span::styled(format!(" {} ", left), style),
        Span::styled(" ".repeat(available as usize), style),
        Span::styled(format!(" {} ", right), Theme::status_busy()),
    ]);

    frame.render_widget(Paragraph::new(line).style(style), area);
}

/// Key hints, as many as fit the width (at least one)
pub fn help_bar(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let hints_to_show = hints_that_fit(hints, area.width as usize);

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().take(hints_to_show).enumerate() {
        spans.push(Span::styled(format!(" {} ", key), Theme::help_key()));
        spans.push(Span::styled(desc.to_string(), Theme::help_desc()));
        if i + 1 < hints_to_show {
            spans.push(Span::styled(" │ ", Theme::text_muted()));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Rendered as " key desc │ " per hint, with a single trailing space on the last
fn hints_that_fit(hints: &[(&str, &str)], available_width: usize) -> usize {
    let mut total_width = 0;
    let mut count = 0;
    for (i, (key, desc)) in hints.iter().enumerate() {
        let separator = if i + 1 < hints.len() { 3 } else { 1 };
        let width = key.width() + 2 + desc.width() + separator;
        if total_width + width > available_width {
            break;
        }
        total_width += width;
        count += 1;
    }
    count.max(1).min(hints.len())
}

/// Get an animated spinner character for in-flight requests
pub fn spinner_char() -> char {
    const SPINNER: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let idx = (millis / SPINNER_FRAME_MS) as usize % SPINNER.chars().count();

    SPINNER.chars().nth(idx).unwrap_or('*')
}

/// Centered rect with the size clamped between min and max, then to the area
pub fn centered_rect_constrained(
    area: Rect,
    min_width: u16,
    max_width: u16,
    min_height: u16,
    max_height: u16,
) -> Rect {
    let w = max_width
        .min(area.width.saturating_sub(4))
        .max(min_width)
        .min(area.width);
    let h = max_height
        .min(area.height.saturating_sub(4))
        .max(min_height)
        .min(area.height);

    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HINTS: &[(&str, &str)] = &[("Tab", "next"), ("Ctrl+S", "send"), ("Esc", "quit")];

    #[test]
    fn test_hints_that_fit() {
        // " Tab next │ " = 12, " Ctrl+S send │ " = 15, " Esc quit " = 10
        assert_eq!(hints_that_fit(HINTS, 200), 3);
        assert_eq!(hints_that_fit(HINTS, 37), 3);
        assert_eq!(hints_that_fit(HINTS, 30), 2);
        assert_eq!(hints_that_fit(HINTS, 5), 1);
    }

    #[test]
    fn test_centered_rect_stays_inside_small_area() {
        let area = Rect::new(0, 0, 20, 8);
        let rect = centered_rect_constrained(area, 36, 50, 10, 30);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
        assert_eq!(rect.x, 0);
    }

    #[test]
    fn test_centered_rect_in_large_area() {
        let rect = centered_rect_constrained(Rect::new(0, 0, 120, 40), 36, 50, 10, 20);
        assert_eq!(rect, Rect::new(35, 10, 50, 20));
    }
}
