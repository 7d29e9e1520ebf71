//! Keybinding help overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

use super::theme::{Theme, borders};
use super::widgets::centered_rect_constrained;
use crate::input::KeybindingEntry;

const KEY_WIDTH: usize = 12;

pub fn render_help_popup(frame: &mut Frame, area: Rect, keys: &[KeybindingEntry], scroll: usize) {
    let lines = help_lines(keys);

    let popup_area =
        centered_rect_constrained(area, 36, 50, 10, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .title_bottom(" ↑/↓ scroll │ F1 or Esc close ")
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(Theme::border_focused());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let items: Vec<ListItem> = lines
        .into_iter()
        .skip(scroll)
        .map(|line| match line {
            HelpLine::Blank => ListItem::new(Line::from("")),
            HelpLine::Header(category) => ListItem::new(Line::from(vec![
                Span::styled(
                    format!("── {} ", category),
                    Theme::text_secondary().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "─".repeat(inner.width.saturating_sub(category.len() as u16 + 4) as usize),
                    Theme::border(),
                ),
            ])),
            HelpLine::Entry(entry) => ListItem::new(Line::from(vec![
                Span::styled("  ", Style::default()),
                Span::styled(key_column(&entry.key), Theme::text_accent()),
                Span::styled(entry.description.as_str(), Theme::text()),
            ])),
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

enum HelpLine<'a> {
    Blank,
    Header(&'a str),
    Entry(&'a KeybindingEntry),
}

/// Entries grouped under a header per category, blank line between groups
fn help_lines(keys: &[KeybindingEntry]) -> Vec<HelpLine<'_>> {
    let mut lines = Vec::new();
    let mut current_category: Option<&str> = None;
    for entry in keys {
        if current_category != Some(entry.category) {
            if current_category.is_some() {
                lines.push(HelpLine::Blank);
            }
            lines.push(HelpLine::Header(entry.category));
            current_category = Some(entry.category);
        }
        lines.push(HelpLine::Entry(entry));
    }
    lines
}

fn key_column(key: &str) -> String {
    if key.chars().count() > KEY_WIDTH {
        key.chars().take(KEY_WIDTH).collect()
    } else {
        format!("{:width$}", key, width = KEY_WIDTH)
    }
}
