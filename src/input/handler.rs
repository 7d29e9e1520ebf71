use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::{AppState, FormField};

pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Paste(String),
    Backspace,
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
            handle_key(key_event, state, bindings)
        }
        Event::Paste(text) => handle_paste(&text, state),
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Help overlay is modal
    if state.help.is_some() {
        return handle_help_input(key, bindings);
    }

    // Mapped control keys work on every field
    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Quit => return InputResult::Quit,
            Action::Up | Action::Down => {}
            _ => return InputResult::Action(action),
        }
    }

    if state.focus.is_text() {
        handle_text_input(key, state.focus)
    } else {
        handle_button_input(key)
    }
}

fn handle_help_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    // In help modal: Up/Down scroll, Esc or F1 closes
    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Help | Action::Up | Action::Down => return InputResult::Action(action),
            Action::Quit => return InputResult::Action(Action::Help),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('?') => InputResult::Action(Action::Help),
        KeyCode::Char('k') => InputResult::Action(Action::Up),
        KeyCode::Char('j') => InputResult::Action(Action::Down),
        _ => InputResult::Continue,
    }
}

fn handle_text_input(key: KeyEvent, focus: FormField) -> InputResult {
    match key.code {
        // Unmapped chords are not text
        KeyCode::Char(c) if (KeyModifiers::NONE | KeyModifiers::SHIFT).contains(key.modifiers) => {
            InputResult::Char(c)
        }
        KeyCode::Backspace => InputResult::Backspace,
        // Only the message is multi-line
        KeyCode::Enter if focus == FormField::Message => InputResult::Char('\n'),
        KeyCode::Enter => InputResult::Action(Action::NextField),
        _ => InputResult::Continue,
    }
}

fn handle_button_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => InputResult::Action(Action::Press),
        _ => InputResult::Continue,
    }
}

/// Pasted text goes into the focused field; single-line fields drop line breaks
fn handle_paste(text: &str, state: &AppState) -> InputResult {
    if state.help.is_some() || !state.focus.is_text() {
        return InputResult::Continue;
    }
    let text = if state.focus == FormField::Message {
        text.replace("\r\n", "\n")
    } else {
        text.replace(['\r', '\n'], " ")
    };
    InputResult::Paste(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::HelpState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state_at(focus: FormField) -> AppState {
        AppState {
            focus,
            ..Default::default()
        }
    }

    #[test]
    fn test_quit_action() {
        let bindings = KeyBindings::new();
        let result = handle_key(press(KeyCode::Esc), &AppState::default(), &bindings);
        assert!(matches!(result, InputResult::Quit));
    }

    #[test]
    fn test_enter_depends_on_field() {
        let bindings = KeyBindings::new();

        let name = handle_key(press(KeyCode::Enter), &state_at(FormField::Name), &bindings);
        assert!(matches!(name, InputResult::Action(Action::NextField)));

        let message = handle_key(press(KeyCode::Enter), &state_at(FormField::Message), &bindings);
        assert!(matches!(message, InputResult::Char('\n')));

        let send = handle_key(press(KeyCode::Enter), &state_at(FormField::SendButton), &bindings);
        assert!(matches!(send, InputResult::Action(Action::Press)));
    }

    #[test]
    fn test_letters_are_text_in_fields() {
        let bindings = KeyBindings::new();
        let result = handle_key(press(KeyCode::Char('q')), &state_at(FormField::Email), &bindings);
        assert!(matches!(result, InputResult::Char('q')));
    }

    #[test]
    fn test_unmapped_chords_do_not_type() {
        let bindings = KeyBindings::new();
        let state = state_at(FormField::Name);

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(matches!(handle_key(ctrl_a, &state, &bindings), InputResult::Continue));

        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert!(matches!(handle_key(alt_x, &state, &bindings), InputResult::Continue));

        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert!(matches!(handle_key(shifted, &state, &bindings), InputResult::Char('A')));
    }

    #[test]
    fn test_ctrl_shortcuts_work_from_any_field() {
        let bindings = KeyBindings::new();
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        let result = handle_key(ctrl_s, &state_at(FormField::Message), &bindings);
        assert!(matches!(result, InputResult::Action(Action::Send)));
    }

    #[test]
    fn test_paste_flattens_single_line_fields() {
        let result = handle_paste("Ada\r\nLovelace", &state_at(FormField::Name));
        assert!(matches!(result, InputResult::Paste(ref t) if t == "Ada  Lovelace"));

        let result = handle_paste("line one\r\nline two", &state_at(FormField::Message));
        assert!(matches!(result, InputResult::Paste(ref t) if t == "line one\nline two"));

        let result = handle_paste("ignored", &state_at(FormField::SendButton));
        assert!(matches!(result, InputResult::Continue));
    }

    #[test]
    fn test_help_overlay_swallows_text() {
        let bindings = KeyBindings::new();
        let state = AppState {
            help: Some(HelpState::default()),
            ..Default::default()
        };

        let typed = handle_key(press(KeyCode::Char('x')), &state, &bindings);
        assert!(matches!(typed, InputResult::Continue));

        let esc = handle_key(press(KeyCode::Esc), &state, &bindings);
        assert!(matches!(esc, InputResult::Action(Action::Help)));
    }
}
