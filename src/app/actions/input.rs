//! Text input handling (chars, paste, backspace)

use super::super::App;

impl App {
    pub(crate) fn handle_char(&mut self, c: char) {
        let field = self.state.focus;
        self.state.form.insert_char(field, c);
    }

    pub(crate) fn handle_paste(&mut self, text: &str) {
        if let Some(buf) = self.state.form.field_mut(self.state.focus) {
            buf.push_str(text);
        }
    }

    pub(crate) fn handle_backspace(&mut self) {
        let field = self.state.focus;
        self.state.form.backspace(field);
    }
}
