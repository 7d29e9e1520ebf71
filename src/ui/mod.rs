mod form;
mod help;
pub mod theme;
mod widgets;

use ratatui::Frame;

use crate::app::state::AppState;
use form::render_form;
use help::render_help_popup;

pub fn render(frame: &mut Frame, state: &AppState) {
    render_form(frame, state);

    // Help popup (rendered last so it appears on top)
    if let Some(ref help) = state.help {
        render_help_popup(frame, frame.area(), &help.keybindings, help.scroll);
    }
}
