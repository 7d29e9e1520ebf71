//! Action handlers for user input
//!
//! - `input`: Text entry into the focused field
//! - `polish`: AI rewrite of the message
//! - `submit`: Store-then-email delivery

mod input;
mod polish;
mod submit;

use crate::app::state::{FormField, HelpState};
use crate::input::Action;

use super::App;

impl App {
    pub(crate) async fn handle_action(&mut self, action: Action) {
        match action {
            // Navigation
            Action::Up => self.help_scroll_up(),
            Action::Down => self.help_scroll_down(),
            Action::NextField => self.state.next_field(),
            Action::PrevField => self.state.prev_field(),

            // Form
            Action::Press => match self.state.focus {
                FormField::PolishButton => self.start_polish().await,
                FormField::SendButton => self.start_submit().await,
                _ => {}
            },
            Action::Send => self.start_submit().await,
            Action::Polish => self.start_polish().await,
            Action::ClearStatus => self.state.form.clear_status(),

            // App
            Action::Help => self.toggle_help(),
            Action::Quit => {} // Handled in event loop
        }
    }

    fn toggle_help(&mut self) {
        if self.state.help.take().is_none() {
            self.state.help = Some(HelpState {
                keybindings: self.bindings.all_bindings(),
                scroll: 0,
            });
        }
    }

    pub(crate) fn help_scroll_down(&mut self) {
        if let Some(help) = &mut self.state.help {
            // One line per entry plus a header and blank line per category
            let mut categories = 0;
            let mut last_category = "";
            for kb in &help.keybindings {
                if kb.category != last_category {
                    categories += 1;
                    last_category = kb.category;
                }
            }
            let max_scroll = (help.keybindings.len() + categories * 2).saturating_sub(1);
            if help.scroll < max_scroll {
                help.scroll += 1;
            }
        }
    }

    pub(crate) fn help_scroll_up(&mut self) {
        if let Some(help) = &mut self.state.help {
            help.scroll = help.scroll.saturating_sub(1);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ai::{MockTextGenerator, TextGenerator};
    use crate::delivery::{DocumentStore, MailRelay, MockDocumentStore, MockMailRelay};

    /// App wired to mocks with no expectations; any call panics
    pub(crate) fn idle_app(with_ai: bool) -> App {
        let generator: Option<Arc<dyn TextGenerator>> = if with_ai {
            Some(Arc::new(MockTextGenerator::new()))
        } else {
            None
        };
        let store: Arc<dyn DocumentStore> = Arc::new(MockDocumentStore::new());
        let relay: Arc<dyn MailRelay> = Arc::new(MockMailRelay::new());
        App::with_services(generator, store, relay)
    }

    #[tokio::test]
    async fn test_focus_cycles_through_buttons() {
        let mut app = idle_app(false);
        app.handle_action(Action::PrevField).await;
        assert_eq!(app.state.focus, FormField::SendButton);
        app.handle_action(Action::NextField).await;
        assert_eq!(app.state.focus, FormField::Name);
    }

    #[tokio::test]
    async fn test_help_toggle_and_scroll() {
        let mut app = idle_app(false);
        app.handle_action(Action::Help).await;
        assert!(app.state.help.is_some());

        app.handle_action(Action::Up).await;
        app.handle_action(Action::Down).await;
        app.handle_action(Action::Down).await;
        assert_eq!(app.state.help.as_ref().map(|h| h.scroll), Some(2));

        app.handle_action(Action::Help).await;
        assert!(app.state.help.is_none());
    }

    #[tokio::test]
    async fn test_clear_status() {
        let mut app = idle_app(false);
        app.state.form.set_error("Please fill in all fields");
        app.handle_action(Action::ClearStatus).await;
        assert!(app.state.form.status.is_none());
    }
}
