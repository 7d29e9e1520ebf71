//! AI polish of the message field

use crate::ai::{AiCommand, AiEvent};
use crate::error::RemoteError;

use super::super::App;

impl App {
    /// Send the message to the AI actor for rewriting
    pub(crate) async fn start_polish(&mut self) {
        let Some(prompt) = self.state.form.begin_polish(self.state.ai_configured) else {
            return;
        };

        tracing::debug!("Requesting polish ({} chars)", prompt.len());
        let sent = match self.ai_actor {
            Some(ref ai) => ai.cmd_tx.send(AiCommand::Polish { prompt }).await.is_ok(),
            None => false,
        };
        if !sent {
            tracing::error!("AI actor is not running");
            self.state
                .form
                .finish_polish(Err(RemoteError::WorkerUnavailable));
        }
    }

    pub(crate) fn apply_ai_event(&mut self, event: AiEvent) {
        match event {
            AiEvent::Polished { text } => {
                tracing::info!("Polish complete");
                self.state.form.finish_polish(Ok(text));
            }
            AiEvent::Error(e) => self.state.form.finish_polish(Err(e)),
        }
    }
}
