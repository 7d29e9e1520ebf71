//! Main event loop and worker event processing

use anyhow::Result;
use crossterm::event;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;

use crate::constants::{POLL_BUSY_MS, POLL_IDLE_MS};
use crate::delivery::SubmitOutcome;
use crate::error::RemoteError;
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::RenderThread;

impl App {
    pub(crate) async fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            // Worker results first so flags clear before the next frame
            if self.process_ai_events() {
                self.dirty = true;
            }
            if self.process_delivery_events() {
                self.dirty = true;
            }

            // Keep the spinner moving while a request is in flight
            if self.state.is_busy() {
                self.dirty = true;
            }

            // Render only when dirty (non-blocking - sends to render thread)
            if self.dirty {
                render_thread.render(self.state.clone());
                self.dirty = false;
            }

            // Adaptive timeout: faster while waiting on a worker
            let poll_timeout = if self.state.is_busy() {
                POLL_BUSY_MS
            } else {
                POLL_IDLE_MS
            };
            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                // Any input event (including resize) requires re-render
                self.dirty = true;
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => self.handle_action(action).await,
                    InputResult::Char(c) => self.handle_char(c),
                    InputResult::Paste(text) => self.handle_paste(&text),
                    InputResult::Backspace => self.handle_backspace(),
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    /// Process events from the AI actor (non-blocking). Returns true if any events were processed.
    pub(crate) fn process_ai_events(&mut self) -> bool {
        let Some(ref mut ai) = self.ai_actor else {
            return false;
        };

        let mut events = Vec::new();
        let disconnected = loop {
            match ai.event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break false,
                Err(TryRecvError::Disconnected) => break true,
            }
        };

        let had_events = !events.is_empty();
        for event in events {
            self.apply_ai_event(event);
        }

        // A dead worker never answers; release the flag so the button works again
        if disconnected {
            tracing::error!("AI actor stopped unexpectedly");
            self.ai_actor = None;
            if self.state.form.is_polishing {
                self.state
                    .form
                    .finish_polish(Err(RemoteError::WorkerUnavailable));
            }
            return true;
        }
        had_events
    }

    /// Process events from the delivery actor (non-blocking). Returns true if any events were processed.
    pub(crate) fn process_delivery_events(&mut self) -> bool {
        let mut had_events = false;
        loop {
            match self.delivery.event_rx.try_recv() {
                Ok(event) => {
                    had_events = true;
                    self.apply_delivery_event(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.state.form.is_submitting {
                        tracing::error!("Delivery actor stopped with a submission in flight");
                        self.state
                            .form
                            .finish_submit(SubmitOutcome::StoreFailed(
                                RemoteError::WorkerUnavailable,
                            ));
                        had_events = true;
                    }
                    break;
                }
            }
        }
        had_events
    }
}

#[cfg(test)]
mod tests {
    use super::super::actions::tests::idle_app;
    use crate::ai::AiCommand;
    use crate::app::state::StatusMessage;
    use crate::delivery::DeliveryCommand;

    #[tokio::test]
    async fn test_dead_ai_actor_clears_polishing() {
        let mut app = idle_app(true);
        app.state.form.message = "draft".to_string();
        app.state.form.is_polishing = true;

        // Stop the worker; its event channel closes once the task ends
        if let Some(ref ai) = app.ai_actor {
            ai.cmd_tx.send(AiCommand::Shutdown).await.ok();
        }
        let Some(ai) = app.ai_actor.as_mut() else {
            panic!("AI actor not running");
        };
        assert!(ai.event_rx.recv().await.is_none());

        assert!(app.process_ai_events());
        assert!(!app.state.form.is_polishing);
        assert!(app.ai_actor.is_none());
        assert_eq!(
            app.state.form.status,
            Some(StatusMessage::error("AI polish failed"))
        );

        // Key is still configured, so a retry fails generically rather than as a missing key
        app.start_polish().await;
        assert!(!app.state.form.is_polishing);
        assert_eq!(
            app.state.form.status,
            Some(StatusMessage::error("AI polish failed"))
        );
    }

    #[tokio::test]
    async fn test_dead_delivery_actor_clears_submitting() {
        let mut app = idle_app(false);
        app.state.form.is_submitting = true;

        app.delivery
            .cmd_tx
            .send(DeliveryCommand::Shutdown)
            .await
            .ok();
        assert!(app.delivery.event_rx.recv().await.is_none());

        assert!(app.process_delivery_events());
        assert!(!app.state.form.is_submitting);
        assert_eq!(
            app.state.form.status,
            Some(StatusMessage::error("Failed to send message"))
        );
    }

    #[tokio::test]
    async fn test_idle_loop_has_nothing_to_process() {
        let mut app = idle_app(true);
        assert!(!app.process_ai_events());
        assert!(!app.process_delivery_events());
    }
}
