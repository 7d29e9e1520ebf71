//! AI actor for async processing of polish requests

use std::sync::Arc;
use tokio::sync::mpsc;

use super::client::TextGenerator;
use crate::constants::WORKER_CHANNEL_CAPACITY;
use crate::error::RemoteError;

/// Commands that can be sent to the AI actor
#[derive(Debug)]
pub enum AiCommand {
    /// Rewrite text; `prompt` already carries the instruction
    Polish { prompt: String },
    /// Shutdown the actor
    Shutdown,
}

/// Events emitted by the AI actor, one per `Polish` command
#[derive(Debug)]
pub enum AiEvent {
    /// Raw reply from the service (not yet trimmed)
    Polished { text: String },
    /// The service call failed
    Error(RemoteError),
}

/// Handle for communicating with the AI actor
pub struct AiActorHandle {
    pub cmd_tx: mpsc::Sender<AiCommand>,
    pub event_rx: mpsc::Receiver<AiEvent>,
}

/// Spawn the AI actor task
pub fn spawn_ai_actor(generator: Arc<dyn TextGenerator>) -> AiActorHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(WORKER_CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(WORKER_CHANNEL_CAPACITY);

    tokio::spawn(ai_actor_loop(generator, cmd_rx, event_tx));

    AiActorHandle { cmd_tx, event_rx }
}

async fn ai_actor_loop(
    generator: Arc<dyn TextGenerator>,
    mut cmd_rx: mpsc::Receiver<AiCommand>,
    event_tx: mpsc::Sender<AiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            AiCommand::Polish { prompt } => {
                let event = match generator.generate(&prompt).await {
                    Ok(text) => AiEvent::Polished { text },
                    Err(e) => {
                        tracing::warn!("AI polish failed: {}", e);
                        AiEvent::Error(e)
                    }
                };
                if event_tx.send(event).await.is_err() {
                    tracing::warn!("AI actor: event receiver dropped");
                    break;
                }
            }

            AiCommand::Shutdown => {
                break;
            }
        }
    }
    tracing::debug!("AI actor stopped");
}
