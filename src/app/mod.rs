//! Application core - owns the form state and coordinates the workers

mod actions;
mod event_loop;
pub mod render_thread;
pub mod state;

use anyhow::Result;
use std::sync::Arc;

use render_thread::RenderThread;

use crate::ai::{AiActorHandle, AiCommand, GeminiClient, TextGenerator, spawn_ai_actor};
use crate::config::Config;
use crate::delivery::{
    DeliveryCommand, DeliveryHandle, DocumentStore, EmailJsClient, FirestoreClient, MailRelay,
    spawn_delivery_actor,
};
use crate::input::KeyBindings;
use state::AppState;

pub struct App {
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    /// AI actor handle for polish (None when no API key is configured)
    pub(crate) ai_actor: Option<AiActorHandle>,
    /// Delivery actor handle for store-then-email submissions
    pub(crate) delivery: DeliveryHandle,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
}

impl App {
    /// Build the service clients once from configuration and spawn the workers.
    pub fn new(config: &Config) -> Self {
        let generator = GeminiClient::from_config(&config.ai)
            .map(|client| Arc::new(client) as Arc<dyn TextGenerator>);
        if generator.is_none() {
            tracing::info!("No AI API key configured; polish is unavailable");
        }

        let store: Arc<dyn DocumentStore> = Arc::new(FirestoreClient::new(&config.store));
        let relay: Arc<dyn MailRelay> = Arc::new(EmailJsClient::new(&config.relay));

        Self::with_services(generator, store, relay)
    }

    /// Wire the app to explicit service implementations
    pub(crate) fn with_services(
        generator: Option<Arc<dyn TextGenerator>>,
        store: Arc<dyn DocumentStore>,
        relay: Arc<dyn MailRelay>,
    ) -> Self {
        let ai_actor = generator.map(spawn_ai_actor);
        let delivery = spawn_delivery_actor(store, relay);

        let state = AppState {
            ai_configured: ai_actor.is_some(),
            ..Default::default()
        };

        Self {
            state,
            bindings: KeyBindings::new(),
            ai_actor,
            delivery,
            dirty: true, // Start dirty for initial render
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn()?;

        let result = self.event_loop(&render_thread).await;

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        self.shutdown_workers().await;

        result
    }

    /// Ask the workers to stop. In-flight requests are abandoned with the runtime.
    async fn shutdown_workers(&mut self) {
        if let Some(ref ai) = self.ai_actor {
            ai.cmd_tx.send(AiCommand::Shutdown).await.ok();
        }
        self.delivery
            .cmd_tx
            .send(DeliveryCommand::Shutdown)
            .await
            .ok();
    }
}
