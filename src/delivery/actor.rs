//! Delivery actor: runs submissions off the event loop

use std::sync::Arc;
use tokio::sync::mpsc;

use super::record::OutboundMessageRecord;
use super::relay::MailRelay;
use super::store::DocumentStore;
use super::submission::{SubmitOutcome, submit};
use crate::constants::WORKER_CHANNEL_CAPACITY;

#[derive(Debug)]
pub enum DeliveryCommand {
    Submit(OutboundMessageRecord),
    Shutdown,
}

/// Exactly one event per `Submit` command
#[derive(Debug)]
pub enum DeliveryEvent {
    Finished(SubmitOutcome),
}

pub struct DeliveryHandle {
    pub cmd_tx: mpsc::Sender<DeliveryCommand>,
    pub event_rx: mpsc::Receiver<DeliveryEvent>,
}

/// Spawn the delivery actor. The store and relay clients are shared read-only.
pub fn spawn_delivery_actor(
    store: Arc<dyn DocumentStore>,
    relay: Arc<dyn MailRelay>,
) -> DeliveryHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(WORKER_CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(WORKER_CHANNEL_CAPACITY);

    tokio::spawn(delivery_loop(store, relay, cmd_rx, event_tx));

    DeliveryHandle { cmd_tx, event_rx }
}

async fn delivery_loop(
    store: Arc<dyn DocumentStore>,
    relay: Arc<dyn MailRelay>,
    mut cmd_rx: mpsc::Receiver<DeliveryCommand>,
    event_tx: mpsc::Sender<DeliveryEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            DeliveryCommand::Submit(record) => {
                let outcome = submit(store.as_ref(), relay.as_ref(), &record).await;
                if event_tx.send(DeliveryEvent::Finished(outcome)).await.is_err() {
                    tracing::warn!("Delivery actor: event receiver dropped");
                    break;
                }
            }
            DeliveryCommand::Shutdown => break,
        }
    }
    tracing::debug!("Delivery actor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{MockDocumentStore, MockMailRelay};
    use chrono::Utc;

    #[tokio::test]
    async fn test_submit_command_reports_outcome() {
        let mut store = MockDocumentStore::new();
        let mut relay = MockMailRelay::new();
        store.expect_insert().times(1).returning(|_, _| Ok(()));
        relay.expect_send().times(1).returning(|_| Ok(()));

        let mut handle = spawn_delivery_actor(Arc::new(store), Arc::new(relay));
        let record = OutboundMessageRecord::new("Ada", "ada@example.com", "Hi", Utc::now());
        handle
            .cmd_tx
            .send(DeliveryCommand::Submit(record))
            .await
            .unwrap();

        let Some(DeliveryEvent::Finished(outcome)) = handle.event_rx.recv().await else {
            panic!("delivery actor stopped without an outcome");
        };
        assert!(outcome.is_success());
    }
}
