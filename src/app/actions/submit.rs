//! Message submission: store the record, then email it

use chrono::Utc;

use crate::delivery::{DeliveryCommand, DeliveryEvent, SubmitOutcome};
use crate::error::RemoteError;

use super::super::App;

impl App {
    /// Validate the form and hand the record to the delivery actor
    pub(crate) async fn start_submit(&mut self) {
        let Some(record) = self.state.form.begin_submit(Utc::now()) else {
            return;
        };

        tracing::info!("Submitting message ({} chars)", record.message.len());
        if self
            .delivery
            .cmd_tx
            .send(DeliveryCommand::Submit(record))
            .await
            .is_err()
        {
            tracing::error!("Delivery actor is not running");
            self.state
                .form
                .finish_submit(SubmitOutcome::StoreFailed(RemoteError::WorkerUnavailable));
        }
    }

    pub(crate) fn apply_delivery_event(&mut self, event: DeliveryEvent) {
        match event {
            DeliveryEvent::Finished(outcome) => self.state.form.finish_submit(outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::Sequence;

    use crate::app::App;
    use crate::app::state::StatusMessage;
    use crate::delivery::{
        DeliveryEvent, DocumentStore, MailRelay, MockDocumentStore, MockMailRelay,
    };
    use crate::error::RemoteError;

    use super::super::tests::idle_app;

    fn app_with(store: MockDocumentStore, relay: MockMailRelay) -> App {
        let store: Arc<dyn DocumentStore> = Arc::new(store);
        let relay: Arc<dyn MailRelay> = Arc::new(relay);
        App::with_services(None, store, relay)
    }

    fn fill(app: &mut App) {
        app.state.form.name = " Ada ".to_string();
        app.state.form.email = "ada@example.com".to_string();
        app.state.form.message = "Hello there".to_string();
    }

    async fn next_delivery_event(app: &mut App) -> DeliveryEvent {
        app.delivery
            .event_rx
            .recv()
            .await
            .expect("delivery actor stopped")
    }

    fn rejected() -> RemoteError {
        RemoteError::Api {
            service: "Firestore",
            status: reqwest::StatusCode::FORBIDDEN,
            body: "PERMISSION_DENIED".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_stores_then_emails_and_resets() {
        let mut seq = Sequence::new();
        let mut store = MockDocumentStore::new();
        let mut relay = MockMailRelay::new();
        store
            .expect_insert()
            .withf(|collection, record| collection == "messages" && record.name == "Ada")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        relay
            .expect_send()
            .withf(|params| params.from_name == "Ada" && params.from_email == "ada@example.com")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let mut app = app_with(store, relay);
        fill(&mut app);

        app.start_submit().await;
        assert!(app.state.form.is_submitting);

        let event = next_delivery_event(&mut app).await;
        app.apply_delivery_event(event);

        assert!(!app.state.form.is_submitting);
        assert_eq!(
            app.state.form.status,
            Some(StatusMessage::success("Message sent successfully!"))
        );
        assert!(app.state.form.name.is_empty());
        assert!(app.state.form.email.is_empty());
        assert!(app.state.form.message.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_skips_email_and_keeps_fields() {
        let mut store = MockDocumentStore::new();
        let mut relay = MockMailRelay::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_, _| Err(rejected()));
        relay.expect_send().times(0);

        let mut app = app_with(store, relay);
        fill(&mut app);

        app.start_submit().await;
        let event = next_delivery_event(&mut app).await;
        app.apply_delivery_event(event);

        assert!(!app.state.form.is_submitting);
        assert_eq!(app.state.form.name, " Ada ");
        let status = app.state.form.status.clone().expect("status set");
        assert!(status.is_error());
        assert!(status.text.contains("PERMISSION_DENIED"));
    }

    #[tokio::test]
    async fn test_email_failure_after_store_keeps_fields() {
        let mut store = MockDocumentStore::new();
        let mut relay = MockMailRelay::new();
        store.expect_insert().times(1).returning(|_, _| Ok(()));
        relay
            .expect_send()
            .times(1)
            .returning(|_| Err(RemoteError::EmptyResponse("EmailJS")));

        let mut app = app_with(store, relay);
        fill(&mut app);

        app.start_submit().await;
        let event = next_delivery_event(&mut app).await;
        app.apply_delivery_event(event);

        assert!(!app.state.form.is_submitting);
        assert_eq!(app.state.form.message, "Hello there");
        assert_eq!(
            app.state.form.status,
            Some(StatusMessage::error("EmailJS returned no content"))
        );
    }

    #[tokio::test]
    async fn test_missing_field_makes_no_calls() {
        // Mocks have no expectations: any call would panic the actor
        let mut app = idle_app(false);
        app.state.form.name = "Ada".to_string();
        app.state.form.email = "   ".to_string();
        app.state.form.message = "Hi".to_string();

        app.start_submit().await;

        assert!(!app.state.form.is_submitting);
        assert_eq!(
            app.state.form.status,
            Some(StatusMessage::error("Please fill in all fields"))
        );
        assert!(app.delivery.event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_submit_ignored_while_in_flight() {
        let mut app = idle_app(false);
        fill(&mut app);
        app.state.form.is_submitting = true;

        app.start_submit().await;

        assert!(app.state.form.is_submitting);
        assert!(app.state.form.status.is_none());
    }
}
