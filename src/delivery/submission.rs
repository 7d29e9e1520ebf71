//! The two-step submission: store write, then email send

use super::record::OutboundMessageRecord;
use super::relay::MailRelay;
use super::store::DocumentStore;
use crate::constants::MESSAGES_COLLECTION;
use crate::error::RemoteError;

/// How far a submission got
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Document stored and email sent
    BothSucceeded,
    /// Store write failed (or never ran); the email was never attempted
    StoreFailed(RemoteError),
    /// Document stored but the email failed. The document is not rolled back.
    EmailFailedAfterStoreSucceeded(RemoteError),
}

impl SubmitOutcome {
    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::BothSucceeded)
    }

    /// The failure, whichever step produced it
    pub fn error(&self) -> Option<&RemoteError> {
        match self {
            Self::BothSucceeded => None,
            Self::StoreFailed(e) | Self::EmailFailedAfterStoreSucceeded(e) => Some(e),
        }
    }
}

/// Write the record, then send the notification.
///
/// The email step only runs after the store write returned successfully.
/// Nothing is retried or compensated.
pub async fn submit(
    store: &dyn DocumentStore,
    relay: &dyn MailRelay,
    record: &OutboundMessageRecord,
) -> SubmitOutcome {
    if let Err(e) = store.insert(MESSAGES_COLLECTION, record).await {
        tracing::warn!("Store write failed, email not attempted: {}", e);
        return SubmitOutcome::StoreFailed(e);
    }

    if let Err(e) = relay.send(&record.template_params()).await {
        tracing::warn!("Email send failed after message was stored: {}", e);
        return SubmitOutcome::EmailFailedAfterStoreSucceeded(e);
    }

    tracing::info!("Submission from {} delivered", record.email);
    SubmitOutcome::BothSucceeded
}
