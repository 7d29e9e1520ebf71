//! Message delivery: persist to the document store, then notify by email
//!
//! The two calls are strictly sequential and have no transactional link.
//! A stored message whose email fails stays stored.

mod actor;
mod record;
mod relay;
mod store;
mod submission;

pub use actor::{DeliveryCommand, DeliveryEvent, DeliveryHandle, spawn_delivery_actor};
pub use record::OutboundMessageRecord;
pub use relay::{EmailJsClient, MailRelay};
pub use store::{DocumentStore, FirestoreClient};
pub use submission::SubmitOutcome;

#[cfg(test)]
pub use relay::MockMailRelay;
#[cfg(test)]
pub use store::MockDocumentStore;
