//! Firestore REST client (insert only)

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::record::OutboundMessageRecord;
use crate::config::StoreConfig;
use crate::error::RemoteError;

const SERVICE: &str = "Firestore";

/// A schemaless store addressed by named collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document; the store assigns the identifier
    async fn insert(
        &self,
        collection: &str,
        record: &OutboundMessageRecord,
    ) -> Result<(), RemoteError>;
}

/// Firestore `createDocument` client
#[derive(Clone)]
pub struct FirestoreClient {
    client: Client,
    documents_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct Document<'a> {
    fields: DocumentFields<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentFields<'a> {
    name: StringValue<'a>,
    email: StringValue<'a>,
    message: StringValue<'a>,
    created_at: StringValue<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StringValue<'a> {
    string_value: &'a str,
}

impl<'a> From<&'a OutboundMessageRecord> for Document<'a> {
    fn from(record: &'a OutboundMessageRecord) -> Self {
        let value = |s: &'a str| StringValue { string_value: s };
        Self {
            fields: DocumentFields {
                name: value(&record.name),
                email: value(&record.email),
                message: value(&record.message),
                created_at: value(&record.created_at),
            },
        }
    }
}

impl FirestoreClient {
    /// Built once at startup and shared by every submission.
    pub fn new(config: &StoreConfig) -> Self {
        let documents_url = format!(
            "{}/projects/{}/databases/{}/documents",
            config.endpoint.trim_end_matches('/'),
            config.project_id,
            config.database
        );
        Self {
            client: Client::new(),
            documents_url,
            api_key: config.api_key.clone(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.documents_url, collection)
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn insert(
        &self,
        collection: &str,
        record: &OutboundMessageRecord,
    ) -> Result<(), RemoteError> {
        let mut request = self
            .client
            .post(self.collection_url(collection))
            .json(&Document::from(record));
        if let Some(ref key) = self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(RemoteError::from_response(SERVICE, response).await);
        }

        tracing::info!("Stored message from {} in '{}'", record.email, collection);
        Ok(())
    }
}
