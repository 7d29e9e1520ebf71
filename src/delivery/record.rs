//! Outbound payloads built from the form

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// The document written for every submitted message.
///
/// Field values are trimmed; `created_at` is ISO-8601 UTC with milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessageRecord {
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

/// Variables handed to the email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

impl OutboundMessageRecord {
    pub fn new(name: &str, email: &str, message: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn template_params(&self) -> TemplateParams {
        TemplateParams {
            from_name: self.name.clone(),
            from_email: self.email.clone(),
            message: self.message.clone(),
        }
    }
}
