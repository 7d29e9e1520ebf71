//! EmailJS REST client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::record::TemplateParams;
use crate::config::RelayConfig;
use crate::error::RemoteError;

const SERVICE: &str = "EmailJS";

/// A relay that sends templated emails from a variable map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(&self, params: &TemplateParams) -> Result<(), RemoteError>;
}

/// EmailJS `email/send` client. Service, template and key come from config.
#[derive(Clone)]
pub struct EmailJsClient {
    client: Client,
    config: RelayConfig,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

impl EmailJsClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn request<'a>(&'a self, params: &'a TemplateParams) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: params,
        }
    }
}

#[async_trait]
impl MailRelay for EmailJsClient {
    async fn send(&self, params: &TemplateParams) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.request(params))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::from_response(SERVICE, response).await);
        }

        tracing::info!(
            "Notification sent via template {} for {}",
            self.config.template_id,
            params.from_email
        );
        Ok(())
    }
}
