//! Remote HTTP backend: `POST {"diff": ...}` and read `{"message": ...}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{MessageGenerator, clean_message, map_send_error, read_success_body};
use crate::error::GenerationError;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    diff: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    message: String,
}

/// Backend that delegates message generation to a JSON HTTP service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MessageGenerator for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn generate(&self, diff: &str) -> Result<String, GenerationError> {
        debug!("POST {} ({} bytes of diff)", self.url, diff.len());

        let response = self
            .client
            .post(&self.url)
            .json(&GenerateRequest { diff })
            .send()
            .await
            .map_err(|e| map_send_error(&self.url, e))?;

        let body = read_success_body(&self.url, response).await?;

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| GenerationError::MalformedResponse {
                reason: e.to_string(),
                body: body.clone(),
            })?;

        clean_message(&parsed.message).ok_or(GenerationError::EmptyMessage)
    }
}
