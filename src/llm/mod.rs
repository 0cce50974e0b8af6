//! Commit message generation backends.
//!
//! Exactly one [`MessageGenerator`] is wired in per run. The workflow is
//! generic over it, so the choice is made once when the configuration is read.

pub mod gemini;
pub mod http;
pub mod prompt;
pub mod text;

use async_trait::async_trait;
use tracing::debug;

use crate::error::GenerationError;

pub use gemini::GeminiBackend;
pub use http::HttpBackend;
pub use prompt::build_commit_prompt;
pub use text::clean_message;

/// Produce a commit message from staged diff text.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    /// Short backend name for status output.
    fn name(&self) -> &'static str;

    /// Single request/response round trip. Never retries.
    async fn generate(&self, diff: &str) -> Result<String, GenerationError>;
}

/// Map a failed `send()` to "request setup failed" or "no response received".
pub(crate) fn map_send_error(url: &str, err: reqwest::Error) -> GenerationError {
    if err.is_builder() {
        GenerationError::RequestSetup(err.to_string())
    } else {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        GenerationError::NoResponse {
            url: url.to_string(),
            reason,
        }
    }
}

/// Read the body of a response, turning non-2xx statuses into errors.
pub(crate) async fn read_success_body(
    url: &str,
    response: reqwest::Response,
) -> Result<String, GenerationError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| map_send_error(url, e))?;

    debug!("Backend responded with {} ({} bytes)", status, body.len());

    if !status.is_success() {
        return Err(GenerationError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}
