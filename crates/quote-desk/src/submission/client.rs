use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{info, warn};

use super::receipt::{extract_reference, SubmissionReceipt};
use crate::config::ClientConfig;
use crate::forms::{QuoteEndpoint, QuoteSubmission};

/// Anything that can deliver a finished submission to the backend.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn send(
        &self,
        endpoint: &QuoteEndpoint,
        submission: &QuoteSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Failure of a single submission attempt. Callers treat every variant the
/// same way: one generic notice, no retry.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("quote service unreachable: {0}")]
    Network(#[from] reqwest::Error),
    #[error("quote service answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("quote transport failed: {0}")]
    Transport(String),
}

impl SubmissionError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Status { status, .. } => Some(*status),
            SubmissionError::Network(err) => err.status().map(|status| status.as_u16()),
            SubmissionError::Transport(_) => None,
        }
    }
}

/// Posts submissions as JSON to `{base_url}/api/...`.
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSubmissionClient {
    /// `timeout` of `None` keeps reqwest's default behavior.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SubmissionError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("quote-desk/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, SubmissionError> {
        Self::new(config.base_url.clone(), config.timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &QuoteEndpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionClient {
    async fn send(
        &self,
        endpoint: &QuoteEndpoint,
        submission: &QuoteSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let url = self.url_for(endpoint);
        let response = self
            .client
            .post(&url)
            .json(submission.body())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "quote submission rejected");
            return Err(SubmissionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let reference = if text.trim().is_empty() || status == StatusCode::NO_CONTENT {
            None
        } else {
            serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| extract_reference(&body))
        };

        info!(
            %url,
            form = %submission.form(),
            reference = reference.as_ref().map(|r| r.0.as_str()).unwrap_or("-"),
            "quote submission accepted"
        );

        Ok(SubmissionReceipt { reference })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_endpoint_path() {
        let client =
            HttpSubmissionClient::new("http://quotes.internal:8080/", None).expect("client builds");
        assert_eq!(client.base_url(), "http://quotes.internal:8080");
        assert_eq!(
            client.url_for(&QuoteEndpoint::topic("commercial-auto")),
            "http://quotes.internal:8080/api/commercial-auto-quotes"
        );
        assert_eq!(
            client.url_for(&QuoteEndpoint::QuickQuotes),
            "http://quotes.internal:8080/api/quick-quotes"
        );
    }

    #[test]
    fn status_errors_expose_the_code() {
        let err = SubmissionError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(SubmissionError::Transport("offline".to_string()).status(), None);
    }
}
