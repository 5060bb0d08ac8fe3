use std::sync::Arc;

use async_trait::async_trait;

use super::repository::{AgentNotifier, QuoteRequestRepository};
use super::service::QuoteRequestService;
use crate::forms::{QuoteEndpoint, QuoteSubmission};
use crate::submission::{SubmissionError, SubmissionReceipt, SubmissionTransport};

/// Delivers wizard submissions straight to a local intake service, skipping
/// HTTP. Used by the CLI `submit` and `demo` commands.
pub struct InProcessTransport<R, N> {
    service: Arc<QuoteRequestService<R, N>>,
}

impl<R, N> InProcessTransport<R, N> {
    pub fn new(service: Arc<QuoteRequestService<R, N>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, N> SubmissionTransport for InProcessTransport<R, N>
where
    R: QuoteRequestRepository + 'static,
    N: AgentNotifier + 'static,
{
    async fn send(
        &self,
        endpoint: &QuoteEndpoint,
        submission: &QuoteSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        match self.service.submit(&endpoint.segment(), submission.to_json()) {
            Ok(record) => Ok(SubmissionReceipt {
                reference: Some(record.reference),
            }),
            Err(err) => Err(SubmissionError::Status {
                status: err.status_code().as_u16(),
                body: err.to_string(),
            }),
        }
    }
}
