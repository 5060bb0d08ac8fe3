use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, warn};

use super::domain::{ContactSummary, QuoteRequestRecord, QuoteRequestStatus};
use super::export::{export_csv, ExportError};
use super::repository::{
    AgentNotification, AgentNotifier, QuoteRequestRepository, RepositoryError,
};
use crate::config::IntakeConfig;
use crate::forms::{
    form_for_segment, read_payload, validate_form, FieldIssue, FormKey, PayloadError,
};
use crate::submission::QuoteReference;

/// Service composing form lookup, validation, storage, and agent notification.
pub struct QuoteRequestService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    reference_prefix: String,
    sequence: AtomicU64,
    // Serializes read-check-write of status changes.
    transitions: Mutex<()>,
}

impl<R, N> QuoteRequestService<R, N>
where
    R: QuoteRequestRepository + 'static,
    N: AgentNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, config: IntakeConfig) -> Self {
        Self {
            repository,
            notifier,
            reference_prefix: config.reference_prefix,
            sequence: AtomicU64::new(1),
            transitions: Mutex::new(()),
        }
    }

    /// Accept one posted body for `/api/{endpoint}`.
    ///
    /// Every accepted call stores a new request; repeated bodies are not
    /// deduplicated.
    pub fn submit(&self, endpoint: &str, payload: Value) -> Result<QuoteRequestRecord, IntakeError> {
        self.submit_at(endpoint, payload, Utc::now())
    }

    pub(crate) fn submit_at(
        &self,
        endpoint: &str,
        payload: Value,
        received_at: DateTime<Utc>,
    ) -> Result<QuoteRequestRecord, IntakeError> {
        let schema = form_for_segment(endpoint)
            .ok_or_else(|| IntakeError::UnknownEndpoint(endpoint.to_string()))?;

        let received = read_payload(&schema, &payload)?;
        let issues = validate_form(&schema, &received.state);
        if !issues.is_empty() {
            warn!(form = %schema.key, issues = issues.len(), "quote request failed validation");
            return Err(IntakeError::Invalid {
                form: schema.key,
                issues,
            });
        }

        let record = QuoteRequestRecord {
            reference: self.next_reference(received_at),
            form: schema.key,
            endpoint: schema.endpoint.path(),
            received_at,
            status: QuoteRequestStatus::Received,
            contact: ContactSummary::from_state(&received.state),
            source_page: received.source_page,
            payload,
        };

        let stored = self.repository.insert(record)?;
        info!(
            reference = %stored.reference,
            form = %stored.form,
            "quote request received"
        );

        self.notify_agents(&stored);
        Ok(stored)
    }

    /// Fetch a stored request for status checks.
    pub fn get(&self, reference: &QuoteReference) -> Result<QuoteRequestRecord, IntakeError> {
        let record = self
            .repository
            .fetch(reference)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Move a request forward in the follow-up queue.
    pub fn update_status(
        &self,
        reference: &QuoteReference,
        status: QuoteRequestStatus,
    ) -> Result<QuoteRequestRecord, IntakeError> {
        let _transition = self.transitions.lock().map_err(|_| {
            RepositoryError::Unavailable("status transition lock poisoned".to_string())
        })?;
        let mut record = self.get(reference)?;
        if !record.status.can_move_to(status) {
            return Err(IntakeError::InvalidTransition {
                from: record.status,
                to: status,
            });
        }

        record.status = status;
        self.repository.update(record.clone())?;
        info!(reference = %record.reference, status = status.label(), "quote request updated");
        Ok(record)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<QuoteRequestRecord>, IntakeError> {
        Ok(self.repository.recent(limit)?)
    }

    /// CSV of the most recent requests for the agent desk.
    pub fn export(&self, limit: usize) -> Result<String, IntakeError> {
        let records = self.repository.recent(limit)?;
        Ok(export_csv(&records)?)
    }

    fn next_reference(&self, received_at: DateTime<Utc>) -> QuoteReference {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        QuoteReference(format!(
            "{}-{}-{sequence:06}",
            self.reference_prefix,
            received_at.format("%Y%m%d")
        ))
    }

    // The request is already stored; a failed notification must not make
    // the client resubmit.
    fn notify_agents(&self, record: &QuoteRequestRecord) {
        let mut details = BTreeMap::new();
        details.insert(
            "contact".to_string(),
            record.contact.display_name().to_string(),
        );
        if let Some(email) = &record.contact.email {
            details.insert("email".to_string(), email.clone());
        }
        if let Some(phone) = &record.contact.phone {
            details.insert("phone".to_string(), phone.clone());
        }
        if let Some(page) = &record.source_page {
            details.insert("source_page".to_string(), page.clone());
        }

        let notification = AgentNotification {
            template: "new_quote_request".to_string(),
            reference: record.reference.clone(),
            form: record.form,
            details,
        };

        if let Err(err) = self.notifier.notify(notification) {
            warn!(reference = %record.reference, error = %err, "agent notification failed");
        }
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("no quote form accepts submissions at /api/{0}")]
    UnknownEndpoint(String),
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("{form} request has {} field(s) needing attention", .issues.len())]
    Invalid { form: FormKey, issues: Vec<FieldIssue> },
    #[error("cannot move a request from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        from: QuoteRequestStatus,
        to: QuoteRequestStatus,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl IntakeError {
    /// HTTP status the intake endpoints answer with for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            IntakeError::UnknownEndpoint(_) | IntakeError::Repository(RepositoryError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            IntakeError::Payload(_) => StatusCode::BAD_REQUEST,
            IntakeError::Invalid { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            IntakeError::InvalidTransition { .. }
            | IntakeError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            IntakeError::Repository(RepositoryError::Unavailable(_)) | IntakeError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
