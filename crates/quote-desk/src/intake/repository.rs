use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::QuoteRequestRecord;
use crate::forms::FormKey;
use crate::submission::QuoteReference;

/// Storage abstraction so the intake service can be exercised in isolation.
pub trait QuoteRequestRepository: Send + Sync {
    fn insert(&self, record: QuoteRequestRecord) -> Result<QuoteRequestRecord, RepositoryError>;
    fn update(&self, record: QuoteRequestRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, reference: &QuoteReference)
        -> Result<Option<QuoteRequestRecord>, RepositoryError>;
    /// Newest first.
    fn recent(&self, limit: usize) -> Result<Vec<QuoteRequestRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook that tells the agent desk a lead arrived (e-mail, CRM, chat).
pub trait AgentNotifier: Send + Sync {
    fn notify(&self, notification: AgentNotification) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentNotification {
    pub template: String,
    pub reference: QuoteReference,
    pub form: FormKey,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
