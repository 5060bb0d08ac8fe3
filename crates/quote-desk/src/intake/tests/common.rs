use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::response::Response;
use serde_json::{json, Value};

use crate::config::IntakeConfig;
use crate::intake::domain::QuoteRequestRecord;
use crate::intake::repository::{
    AgentNotification, AgentNotifier, NotifyError, QuoteRequestRepository, RepositoryError,
};
use crate::intake::QuoteRequestService;
use crate::submission::QuoteReference;

pub(super) fn intake_config() -> IntakeConfig {
    IntakeConfig {
        reference_prefix: "IQ".to_string(),
    }
}

pub(super) fn build_service() -> (
    QuoteRequestService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = QuoteRequestService::new(repository.clone(), notifier.clone(), intake_config());
    (service, repository, notifier)
}

/// A complete quick-quote body as the wizard would post it.
pub(super) fn quick_quote_payload() -> Value {
    json!({
        "formType": "quick-quote",
        "fullName": "Dana Whitfield",
        "email": "dana@whitfieldbakery.com",
        "phone": "(515) 555-0182",
        "insuranceType": "General Liability",
        "zipCode": "50309",
        "sourcePage": "bakeries",
    })
}

/// A workers' comp body with two employee classes, in snake_case keys.
pub(super) fn workers_comp_payload() -> Value {
    json!({
        "form_type": "workers-comp",
        "business_name": "Prairie Roofing",
        "business_type": "LLC",
        "years_in_business": 12,
        "contact_name": "Luis Ortega",
        "email": "luis@prairieroofing.com",
        "phone": "515-555-0110",
        "employee_classes": [
            { "class_code": "5551", "description": "Roofers", "employee_count": 8, "annual_payroll": 420000 },
            { "class_code": "8810", "description": "Clerical", "employee_count": 2, "annual_payroll": 95000 }
        ],
    })
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<QuoteRequestRecord>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl QuoteRequestRepository for MemoryRepository {
    fn insert(&self, record: QuoteRequestRecord) -> Result<QuoteRequestRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.reference == record.reference) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: QuoteRequestRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.reference == record.reference)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record;
        Ok(())
    }

    fn fetch(
        &self,
        reference: &QuoteReference,
    ) -> Result<Option<QuoteRequestRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.reference == reference).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<QuoteRequestRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    events: Mutex<Vec<AgentNotification>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<AgentNotification> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl AgentNotifier for MemoryNotifier {
    fn notify(&self, notification: AgentNotification) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl AgentNotifier for OfflineNotifier {
    fn notify(&self, _notification: AgentNotification) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp relay offline".to_string()))
    }
}

/// Holds every lookup long enough for a second caller to run alongside it.
#[derive(Default)]
pub(super) struct SlowFetchRepository {
    inner: MemoryRepository,
}

impl QuoteRequestRepository for SlowFetchRepository {
    fn insert(&self, record: QuoteRequestRecord) -> Result<QuoteRequestRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: QuoteRequestRecord) -> Result<(), RepositoryError> {
        self.inner.update(record)
    }

    fn fetch(
        &self,
        reference: &QuoteReference,
    ) -> Result<Option<QuoteRequestRecord>, RepositoryError> {
        let record = self.inner.fetch(reference);
        thread::sleep(Duration::from_millis(30));
        record
    }

    fn recent(&self, limit: usize) -> Result<Vec<QuoteRequestRecord>, RepositoryError> {
        self.inner.recent(limit)
    }
}

pub(super) struct UnavailableRepository;

impl QuoteRequestRepository for UnavailableRepository {
    fn insert(&self, _record: QuoteRequestRecord) -> Result<QuoteRequestRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: QuoteRequestRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(
        &self,
        _reference: &QuoteReference,
    ) -> Result<Option<QuoteRequestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<QuoteRequestRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).expect("json payload")
}
