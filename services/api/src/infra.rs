use metrics_exporter_prometheus::PrometheusHandle;
use quote_desk::intake::{
    AgentNotification, AgentNotifier, NotifyError, QuoteRequestRecord, QuoteRequestRepository,
    RepositoryError,
};
use quote_desk::submission::QuoteReference;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store; requests are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryQuoteRepository {
    records: Arc<Mutex<Vec<QuoteRequestRecord>>>,
}

impl InMemoryQuoteRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<QuoteRequestRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl QuoteRequestRepository for InMemoryQuoteRepository {
    fn insert(&self, record: QuoteRequestRecord) -> Result<QuoteRequestRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard
            .iter()
            .any(|existing| existing.reference == record.reference)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: QuoteRequestRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard
            .iter_mut()
            .find(|existing| existing.reference == record.reference)
        {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(
        &self,
        reference: &QuoteReference,
    ) -> Result<Option<QuoteRequestRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .find(|record| &record.reference == reference)
            .cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<QuoteRequestRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

/// Server notifier: hands each lead to the agent desk through the log and
/// keeps nothing in memory.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LoggingAgentNotifier;

impl AgentNotifier for LoggingAgentNotifier {
    fn notify(&self, notification: AgentNotification) -> Result<(), NotifyError> {
        log_notification(&notification);
        Ok(())
    }
}

fn log_notification(notification: &AgentNotification) {
    info!(
        template = %notification.template,
        reference = %notification.reference,
        form = %notification.form,
        contact = notification.details.get("contact").map(String::as_str).unwrap_or_default(),
        "agent notification queued"
    );
}

/// Records notifications for the demo run so they can be replayed at the end.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAgentNotifier {
    events: Arc<Mutex<Vec<AgentNotification>>>,
}

impl AgentNotifier for InMemoryAgentNotifier {
    fn notify(&self, notification: AgentNotification) -> Result<(), NotifyError> {
        log_notification(&notification);
        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotifyError::Transport("notifier mutex poisoned".to_string()))?;
        guard.push(notification);
        Ok(())
    }
}

impl InMemoryAgentNotifier {
    pub(crate) fn events(&self) -> Vec<AgentNotification> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// `--item` target: `vehicles.make=Ford` edits the first record,
/// `vehicles[1].make=Isuzu` the second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ItemAssignment {
    pub(crate) list: String,
    pub(crate) index: usize,
    pub(crate) attribute: String,
    pub(crate) value: String,
}

pub(crate) fn parse_field_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

pub(crate) fn parse_item_assignment(raw: &str) -> Result<ItemAssignment, String> {
    let (target, value) = parse_field_assignment(raw)?;
    let (path, attribute) = target
        .split_once('.')
        .ok_or_else(|| format!("expected LIST.ATTRIBUTE=VALUE, got '{raw}'"))?;

    let (list, index) = match path.split_once('[') {
        Some((list, rest)) => {
            let index = rest
                .strip_suffix(']')
                .and_then(|digits| digits.parse::<usize>().ok())
                .ok_or_else(|| format!("invalid record index in '{raw}'"))?;
            (list, index)
        }
        None => (path, 0),
    };

    if list.is_empty() || attribute.is_empty() {
        return Err(format!("expected LIST.ATTRIBUTE=VALUE, got '{raw}'"));
    }

    Ok(ItemAssignment {
        list: list.to_string(),
        index,
        attribute: attribute.to_string(),
        value,
    })
}
