use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forms::{FormKey, QuoteFormState};
use crate::submission::QuoteReference;

/// Where a lead sits in the agent desk's follow-up queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteRequestStatus {
    Received,
    Assigned,
    Quoted,
    Closed,
}

impl QuoteRequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            QuoteRequestStatus::Received => "received",
            QuoteRequestStatus::Assigned => "assigned",
            QuoteRequestStatus::Quoted => "quoted",
            QuoteRequestStatus::Closed => "closed",
        }
    }

    /// Statuses only move forward.
    pub fn can_move_to(self, next: QuoteRequestStatus) -> bool {
        self.rank() < next.rank()
    }

    const fn rank(self) -> u8 {
        match self {
            QuoteRequestStatus::Received => 0,
            QuoteRequestStatus::Assigned => 1,
            QuoteRequestStatus::Quoted => 2,
            QuoteRequestStatus::Closed => 3,
        }
    }
}

/// Who to call back, pulled from whichever contact fields the form has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub business: Option<String>,
}

impl ContactSummary {
    pub fn from_state(state: &QuoteFormState) -> Self {
        let pick = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| state.field(name))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .map(str::to_string)
        };

        let split_name = match (pick(&["first_name"]), pick(&["last_name"])) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (first, last) => first.or(last),
        };

        Self {
            name: pick(&["contact_name", "full_name"]).or(split_name),
            email: pick(&["email"]),
            phone: pick(&["phone"]),
            business: pick(&["business_name", "dba_name"]),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.business.as_deref())
            .unwrap_or("unknown contact")
    }
}

/// One stored lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequestRecord {
    pub reference: QuoteReference,
    pub form: FormKey,
    pub endpoint: String,
    pub received_at: DateTime<Utc>,
    pub status: QuoteRequestStatus,
    pub contact: ContactSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_page: Option<String>,
    /// The body exactly as it was posted.
    pub payload: Value,
}

impl QuoteRequestRecord {
    pub fn status_view(&self) -> QuoteRequestView {
        QuoteRequestView {
            reference_number: self.reference.clone(),
            form: self.form,
            status: self.status.label(),
            received_at: self.received_at,
            contact_name: self.contact.display_name().to_string(),
        }
    }
}

/// Public acknowledgment / status payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequestView {
    pub reference_number: QuoteReference,
    pub form: FormKey,
    pub status: &'static str,
    pub received_at: DateTime<Utc>,
    pub contact_name: String,
}
