use std::sync::Mutex;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::forms::schema::{
    FieldKind, FieldSchema, FormKey, FormSchema, ListSchema, QuoteEndpoint, StepSchema,
};
use crate::forms::validation::ValidationPolicy;
use crate::forms::{form_schema, QuoteSubmission, QuoteWizard};
use crate::submission::{QuoteReference, SubmissionError, SubmissionReceipt, SubmissionTransport};

/// Canned answer for [`RecordingTransport`].
pub(super) enum Reply {
    Accept(Option<&'static str>),
    Reject(u16),
}

/// Records every payload it is asked to send.
pub(super) struct RecordingTransport {
    reply: Reply,
    sent: Mutex<Vec<(QuoteEndpoint, Value)>>,
}

impl RecordingTransport {
    pub(super) fn accepting(reference: &'static str) -> Self {
        Self::with_reply(Reply::Accept(Some(reference)))
    }

    pub(super) fn rejecting(status: u16) -> Self {
        Self::with_reply(Reply::Reject(status))
    }

    pub(super) fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn sent(&self) -> Vec<(QuoteEndpoint, Value)> {
        self.sent.lock().expect("sent mutex").clone()
    }
}

#[async_trait]
impl SubmissionTransport for RecordingTransport {
    async fn send(
        &self,
        endpoint: &QuoteEndpoint,
        submission: &QuoteSubmission,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.sent
            .lock()
            .expect("sent mutex")
            .push((endpoint.clone(), submission.to_json()));
        match self.reply {
            Reply::Accept(reference) => Ok(SubmissionReceipt {
                reference: reference.map(|value| QuoteReference(value.to_string())),
            }),
            Reply::Reject(status) => Err(SubmissionError::Status {
                status,
                body: "upstream unavailable".to_string(),
            }),
        }
    }
}

/// Two steps, one vehicle by default, no enforced validation.
pub(super) fn two_step_schema() -> FormSchema {
    FormSchema::new(FormKey::CommercialAuto, QuoteEndpoint::topic("commercial-auto"))
        .step(
            StepSchema::new("Business")
                .field(FieldSchema::text("business_name", "Business Name").required())
                .field(FieldSchema::new("email", "Email", FieldKind::Email).required()),
        )
        .step(StepSchema::new("Vehicles").list("vehicles"))
        .list(ListSchema::new(
            "vehicles",
            "Vehicle",
            vec![
                FieldSchema::text("year", "Year"),
                FieldSchema::text("make", "Make"),
                FieldSchema::text("model", "Model"),
                FieldSchema::text("vin", "VIN"),
            ],
        ))
}

pub(super) fn gated_schema() -> FormSchema {
    two_step_schema()
        .validation(ValidationPolicy::Schema)
        .gated()
}

/// Walk the commercial auto wizard to its last step with every required
/// input filled in.
pub(super) fn completed_commercial_auto() -> QuoteWizard {
    let mut wizard = QuoteWizard::new(form_schema(FormKey::CommercialAuto));

    wizard.update_field("business_name", "Lone Star Hauling LLC");
    wizard.update_field("business_type", "LLC");
    wizard.update_field("years_in_business", "7");
    wizard.update_field("usdot_number", "3141592");
    wizard.advance().expect("ungated");

    wizard.update_field("contact_name", "Rosa Delgado");
    wizard.update_field("email", "rosa@lonestarhauling.com");
    wizard.update_field("phone", "512-555-0147");
    wizard.update_field("zip_code", "78741");
    wizard.advance().expect("ungated");

    for (index, (year, make, model)) in [("2021", "Ford", "F-250"), ("2019", "Isuzu", "NPR")]
        .into_iter()
        .enumerate()
    {
        if index > 0 {
            wizard.add_list_item("vehicles").expect("vehicles list");
        }
        wizard
            .update_list_field("vehicles", index, "year", year)
            .expect("year attribute");
        wizard
            .update_list_field("vehicles", index, "make", make)
            .expect("make attribute");
        wizard
            .update_list_field("vehicles", index, "model", model)
            .expect("model attribute");
    }
    wizard.advance().expect("ungated");

    for (attribute, value) in [
        ("first_name", "Rosa"),
        ("last_name", "Delgado"),
        ("date_of_birth", "1984-03-02"),
        ("license_number", "TX0042117"),
        ("license_state", "TX"),
    ] {
        wizard
            .update_list_field("drivers", 0, attribute, value)
            .expect("driver attribute");
    }
    wizard.advance().expect("ungated");

    wizard.update_field("liability_limit", "$1,000,000 CSL");
    wizard.update_field("cargo_coverage", "$100,000");
    wizard.advance().expect("ungated");

    wizard.update_field("effective_date", "2026-11-01");
    wizard
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
