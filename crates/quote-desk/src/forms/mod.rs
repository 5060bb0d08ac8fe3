//! Quote forms: schemas, the form state container, per-form validation,
//! payload construction, and the multi-step wizard.

pub mod catalog;
pub mod payload;
pub mod router;
pub mod schema;
pub mod state;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use catalog::{form_catalog, form_for_segment, form_schema};
pub use payload::{read_payload, PayloadError, QuoteSubmission, ReceivedPayload};
pub use router::forms_router;
pub use schema::{
    FieldKind, FieldSchema, FormKey, FormSchema, KeyStyle, ListSchema, QuoteEndpoint, StepSchema,
};
pub use state::{FormStateError, ListRecord, QuoteFormState, RecordList};
pub use validation::{validate_form, validate_step, FieldIssue, ValidationPolicy};
pub use wizard::{
    ConfirmationView, Notice, NoticeKind, PendingSubmission, QuoteWizard, StepProgress,
    SubmitOutcome, WizardError, WizardPhase,
};
