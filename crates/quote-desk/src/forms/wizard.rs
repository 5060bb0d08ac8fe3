//! Multi-step quote wizard.
//!
//! The wizard owns one form's state exclusively. Steps are numbered from 1
//! to N; the cursor is clamped to that range. Submission is split into
//! [`QuoteWizard::begin_submit`] and [`QuoteWizard::complete_submit`] so an
//! event-driven caller can keep the submit control disabled while a request
//! is in flight; [`QuoteWizard::submit`] runs both around one transport call.

use serde::Serialize;
use tracing::{info, warn};

use super::payload::QuoteSubmission;
use super::schema::{FormSchema, QuoteEndpoint, StepSchema};
use super::state::{FormStateError, QuoteFormState};
use super::validation::{validate_form, validate_step, FieldIssue};
use crate::submission::{QuoteReference, SubmissionError, SubmissionReceipt, SubmissionTransport};

const FAILURE_MESSAGE: &str =
    "We couldn't submit your quote request. Please check your connection and try again.";
const INVALID_MESSAGE: &str = "Please complete the highlighted fields before continuing.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPhase {
    /// Filling in `Step[current]`.
    Editing,
    Submitting,
    /// Terminal for this form instance until `submit_another`.
    Submitted { reference: Option<QuoteReference> },
    /// Back on the final step with an error notice showing.
    SubmitFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissible toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Progress indicator for the active step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepProgress {
    pub current: usize,
    pub total: usize,
    pub title: String,
    pub percent: u8,
}

/// The "thank you" panel shown in place of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    pub headline: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<QuoteReference>,
}

/// Everything a transport needs for one attempt.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub endpoint: QuoteEndpoint,
    pub submission: QuoteSubmission,
}

/// Result of a finished attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    Submitted(Option<QuoteReference>),
    Failed(SubmissionError),
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    State(#[from] FormStateError),
    #[error("step {step} has {} field(s) needing attention", .issues.len())]
    StepIncomplete { step: usize, issues: Vec<FieldIssue> },
    #[error("submission is only available on the final step (on step {current} of {total})")]
    NotOnFinalStep { current: usize, total: usize },
    #[error("{} field(s) need attention before submitting", .0.len())]
    Invalid(Vec<FieldIssue>),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("this quote request has already been submitted")]
    AlreadySubmitted,
    #[error("no submission is pending")]
    NoPendingSubmission,
    #[error("nothing has been submitted yet")]
    NotSubmitted,
}

#[derive(Debug, Clone)]
pub struct QuoteWizard {
    schema: FormSchema,
    state: QuoteFormState,
    step: usize,
    phase: WizardPhase,
    notice: Option<Notice>,
    source_page: Option<String>,
}

impl QuoteWizard {
    pub fn new(schema: FormSchema) -> Self {
        let state = QuoteFormState::for_schema(&schema);
        Self {
            schema,
            state,
            step: 1,
            phase: WizardPhase::Editing,
            notice: None,
            source_page: None,
        }
    }

    /// Tag submissions with the landing page the form is embedded in.
    pub fn with_source_page(mut self, slug: impl Into<String>) -> Self {
        self.source_page = Some(slug.into());
        self
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &QuoteFormState {
        &self.state
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn step_count(&self) -> usize {
        self.schema.step_count().max(1)
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.step_count()
    }

    pub fn active_step(&self) -> Option<&StepSchema> {
        self.schema.step_at(self.step)
    }

    pub fn progress(&self) -> StepProgress {
        let total = self.step_count();
        let percent = ((self.step * 100) / total).min(100) as u8;
        StepProgress {
            current: self.step,
            total,
            title: self
                .active_step()
                .map(|step| step.title.clone())
                .unwrap_or_default(),
            percent,
        }
    }

    /// Issues on the active step under this form's validation policy.
    pub fn step_issues(&self) -> Vec<FieldIssue> {
        validate_step(&self.schema, &self.state, self.step)
    }

    pub fn update_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.state.update_field(name, value);
    }

    pub fn add_list_item(&mut self, list: &str) -> Result<usize, WizardError> {
        Ok(self.state.add_list_item(list)?)
    }

    pub fn remove_list_item(&mut self, list: &str, index: usize) -> Result<bool, WizardError> {
        Ok(self.state.remove_list_item(list, index)?)
    }

    pub fn update_list_field(
        &mut self,
        list: &str,
        index: usize,
        attribute: &str,
        value: impl Into<String>,
    ) -> Result<(), WizardError> {
        Ok(self.state.update_list_field(list, index, attribute, value)?)
    }

    /// Move forward one step; a no-op on the last step or outside editing.
    pub fn advance(&mut self) -> Result<usize, WizardError> {
        if !self.is_editable() || self.is_final_step() {
            return Ok(self.step);
        }

        if self.schema.gate_steps {
            let issues = self.step_issues();
            if !issues.is_empty() {
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    message: INVALID_MESSAGE.to_string(),
                });
                return Err(WizardError::StepIncomplete {
                    step: self.step,
                    issues,
                });
            }
        }

        self.step += 1;
        self.leave_failed_state();
        Ok(self.step)
    }

    /// Move back one step; a no-op on the first step or outside editing.
    pub fn retreat(&mut self) -> usize {
        if self.is_editable() && self.step > 1 {
            self.step -= 1;
            self.leave_failed_state();
        }
        self.step
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        if self.phase == WizardPhase::SubmitFailed {
            self.phase = WizardPhase::Editing;
        }
    }

    /// Validate and freeze the payload, entering `Submitting`.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, WizardError> {
        match self.phase {
            WizardPhase::Submitting => return Err(WizardError::SubmissionInFlight),
            WizardPhase::Submitted { .. } => return Err(WizardError::AlreadySubmitted),
            WizardPhase::Editing | WizardPhase::SubmitFailed => {}
        }

        if !self.is_final_step() {
            return Err(WizardError::NotOnFinalStep {
                current: self.step,
                total: self.step_count(),
            });
        }

        let issues = validate_form(&self.schema, &self.state);
        if !issues.is_empty() {
            self.notice = Some(Notice {
                kind: NoticeKind::Error,
                message: INVALID_MESSAGE.to_string(),
            });
            return Err(WizardError::Invalid(issues));
        }

        let submission =
            QuoteSubmission::from_state(&self.schema, &self.state, self.source_page.as_deref());
        self.phase = WizardPhase::Submitting;
        self.notice = None;

        Ok(PendingSubmission {
            endpoint: self.schema.endpoint.clone(),
            submission,
        })
    }

    /// Apply the transport's answer to a pending submission.
    pub fn complete_submit(
        &mut self,
        result: Result<SubmissionReceipt, SubmissionError>,
    ) -> Result<SubmitOutcome, WizardError> {
        if self.phase != WizardPhase::Submitting {
            return Err(WizardError::NoPendingSubmission);
        }

        match result {
            Ok(receipt) => {
                info!(
                    form = %self.schema.key,
                    reference = receipt.reference.as_ref().map(|r| r.0.as_str()).unwrap_or("-"),
                    "quote wizard submitted"
                );
                self.state.reset();
                self.phase = WizardPhase::Submitted {
                    reference: receipt.reference.clone(),
                };
                self.notice = Some(Notice {
                    kind: NoticeKind::Success,
                    message: "Your quote request was received.".to_string(),
                });
                Ok(SubmitOutcome::Submitted(receipt.reference))
            }
            Err(err) => {
                warn!(form = %self.schema.key, error = %err, "quote wizard submission failed");
                self.phase = WizardPhase::SubmitFailed;
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    message: FAILURE_MESSAGE.to_string(),
                });
                Ok(SubmitOutcome::Failed(err))
            }
        }
    }

    /// One attempt: no retry, no idempotency key.
    pub async fn submit<T>(&mut self, transport: &T) -> Result<SubmitOutcome, WizardError>
    where
        T: SubmissionTransport + ?Sized,
    {
        let pending = self.begin_submit()?;
        let result = transport
            .send(&pending.endpoint, &pending.submission)
            .await;
        self.complete_submit(result)
    }

    /// Start over from `Step[1]` after a successful submission.
    pub fn submit_another(&mut self) -> Result<(), WizardError> {
        if !matches!(self.phase, WizardPhase::Submitted { .. }) {
            return Err(WizardError::NotSubmitted);
        }
        self.state.reset();
        self.step = 1;
        self.phase = WizardPhase::Editing;
        self.notice = None;
        Ok(())
    }

    pub fn confirmation(&self) -> Option<ConfirmationView> {
        let WizardPhase::Submitted { reference } = &self.phase else {
            return None;
        };

        let message = match reference {
            Some(reference) => format!(
                "Thanks! An agent will follow up shortly. Your reference number is {reference}."
            ),
            None => "Thanks! An agent will follow up shortly.".to_string(),
        };

        Some(ConfirmationView {
            headline: format!("{} request received", self.schema.title),
            message,
            reference: reference.clone(),
        })
    }

    fn is_editable(&self) -> bool {
        matches!(self.phase, WizardPhase::Editing | WizardPhase::SubmitFailed)
    }

    fn leave_failed_state(&mut self) {
        if self.phase == WizardPhase::SubmitFailed {
            self.phase = WizardPhase::Editing;
        }
    }
}
