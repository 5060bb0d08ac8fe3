use crate::config::ConfigError;
use crate::forms::WizardError;
use crate::intake::IntakeError;
use crate::submission::SubmissionError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Submission(SubmissionError),
    Wizard(WizardError),
    Intake(IntakeError),
    UnknownForm(String),
    UnknownLandingPage(String),
    InvalidArgument(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Submission(err) => write!(f, "submission error: {}", err),
            AppError::Wizard(err) => write!(f, "quote form error: {}", err),
            AppError::Intake(err) => write!(f, "intake error: {}", err),
            AppError::UnknownForm(form) => write!(f, "unknown quote form '{}'", form),
            AppError::UnknownLandingPage(slug) => write!(f, "unknown landing page '{}'", slug),
            AppError::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Wizard(err) => Some(err),
            AppError::Intake(err) => Some(err),
            AppError::UnknownForm(_)
            | AppError::UnknownLandingPage(_)
            | AppError::InvalidArgument(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Intake(err) => err.status_code(),
            AppError::UnknownForm(_) | AppError::UnknownLandingPage(_) => StatusCode::NOT_FOUND,
            AppError::Wizard(_) | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::Submission(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<WizardError> for AppError {
    fn from(value: WizardError) -> Self {
        Self::Wizard(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::RepositoryError;

    #[test]
    fn intake_errors_keep_their_status() {
        let response = AppError::from(IntakeError::Repository(RepositoryError::NotFound)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::UnknownLandingPage("yachts".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn display_names_the_failing_layer() {
        let err = AppError::from(SubmissionError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "submission error: quote service answered 502: bad gateway"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
