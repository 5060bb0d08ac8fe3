//! Quote intake: the thin backend that receives wizard submissions, stores
//! them for the agent desk, and tracks follow-up status.

pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod service;
pub mod transport;

#[cfg(test)]
mod tests;

pub use domain::{ContactSummary, QuoteRequestRecord, QuoteRequestStatus, QuoteRequestView};
pub use export::{export_csv, ExportError, EXPORT_HEADERS};
pub use repository::{
    AgentNotification, AgentNotifier, NotifyError, QuoteRequestRepository, RepositoryError,
};
pub use router::{intake_router, StatusUpdate, EXPORT_LIMIT};
pub use service::{IntakeError, QuoteRequestService};
pub use transport::InProcessTransport;
