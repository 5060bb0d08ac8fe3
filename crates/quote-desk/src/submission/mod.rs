//! Submission Client: turns a finished wizard into one outbound request.

pub mod client;
pub mod receipt;

pub use client::{HttpSubmissionClient, SubmissionError, SubmissionTransport};
pub use receipt::{extract_reference, QuoteReference, SubmissionReceipt};
