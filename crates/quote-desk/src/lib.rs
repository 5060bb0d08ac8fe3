//! Lead intake for an insurance brokerage's marketing site.
//!
//! [`forms`] holds the quote form schemas and the multi-step wizard,
//! [`submission`] delivers finished wizards to the backend, [`intake`] is that
//! backend, and [`landing`] renders the per-partner landing pages that embed
//! the forms.

pub mod config;
pub mod error;
pub mod forms;
pub mod intake;
pub mod landing;
pub mod submission;
pub mod telemetry;
