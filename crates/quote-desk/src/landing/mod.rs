//! Landing pages: one template, one data table of per-partner content.

pub mod catalog;
pub mod domain;
pub mod render;
pub mod router;

pub use catalog::{find_landing_page, landing_pages};
pub use domain::{ColorTheme, Coverage, Faq, LandingKind, LandingPage, LandingSummary};
pub use render::render_landing_html;
pub use router::landing_router;
