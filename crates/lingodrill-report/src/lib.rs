//! lingodrill-report — Result display.
//!
//! Renders graded tests and quiz outcomes as self-contained HTML pages.

pub mod html;
pub mod run;

pub use html::{generate_html, generate_outcome_html, write_html_report};
pub use run::{RunSummary, ScoreBand};
