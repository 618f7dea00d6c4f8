//! Audit layer
//!
//! Reads `composer.json` and `composer.lock`, checks every requested locked
//! package against the registry and renders the outcome.
//!
//! # Modules
//!
//! - [`runner`]: Manifest loading, package selection and bounded fan-out
//! - [`report`]: Table and PHP range rendering
//! - [`error`]: Fatal errors that abort a run

pub mod error;
pub mod report;
pub mod runner;

pub use error::AuditError;
pub use runner::{AuditReport, run};
