//! Save editor settings as named templates and apply them to new projects.
//!
//! Exposes the merge, storage and workflow modules so integration tests and
//! the `codei` binary share one implementation.

pub mod cli_args;
pub mod config;
pub mod error;
pub mod merge;
pub mod settings;
pub mod templates;
pub mod workflow;

pub use error::CodeiError;
pub use merge::merge;
pub use settings::{LocalSettings, Settings};
pub use templates::{SaveOutcome, TemplateStore};
pub use workflow::{InitOutcome, InitPlan};
