//! The Project/Library/Document model (spec.md §3, §4.3, §4.4).

pub mod document;
pub mod library;
#[allow(clippy::module_inception)]
mod project;

pub use document::{Document, EditRange};
pub use library::Library;
pub use project::{AddDocumentOutcome, Project};
