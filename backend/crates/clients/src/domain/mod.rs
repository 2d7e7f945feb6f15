//! Domain Layer
//!
//! Entities, value objects, repository contracts and pure domain
//! services for the clients bounded context.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::form::{Form, Question, QuestionKind};
pub use entity::profile::{PersonalData, Profile};
pub use entity::report::{Report, ReportResult};
pub use entity::submission::Submission;
pub use repository::{FormRepository, ProfileRepository, ReportRepository, SubmissionRepository};
pub use services::{HistoryEvent, HistoryEventKind, generate_report, merge_history};
pub use value_object::full_name::FullName;
