//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_profile;
pub mod create_submission;
pub mod forms;
pub mod list_profiles;
pub mod profile_history;

// Re-exports
pub use config::ClientsConfig;
pub use create_profile::{CreateProfileInput, CreateProfileUseCase};
pub use create_submission::{CreateSubmissionInput, CreateSubmissionUseCase};
pub use forms::{CreateFormInput, CreateFormUseCase, GetFormUseCase};
pub use list_profiles::{ListProfilesInput, ListProfilesUseCase, ProfilePage, ProfileSummary};
pub use profile_history::ProfileHistoryUseCase;
