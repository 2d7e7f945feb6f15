//! Repository Contracts
//!
//! Persistence traits for the clients bounded context. Ownership scoping
//! is part of the contract: profile reads always carry the owner.

use kernel::id::{FormId, ProfileId, UserId};

use crate::domain::entity::form::Form;
use crate::domain::entity::profile::Profile;
use crate::domain::entity::report::Report;
use crate::domain::entity::submission::Submission;
use crate::error::ClientsResult;

/// Profile persistence
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    async fn create(&self, profile: &Profile) -> ClientsResult<()>;

    /// Owner-scoped lookup; a profile of another owner is invisible
    async fn find_by_id_and_owner(
        &self,
        profile_id: &ProfileId,
        owner: &UserId,
    ) -> ClientsResult<Option<Profile>>;

    /// Owner's profiles, creation order, one page
    async fn list_by_owner(
        &self,
        owner: &UserId,
        offset: i64,
        limit: i64,
    ) -> ClientsResult<Vec<Profile>>;

    async fn count_by_owner(&self, owner: &UserId) -> ClientsResult<i64>;
}

/// Form catalogue persistence
#[trait_variant::make(FormRepository: Send)]
pub trait LocalFormRepository {
    async fn create(&self, form: &Form) -> ClientsResult<()>;

    async fn find_by_id(&self, form_id: &FormId) -> ClientsResult<Option<Form>>;
}

/// Submission persistence
#[trait_variant::make(SubmissionRepository: Send)]
pub trait LocalSubmissionRepository {
    async fn create(&self, submission: &Submission) -> ClientsResult<()>;

    async fn list_by_profile(&self, profile_id: &ProfileId) -> ClientsResult<Vec<Submission>>;
}

/// Report persistence
#[trait_variant::make(ReportRepository: Send)]
pub trait LocalReportRepository {
    async fn create(&self, report: &Report) -> ClientsResult<()>;

    /// All reports whose submission belongs to the profile
    async fn list_by_profile(&self, profile_id: &ProfileId) -> ClientsResult<Vec<Report>>;
}
