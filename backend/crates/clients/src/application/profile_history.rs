//! Profile History Use Case
//!
//! Ownership is checked before anything else; a missing profile and a
//! profile of another owner are both a plain not-found. Submissions and
//! reports are then read concurrently and merged into one feed.

use std::sync::Arc;

use kernel::id::{ProfileId, UserId};

use crate::domain::repository::{ProfileRepository, ReportRepository, SubmissionRepository};
use crate::domain::services::{HistoryEvent, merge_history};
use crate::error::{ClientsError, ClientsResult};

/// Profile history use case
pub struct ProfileHistoryUseCase<P, S, R>
where
    P: ProfileRepository,
    S: SubmissionRepository,
    R: ReportRepository,
{
    profiles: Arc<P>,
    submissions: Arc<S>,
    reports: Arc<R>,
}

impl<P, S, R> ProfileHistoryUseCase<P, S, R>
where
    P: ProfileRepository,
    S: SubmissionRepository,
    R: ReportRepository,
{
    pub fn new(profiles: Arc<P>, submissions: Arc<S>, reports: Arc<R>) -> Self {
        Self {
            profiles,
            submissions,
            reports,
        }
    }

    pub async fn execute(&self, owner: UserId, profile_id: &str) -> ClientsResult<Vec<HistoryEvent>> {
        // A malformed id cannot name any profile
        let profile_id =
            ProfileId::parse(profile_id).map_err(|_| ClientsError::ProfileNotFound)?;

        self.profiles
            .find_by_id_and_owner(&profile_id, &owner)
            .await?
            .ok_or(ClientsError::ProfileNotFound)?;

        let (submissions, reports) = tokio::try_join!(
            self.submissions.list_by_profile(&profile_id),
            self.reports.list_by_profile(&profile_id),
        )?;

        Ok(merge_history(&submissions, &reports))
    }
}
