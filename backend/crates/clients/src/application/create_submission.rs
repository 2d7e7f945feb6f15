//! Create Submission Use Case
//!
//! Writes the submission first, then generates and writes its report.
//! The two writes are deliberately not transactional: a lost report is a
//! recoverable inconsistency, a lost submission is data loss. A report
//! failure is logged and the submission is still returned.

use std::sync::Arc;

use kernel::id::{ProfileId, UserId};
use serde_json::Value;

use crate::domain::entity::report::Report;
use crate::domain::entity::submission::Submission;
use crate::domain::repository::{ProfileRepository, ReportRepository, SubmissionRepository};
use crate::domain::services::generate_report;
use crate::error::{ClientsError, ClientsResult};

/// Create submission input
pub struct CreateSubmissionInput {
    pub profile_id: String,
    pub form_version: String,
    pub answers: Value,
}

/// Create submission use case
pub struct CreateSubmissionUseCase<P, S, R>
where
    P: ProfileRepository,
    S: SubmissionRepository,
    R: ReportRepository,
{
    profiles: Arc<P>,
    submissions: Arc<S>,
    reports: Arc<R>,
}

impl<P, S, R> CreateSubmissionUseCase<P, S, R>
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

    pub async fn execute(
        &self,
        actor: UserId,
        input: CreateSubmissionInput,
    ) -> ClientsResult<Submission> {
        let profile_id = ProfileId::parse(&input.profile_id)
            .map_err(|_| ClientsError::Validation("Invalid profile id".to_string()))?;

        // Ownership gate before any write
        let profile = self
            .profiles
            .find_by_id_and_owner(&profile_id, &actor)
            .await?
            .ok_or(ClientsError::NotProfileOwner)?;

        let submission =
            Submission::create(profile.profile_id, actor, input.form_version, input.answers)?;

        self.submissions.create(&submission).await?;

        tracing::info!(
            submission_id = %submission.submission_id,
            profile_id = %profile.profile_id,
            "Submission recorded"
        );

        match generate_report(&submission) {
            Ok(result) => {
                let report = Report::new(submission.submission_id, actor, result);
                match self.reports.create(&report).await {
                    Ok(()) => {
                        tracing::info!(
                            report_id = %report.report_id,
                            submission_id = %submission.submission_id,
                            "Report generated"
                        );
                    }
                    Err(e) => {
                        // The submission is already durable; surface the
                        // gap in the logs instead of failing the request
                        tracing::error!(
                            submission_id = %submission.submission_id,
                            error = %e,
                            "Report write failed after submission"
                        );
                    }
                }
            }
            Err(e) => {
                tracing::error!(
                    submission_id = %submission.submission_id,
                    error = %e,
                    "Report generation failed"
                );
            }
        }

        Ok(submission)
    }
}
