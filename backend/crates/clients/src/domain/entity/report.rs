//! Report Entity
//!
//! The outcome of processing one submission. Generated synchronously at
//! submission time and never regenerated.

use chrono::{DateTime, Utc};
use kernel::id::{ReportId, SubmissionId, UserId};
use serde::{Deserialize, Serialize};

/// Structured result of report generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub content: String,
    pub score: i64,
    pub summary: String,
}

/// Report entity
#[derive(Debug, Clone)]
pub struct Report {
    pub report_id: ReportId,
    pub submission_id: SubmissionId,
    pub generated_by: UserId,
    pub result: ReportResult,
    pub generated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Report {
    pub fn new(submission_id: SubmissionId, generated_by: UserId, result: ReportResult) -> Self {
        let now = Utc::now();

        Self {
            report_id: ReportId::new(),
            submission_id,
            generated_by,
            result,
            generated_at: now,
            created_at: now,
            updated_at: now,
        }
    }
}
