//! Domain Services
//!
//! Pure functions: report generation over a submission, and the merge
//! of submissions and reports into one history feed. No I/O here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::entity::report::{Report, ReportResult};
use crate::domain::entity::submission::Submission;
use crate::error::{ClientsError, ClientsResult};

/// Points awarded per answered question
const POINTS_PER_ANSWER: i64 = 10;

/// Generate the report for a submission.
///
/// Total for every submission whose answers form a JSON object; an empty
/// object scores zero. The scoring rule is deliberately trivial for now.
pub fn generate_report(submission: &Submission) -> ClientsResult<ReportResult> {
    let answers = submission.answers.as_object().ok_or_else(|| {
        ClientsError::InvalidSubmission("Answers must be a JSON object".to_string())
    })?;

    let answered = answers.len();

    Ok(ReportResult {
        content: format!(
            "Relatório gerado para a submissão {} com base nas respostas fornecidas.",
            submission.submission_id
        ),
        score: answered as i64 * POINTS_PER_ANSWER,
        summary: format!("{} resposta(s) processada(s)", answered),
    })
}

/// What produced a history event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryEventKind {
    Submission,
    Report,
}

/// One entry of a profile's history feed
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HistoryEventKind,
    pub date: DateTime<Utc>,
    pub details: Value,
}

/// Merge submissions and reports into one feed, newest first. Events on
/// the same instant are ordered by id so the feed is stable.
pub fn merge_history(submissions: &[Submission], reports: &[Report]) -> Vec<HistoryEvent> {
    let mut events = Vec::with_capacity(submissions.len() + reports.len());

    for submission in submissions {
        events.push(HistoryEvent {
            id: submission.submission_id.to_string(),
            kind: HistoryEventKind::Submission,
            date: submission.submitted_at,
            details: json!({ "formVersion": submission.form_version }),
        });
    }

    for report in reports {
        events.push(HistoryEvent {
            id: report.report_id.to_string(),
            kind: HistoryEventKind::Report,
            date: report.generated_at,
            details: json!({ "submissionId": report.submission_id.to_string() }),
        });
    }

    events.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    events
}
