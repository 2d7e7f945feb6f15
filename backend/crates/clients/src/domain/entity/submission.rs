//! Submission Entity
//!
//! A filled-in form for a profile. Immutable after creation.

use chrono::{DateTime, Utc};
use kernel::id::{ProfileId, SubmissionId, UserId};
use serde_json::Value;

use crate::error::{ClientsError, ClientsResult};

/// Submission entity
#[derive(Debug, Clone)]
pub struct Submission {
    pub submission_id: SubmissionId,
    pub profile_id: ProfileId,
    pub submitted_by: UserId,
    /// Version string of the form that was answered
    pub form_version: String,
    /// Answer map keyed by question, JSON object
    pub answers: Value,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    pub fn create(
        profile_id: ProfileId,
        submitted_by: UserId,
        form_version: String,
        answers: Value,
    ) -> ClientsResult<Self> {
        let form_version = form_version.trim().to_string();
        if form_version.is_empty() {
            return Err(ClientsError::Validation(
                "Form version cannot be empty".to_string(),
            ));
        }

        if !answers.is_object() {
            return Err(ClientsError::Validation(
                "Answers must be a JSON object".to_string(),
            ));
        }

        let now = Utc::now();

        Ok(Self {
            submission_id: SubmissionId::new(),
            profile_id,
            submitted_by,
            form_version,
            answers,
            submitted_at: now,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answers_must_be_an_object() {
        let result = Submission::create(
            ProfileId::new(),
            UserId::new(),
            "checkin-v1".to_string(),
            json!(["not", "an", "object"]),
        );
        assert!(matches!(result, Err(ClientsError::Validation(_))));
    }

    #[test]
    fn test_blank_form_version_rejected() {
        let result = Submission::create(
            ProfileId::new(),
            UserId::new(),
            "  ".to_string(),
            json!({}),
        );
        assert!(matches!(result, Err(ClientsError::Validation(_))));
    }
}
