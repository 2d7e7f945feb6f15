//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::list_profiles::{ProfilePage, ProfileSummary};
use crate::domain::entity::form::{Form, Question};
use crate::domain::entity::profile::Profile;
use crate::domain::entity::submission::Submission;

// ============================================================================
// Profiles
// ============================================================================

/// Create profile request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub anamnesis: Option<Value>,
    pub measurements: Option<Value>,
}

/// Full profile projection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub managed_by: String,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub anamnesis: Value,
    pub measurements: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.profile_id.to_string(),
            managed_by: profile.managed_by.to_string(),
            full_name: profile.personal_data.full_name.into_db(),
            birth_date: profile.personal_data.birth_date,
            gender: profile.personal_data.gender,
            phone: profile.personal_data.phone,
            email: profile.personal_data.contact_email,
            anamnesis: profile.anamnesis,
            measurements: profile.measurements,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Raw pagination query parameters; validated in the use case
#[derive(Debug, Clone, Deserialize)]
pub struct ListProfilesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Listing projection of one profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryResponse {
    pub id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub last_update: DateTime<Utc>,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

/// One page of profiles
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileListResponse {
    pub data: Vec<ProfileSummaryResponse>,
    pub pagination: PaginationResponse,
}

impl From<ProfilePage> for ProfileListResponse {
    fn from(page: ProfilePage) -> Self {
        Self {
            data: page.data.into_iter().map(summary_response).collect(),
            pagination: PaginationResponse {
                current_page: page.current_page,
                total_pages: page.total_pages,
                total_items: page.total_items,
            },
        }
    }
}

fn summary_response(summary: ProfileSummary) -> ProfileSummaryResponse {
    ProfileSummaryResponse {
        id: summary.id,
        full_name: summary.full_name,
        email: summary.email,
        last_update: summary.last_update,
    }
}

// ============================================================================
// Forms
// ============================================================================

/// Create form request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Form projection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Form> for FormResponse {
    fn from(form: Form) -> Self {
        Self {
            id: form.form_id.to_string(),
            name: form.name,
            version: form.version,
            description: form.description,
            questions: form.questions,
            is_active: form.is_active,
            created_at: form.created_at,
            updated_at: form.updated_at,
        }
    }
}

// ============================================================================
// Submissions
// ============================================================================

/// Create submission request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub profile_id: String,
    pub form_version: String,
    pub answers: Value,
}

/// Submission projection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: String,
    pub profile_id: String,
    pub submitted_by: String,
    pub form_version: String,
    pub answers: Value,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.submission_id.to_string(),
            profile_id: submission.profile_id.to_string(),
            submitted_by: submission.submitted_by.to_string(),
            form_version: submission.form_version,
            answers: submission.answers,
            submitted_at: submission.submitted_at,
        }
    }
}
