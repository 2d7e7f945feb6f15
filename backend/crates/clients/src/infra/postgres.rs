//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{FormId, ProfileId, ReportId, SubmissionId, UserId};

use crate::domain::entity::form::{Form, Question};
use crate::domain::entity::profile::{PersonalData, Profile};
use crate::domain::entity::report::{Report, ReportResult};
use crate::domain::entity::submission::Submission;
use crate::domain::repository::{
    FormRepository, ProfileRepository, ReportRepository, SubmissionRepository,
};
use crate::domain::value_object::full_name::FullName;
use crate::error::{ClientsError, ClientsResult};

// ============================================================================
// Profiles
// ============================================================================

const PROFILE_COLUMNS: &str = r#"
    profile_id,
    managed_by,
    full_name,
    birth_date,
    gender,
    phone,
    contact_email,
    anamnesis,
    measurements,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileRepository for PgProfileRepository {
    async fn create(&self, profile: &Profile) -> ClientsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (
                profile_id,
                managed_by,
                full_name,
                birth_date,
                gender,
                phone,
                contact_email,
                anamnesis,
                measurements,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(profile.profile_id.as_uuid())
        .bind(profile.managed_by.as_uuid())
        .bind(profile.personal_data.full_name.as_str())
        .bind(profile.personal_data.birth_date)
        .bind(profile.personal_data.gender.as_deref())
        .bind(profile.personal_data.phone.as_deref())
        .bind(profile.personal_data.contact_email.as_deref())
        .bind(&profile.anamnesis)
        .bind(&profile.measurements)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id_and_owner(
        &self,
        profile_id: &ProfileId,
        owner: &UserId,
    ) -> ClientsResult<Option<Profile>> {
        let query = format!(
            "SELECT {} FROM profiles WHERE profile_id = $1 AND managed_by = $2",
            PROFILE_COLUMNS
        );

        let row = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(profile_id.as_uuid())
            .bind(owner.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(ProfileRow::into_profile))
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        offset: i64,
        limit: i64,
    ) -> ClientsResult<Vec<Profile>> {
        let query = format!(
            r#"
            SELECT {} FROM profiles
            WHERE managed_by = $1
            ORDER BY created_at ASC, profile_id ASC
            LIMIT $2 OFFSET $3
            "#,
            PROFILE_COLUMNS
        );

        let rows = sqlx::query_as::<_, ProfileRow>(&query)
            .bind(owner.as_uuid())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ProfileRow::into_profile).collect())
    }

    async fn count_by_owner(&self, owner: &UserId) -> ClientsResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE managed_by = $1")
            .bind(owner.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    profile_id: Uuid,
    managed_by: Uuid,
    full_name: String,
    birth_date: Option<NaiveDate>,
    gender: Option<String>,
    phone: Option<String>,
    contact_email: Option<String>,
    anamnesis: serde_json::Value,
    measurements: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        Profile {
            profile_id: ProfileId::from_uuid(self.profile_id),
            managed_by: UserId::from_uuid(self.managed_by),
            personal_data: PersonalData {
                full_name: FullName::from_db(self.full_name),
                birth_date: self.birth_date,
                gender: self.gender,
                phone: self.phone,
                contact_email: self.contact_email,
            },
            anamnesis: self.anamnesis,
            measurements: self.measurements,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ============================================================================
// Forms
// ============================================================================

const FORM_COLUMNS: &str = r#"
    form_id,
    name,
    version,
    description,
    questions,
    is_active,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed form repository
#[derive(Clone)]
pub struct PgFormRepository {
    pool: PgPool,
}

impl PgFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl FormRepository for PgFormRepository {
    async fn create(&self, form: &Form) -> ClientsResult<()> {
        let questions = serde_json::to_value(&form.questions)
            .map_err(|e| ClientsError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO forms (
                form_id,
                name,
                version,
                description,
                questions,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(form.form_id.as_uuid())
        .bind(&form.name)
        .bind(&form.version)
        .bind(form.description.as_deref())
        .bind(questions)
        .bind(form.is_active)
        .bind(form.created_at)
        .bind(form.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            // Losing a version race must look like any other duplicate
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ClientsError::DuplicateVersion
            }
            _ => ClientsError::Database(e),
        })?;

        Ok(())
    }

    async fn find_by_id(&self, form_id: &FormId) -> ClientsResult<Option<Form>> {
        let query = format!("SELECT {} FROM forms WHERE form_id = $1", FORM_COLUMNS);

        let row = sqlx::query_as::<_, FormRow>(&query)
            .bind(form_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(FormRow::into_form).transpose()
    }
}

#[derive(sqlx::FromRow)]
struct FormRow {
    form_id: Uuid,
    name: String,
    version: String,
    description: Option<String>,
    questions: serde_json::Value,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FormRow {
    fn into_form(self) -> ClientsResult<Form> {
        let questions: Vec<Question> = serde_json::from_value(self.questions)
            .map_err(|e| ClientsError::Internal(format!("Corrupt form questions: {}", e)))?;

        Ok(Form {
            form_id: FormId::from_uuid(self.form_id),
            name: self.name,
            version: self.version,
            description: self.description,
            questions,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

// ============================================================================
// Submissions
// ============================================================================

const SUBMISSION_COLUMNS: &str = r#"
    submission_id,
    profile_id,
    submitted_by,
    form_version,
    answers,
    submitted_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed submission repository
#[derive(Clone)]
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SubmissionRepository for PgSubmissionRepository {
    async fn create(&self, submission: &Submission) -> ClientsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO submissions (
                submission_id,
                profile_id,
                submitted_by,
                form_version,
                answers,
                submitted_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(submission.submission_id.as_uuid())
        .bind(submission.profile_id.as_uuid())
        .bind(submission.submitted_by.as_uuid())
        .bind(&submission.form_version)
        .bind(&submission.answers)
        .bind(submission.submitted_at)
        .bind(submission.created_at)
        .bind(submission.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_profile(&self, profile_id: &ProfileId) -> ClientsResult<Vec<Submission>> {
        let query = format!(
            "SELECT {} FROM submissions WHERE profile_id = $1",
            SUBMISSION_COLUMNS
        );

        let rows = sqlx::query_as::<_, SubmissionRow>(&query)
            .bind(profile_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(SubmissionRow::into_submission).collect())
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    submission_id: Uuid,
    profile_id: Uuid,
    submitted_by: Uuid,
    form_version: String,
    answers: serde_json::Value,
    submitted_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SubmissionRow {
    fn into_submission(self) -> Submission {
        Submission {
            submission_id: SubmissionId::from_uuid(self.submission_id),
            profile_id: ProfileId::from_uuid(self.profile_id),
            submitted_by: UserId::from_uuid(self.submitted_by),
            form_version: self.form_version,
            answers: self.answers,
            submitted_at: self.submitted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

/// PostgreSQL-backed report repository
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ReportRepository for PgReportRepository {
    async fn create(&self, report: &Report) -> ClientsResult<()> {
        let result = serde_json::to_value(&report.result)
            .map_err(|e| ClientsError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO reports (
                report_id,
                submission_id,
                generated_by,
                result,
                generated_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(report.report_id.as_uuid())
        .bind(report.submission_id.as_uuid())
        .bind(report.generated_by.as_uuid())
        .bind(result)
        .bind(report.generated_at)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_profile(&self, profile_id: &ProfileId) -> ClientsResult<Vec<Report>> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT
                r.report_id,
                r.submission_id,
                r.generated_by,
                r.result,
                r.generated_at,
                r.created_at,
                r.updated_at
            FROM reports r
            JOIN submissions s ON s.submission_id = r.submission_id
            WHERE s.profile_id = $1
            "#,
        )
        .bind(profile_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ReportRow::into_report).collect()
    }
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    report_id: Uuid,
    submission_id: Uuid,
    generated_by: Uuid,
    result: serde_json::Value,
    generated_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> ClientsResult<Report> {
        let result: ReportResult = serde_json::from_value(self.result)
            .map_err(|e| ClientsError::Internal(format!("Corrupt report result: {}", e)))?;

        Ok(Report {
            report_id: ReportId::from_uuid(self.report_id),
            submission_id: SubmissionId::from_uuid(self.submission_id),
            generated_by: UserId::from_uuid(self.generated_by),
            result,
            generated_at: self.generated_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
