//! Unit tests for the clients use cases
//!
//! Use cases run against in-memory repositories so ownership scoping,
//! pagination and the submission/report two-write policy are exercised
//! without a database.

use std::sync::{Arc, Mutex};

use auth::UserRole;
use chrono::{Duration, Utc};
use kernel::id::{FormId, ProfileId, UserId};
use serde_json::json;

use crate::application::config::ClientsConfig;
use crate::application::{
    CreateFormInput, CreateFormUseCase, CreateProfileInput, CreateProfileUseCase,
    CreateSubmissionInput, CreateSubmissionUseCase, GetFormUseCase, ListProfilesInput,
    ListProfilesUseCase, ProfileHistoryUseCase,
};
use crate::domain::entity::form::{Form, Question, QuestionKind};
use crate::domain::entity::profile::Profile;
use crate::domain::entity::report::Report;
use crate::domain::entity::submission::Submission;
use crate::domain::repository::{
    FormRepository, ProfileRepository, ReportRepository, SubmissionRepository,
};
use crate::domain::services::HistoryEventKind;
use crate::error::{ClientsError, ClientsResult};

// ============================================================================
// In-memory repositories
// ============================================================================

#[derive(Clone, Default)]
struct InMemoryProfileRepository {
    profiles: Arc<Mutex<Vec<Profile>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &Profile) -> ClientsResult<()> {
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(())
    }

    async fn find_by_id_and_owner(
        &self,
        profile_id: &ProfileId,
        owner: &UserId,
    ) -> ClientsResult<Option<Profile>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.profile_id == profile_id && &p.managed_by == owner)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        offset: i64,
        limit: i64,
    ) -> ClientsResult<Vec<Profile>> {
        let mut owned: Vec<Profile> = self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.managed_by == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.profile_id.cmp(&b.profile_id))
        });

        Ok(owned
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_by_owner(&self, owner: &UserId) -> ClientsResult<i64> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.managed_by == owner)
            .count() as i64)
    }
}

#[derive(Clone, Default)]
struct InMemoryFormRepository {
    forms: Arc<Mutex<Vec<Form>>>,
}

impl FormRepository for InMemoryFormRepository {
    async fn create(&self, form: &Form) -> ClientsResult<()> {
        let mut forms = self.forms.lock().unwrap();
        // Mirrors the unique index on forms.version
        if forms.iter().any(|f| f.version == form.version) {
            return Err(ClientsError::DuplicateVersion);
        }
        forms.push(form.clone());
        Ok(())
    }

    async fn find_by_id(&self, form_id: &FormId) -> ClientsResult<Option<Form>> {
        Ok(self
            .forms
            .lock()
            .unwrap()
            .iter()
            .find(|f| &f.form_id == form_id)
            .cloned())
    }
}

#[derive(Clone, Default)]
struct InMemorySubmissionRepository {
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: &Submission) -> ClientsResult<()> {
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(())
    }

    async fn list_by_profile(&self, profile_id: &ProfileId) -> ClientsResult<Vec<Submission>> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| &s.profile_id == profile_id)
            .cloned()
            .collect())
    }
}

/// Report store that resolves profile scope through a shared submission
/// store, the way the SQL join does.
#[derive(Clone, Default)]
struct InMemoryReportRepository {
    reports: Arc<Mutex<Vec<Report>>>,
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl InMemoryReportRepository {
    fn sharing(submissions: &InMemorySubmissionRepository) -> Self {
        Self {
            reports: Arc::default(),
            submissions: submissions.submissions.clone(),
        }
    }
}

impl ReportRepository for InMemoryReportRepository {
    async fn create(&self, report: &Report) -> ClientsResult<()> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn list_by_profile(&self, profile_id: &ProfileId) -> ClientsResult<Vec<Report>> {
        let submission_ids: Vec<_> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| &s.profile_id == profile_id)
            .map(|s| s.submission_id)
            .collect();

        Ok(self
            .reports
            .lock()
            .unwrap()
            .iter()
            .filter(|r| submission_ids.contains(&r.submission_id))
            .cloned()
            .collect())
    }
}

/// Report store whose writes always fail
#[derive(Clone, Default)]
struct FailingReportRepository;

impl ReportRepository for FailingReportRepository {
    async fn create(&self, _report: &Report) -> ClientsResult<()> {
        Err(ClientsError::Internal("report store unavailable".to_string()))
    }

    async fn list_by_profile(&self, _profile_id: &ProfileId) -> ClientsResult<Vec<Report>> {
        Ok(Vec::new())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn profile_input(full_name: &str) -> CreateProfileInput {
    CreateProfileInput {
        full_name: full_name.to_string(),
        birth_date: None,
        gender: None,
        phone: None,
        contact_email: None,
        anamnesis: None,
        measurements: None,
    }
}

async fn create_profile(
    repo: &InMemoryProfileRepository,
    owner: UserId,
    full_name: &str,
) -> Profile {
    CreateProfileUseCase::new(Arc::new(repo.clone()))
        .execute(owner, profile_input(full_name))
        .await
        .unwrap()
}

fn list_use_case(repo: &InMemoryProfileRepository) -> ListProfilesUseCase<InMemoryProfileRepository> {
    ListProfilesUseCase::new(Arc::new(repo.clone()), Arc::new(ClientsConfig::default()))
}

fn page_input(page: Option<&str>, limit: Option<&str>) -> ListProfilesInput {
    ListProfilesInput {
        page: page.map(str::to_string),
        limit: limit.map(str::to_string),
    }
}

fn text_question(text: &str) -> Question {
    Question {
        text: text.to_string(),
        kind: QuestionKind::Text,
        options: Vec::new(),
        required: true,
    }
}

fn form_input(version: &str, questions: Vec<Question>) -> CreateFormInput {
    CreateFormInput {
        name: "Check-in".to_string(),
        version: version.to_string(),
        description: None,
        questions,
    }
}

// ============================================================================
// Profiles
// ============================================================================

#[tokio::test]
async fn profile_requires_a_full_name() {
    let repo = InMemoryProfileRepository::default();
    let use_case = CreateProfileUseCase::new(Arc::new(repo.clone()));

    let result = use_case.execute(UserId::new(), profile_input("   ")).await;

    assert!(matches!(result, Err(ClientsError::Validation(_))));
    assert!(repo.profiles.lock().unwrap().is_empty());
}

#[tokio::test]
async fn profile_payloads_default_to_empty() {
    let repo = InMemoryProfileRepository::default();
    let profile = create_profile(&repo, UserId::new(), "Maria Oliveira").await;

    assert_eq!(profile.anamnesis, json!({}));
    assert_eq!(profile.measurements, json!([]));
}

#[tokio::test]
async fn listing_is_scoped_to_the_owner() {
    let repo = InMemoryProfileRepository::default();
    let alice = UserId::new();
    let bob = UserId::new();

    create_profile(&repo, alice, "Client of Alice").await;
    create_profile(&repo, bob, "Client of Bob").await;

    let page = list_use_case(&repo)
        .execute(alice, page_input(None, None))
        .await
        .unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].full_name, "Client of Alice");
}

#[tokio::test]
async fn pagination_slices_in_creation_order() {
    let repo = InMemoryProfileRepository::default();
    let owner = UserId::new();
    let base = Utc::now();

    // 15 profiles with strictly increasing creation times
    for i in 0..15 {
        let mut profile = create_profile(&repo, owner, &format!("Client {:02}", i)).await;
        profile.created_at = base + Duration::seconds(i);
        let mut store = repo.profiles.lock().unwrap();
        let slot = store
            .iter_mut()
            .find(|p| p.profile_id == profile.profile_id)
            .unwrap();
        slot.created_at = profile.created_at;
    }

    let page = list_use_case(&repo)
        .execute(owner, page_input(Some("2"), Some("5")))
        .await
        .unwrap();

    assert_eq!(page.current_page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_items, 15);

    let names: Vec<&str> = page.data.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Client 05", "Client 06", "Client 07", "Client 08", "Client 09"]
    );
}

#[tokio::test]
async fn garbage_pagination_falls_back_to_defaults() {
    let repo = InMemoryProfileRepository::default();
    let owner = UserId::new();

    for i in 0..12 {
        create_profile(&repo, owner, &format!("Client {:02}", i)).await;
    }

    let page = list_use_case(&repo)
        .execute(owner, page_input(Some("abc"), Some("-3")))
        .await
        .unwrap();

    assert_eq!(page.current_page, 1);
    assert_eq!(page.data.len(), 10);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn extreme_page_numbers_return_an_empty_page() {
    let repo = InMemoryProfileRepository::default();
    let owner = UserId::new();

    create_profile(&repo, owner, "Client 00").await;
    create_profile(&repo, owner, "Client 01").await;

    // i64::MAX is a valid positive page; the offset must saturate
    // instead of overflowing
    let page = list_use_case(&repo)
        .execute(owner, page_input(Some("9223372036854775807"), Some("10")))
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.current_page, i64::MAX);
    assert_eq!(page.total_items, 2);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn empty_listing_has_zero_pages() {
    let repo = InMemoryProfileRepository::default();

    let page = list_use_case(&repo)
        .execute(UserId::new(), page_input(None, None))
        .await
        .unwrap();

    assert_eq!(page.total_items, 0);
    assert_eq!(page.total_pages, 0);
    assert!(page.data.is_empty());
}

// ============================================================================
// History
// ============================================================================

fn history_use_case(
    profiles: &InMemoryProfileRepository,
    submissions: &InMemorySubmissionRepository,
    reports: &InMemoryReportRepository,
) -> ProfileHistoryUseCase<
    InMemoryProfileRepository,
    InMemorySubmissionRepository,
    InMemoryReportRepository,
> {
    ProfileHistoryUseCase::new(
        Arc::new(profiles.clone()),
        Arc::new(submissions.clone()),
        Arc::new(reports.clone()),
    )
}

#[tokio::test]
async fn history_merges_newest_first() {
    let profiles = InMemoryProfileRepository::default();
    let submissions = InMemorySubmissionRepository::default();
    let reports = InMemoryReportRepository::sharing(&submissions);

    let owner = UserId::new();
    let profile = create_profile(&profiles, owner, "Maria Oliveira").await;
    let base = Utc::now();

    let mut s1 = Submission::create(
        profile.profile_id,
        owner,
        "checkin-v1".to_string(),
        json!({"q1": "yes"}),
    )
    .unwrap();
    s1.submitted_at = base;
    submissions.create(&s1).await.unwrap();

    let mut r1 = Report::new(
        s1.submission_id,
        owner,
        crate::domain::entity::report::ReportResult {
            content: "c".to_string(),
            score: 10,
            summary: "1 resposta(s) processada(s)".to_string(),
        },
    );
    r1.generated_at = base + Duration::hours(1);
    reports.create(&r1).await.unwrap();

    let mut s2 = Submission::create(
        profile.profile_id,
        owner,
        "checkin-v2".to_string(),
        json!({"q1": "no"}),
    )
    .unwrap();
    s2.submitted_at = base + Duration::hours(2);
    submissions.create(&s2).await.unwrap();

    let events = history_use_case(&profiles, &submissions, &reports)
        .execute(owner, &profile.profile_id.to_string())
        .await
        .unwrap();

    let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            s2.submission_id.to_string().as_str(),
            r1.report_id.to_string().as_str(),
            s1.submission_id.to_string().as_str(),
        ]
    );
    assert_eq!(events[0].kind, HistoryEventKind::Submission);
    assert_eq!(events[0].details["formVersion"], "checkin-v2");
    assert_eq!(events[1].kind, HistoryEventKind::Report);
    assert_eq!(events[1].details["submissionId"], s1.submission_id.to_string());
}

#[tokio::test]
async fn cross_tenant_history_is_not_found() {
    let profiles = InMemoryProfileRepository::default();
    let submissions = InMemorySubmissionRepository::default();
    let reports = InMemoryReportRepository::sharing(&submissions);

    let alice = UserId::new();
    let bob = UserId::new();
    let profile = create_profile(&profiles, alice, "Client of Alice").await;

    let result = history_use_case(&profiles, &submissions, &reports)
        .execute(bob, &profile.profile_id.to_string())
        .await;

    assert!(matches!(result, Err(ClientsError::ProfileNotFound)));
}

#[tokio::test]
async fn malformed_profile_id_history_is_not_found() {
    let profiles = InMemoryProfileRepository::default();
    let submissions = InMemorySubmissionRepository::default();
    let reports = InMemoryReportRepository::sharing(&submissions);

    let result = history_use_case(&profiles, &submissions, &reports)
        .execute(UserId::new(), "not-a-uuid")
        .await;

    assert!(matches!(result, Err(ClientsError::ProfileNotFound)));
}

// ============================================================================
// Submissions
// ============================================================================

#[tokio::test]
async fn submission_creates_its_report() {
    let profiles = InMemoryProfileRepository::default();
    let submissions = InMemorySubmissionRepository::default();
    let reports = InMemoryReportRepository::sharing(&submissions);

    let owner = UserId::new();
    let profile = create_profile(&profiles, owner, "Maria Oliveira").await;

    let use_case = CreateSubmissionUseCase::new(
        Arc::new(profiles.clone()),
        Arc::new(submissions.clone()),
        Arc::new(reports.clone()),
    );

    let submission = use_case
        .execute(
            owner,
            CreateSubmissionInput {
                profile_id: profile.profile_id.to_string(),
                form_version: "checkin-v1".to_string(),
                answers: json!({"q1": "yes", "q2": ["a", "b"]}),
            },
        )
        .await
        .unwrap();

    let stored_reports = reports.reports.lock().unwrap();
    assert_eq!(stored_reports.len(), 1);
    assert_eq!(stored_reports[0].submission_id, submission.submission_id);
    assert_eq!(stored_reports[0].result.score, 20);
    assert_eq!(
        stored_reports[0].result.summary,
        "2 resposta(s) processada(s)"
    );
}

#[tokio::test]
async fn non_owner_submission_is_forbidden_and_writes_nothing() {
    let profiles = InMemoryProfileRepository::default();
    let submissions = InMemorySubmissionRepository::default();
    let reports = InMemoryReportRepository::sharing(&submissions);

    let alice = UserId::new();
    let bob = UserId::new();
    let profile = create_profile(&profiles, alice, "Client of Alice").await;

    let use_case = CreateSubmissionUseCase::new(
        Arc::new(profiles.clone()),
        Arc::new(submissions.clone()),
        Arc::new(reports.clone()),
    );

    let result = use_case
        .execute(
            bob,
            CreateSubmissionInput {
                profile_id: profile.profile_id.to_string(),
                form_version: "checkin-v1".to_string(),
                answers: json!({"q1": "yes"}),
            },
        )
        .await;

    assert!(matches!(result, Err(ClientsError::NotProfileOwner)));
    assert!(submissions.submissions.lock().unwrap().is_empty());
    assert!(reports.reports.lock().unwrap().is_empty());
}

#[tokio::test]
async fn report_write_failure_does_not_fail_the_submission() {
    let profiles = InMemoryProfileRepository::default();
    let submissions = InMemorySubmissionRepository::default();

    let owner = UserId::new();
    let profile = create_profile(&profiles, owner, "Maria Oliveira").await;

    let use_case = CreateSubmissionUseCase::new(
        Arc::new(profiles.clone()),
        Arc::new(submissions.clone()),
        Arc::new(FailingReportRepository),
    );

    let result = use_case
        .execute(
            owner,
            CreateSubmissionInput {
                profile_id: profile.profile_id.to_string(),
                form_version: "checkin-v1".to_string(),
                answers: json!({"q1": "yes"}),
            },
        )
        .await;

    assert!(result.is_ok(), "the submission must survive a report failure");
    assert_eq!(submissions.submissions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn non_object_answers_are_rejected() {
    let profiles = InMemoryProfileRepository::default();
    let submissions = InMemorySubmissionRepository::default();
    let reports = InMemoryReportRepository::sharing(&submissions);

    let owner = UserId::new();
    let profile = create_profile(&profiles, owner, "Maria Oliveira").await;

    let use_case = CreateSubmissionUseCase::new(
        Arc::new(profiles.clone()),
        Arc::new(submissions.clone()),
        Arc::new(reports.clone()),
    );

    let result = use_case
        .execute(
            owner,
            CreateSubmissionInput {
                profile_id: profile.profile_id.to_string(),
                form_version: "checkin-v1".to_string(),
                answers: json!([1, 2, 3]),
            },
        )
        .await;

    assert!(matches!(result, Err(ClientsError::Validation(_))));
    assert!(submissions.submissions.lock().unwrap().is_empty());
}

// ============================================================================
// Forms
// ============================================================================

#[tokio::test]
async fn form_creation_is_admin_only() {
    let repo = InMemoryFormRepository::default();
    let use_case = CreateFormUseCase::new(Arc::new(repo.clone()));

    let denied = use_case
        .execute(
            UserRole::Common,
            form_input("checkin-v1", vec![text_question("Notes")]),
        )
        .await;
    assert!(matches!(denied, Err(ClientsError::AdminOnly)));
    assert!(repo.forms.lock().unwrap().is_empty());

    let allowed = use_case
        .execute(
            UserRole::Admin,
            form_input("checkin-v1", vec![text_question("Notes")]),
        )
        .await;
    assert!(allowed.is_ok());
}

#[tokio::test]
async fn duplicate_form_version_conflicts() {
    let repo = InMemoryFormRepository::default();
    let use_case = CreateFormUseCase::new(Arc::new(repo.clone()));

    use_case
        .execute(
            UserRole::Admin,
            form_input("checkin-v1", vec![text_question("Notes")]),
        )
        .await
        .unwrap();

    let second = use_case
        .execute(
            UserRole::Admin,
            form_input("checkin-v1", vec![text_question("Other")]),
        )
        .await;

    assert!(matches!(second, Err(ClientsError::DuplicateVersion)));
    assert_eq!(repo.forms.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_question_shapes_are_rejected() {
    let repo = InMemoryFormRepository::default();
    let use_case = CreateFormUseCase::new(Arc::new(repo.clone()));

    let choice_without_options = use_case
        .execute(
            UserRole::Admin,
            form_input(
                "checkin-v1",
                vec![Question {
                    text: "Pick one".to_string(),
                    kind: QuestionKind::SingleChoice,
                    options: Vec::new(),
                    required: true,
                }],
            ),
        )
        .await;
    assert!(matches!(
        choice_without_options,
        Err(ClientsError::Validation(_))
    ));

    let text_with_options = use_case
        .execute(
            UserRole::Admin,
            form_input(
                "checkin-v2",
                vec![Question {
                    text: "Notes".to_string(),
                    kind: QuestionKind::Text,
                    options: vec!["yes".to_string()],
                    required: true,
                }],
            ),
        )
        .await;
    assert!(matches!(text_with_options, Err(ClientsError::Validation(_))));

    assert!(repo.forms.lock().unwrap().is_empty());
}

#[tokio::test]
async fn get_form_treats_malformed_id_as_missing() {
    let repo = InMemoryFormRepository::default();
    let use_case = GetFormUseCase::new(Arc::new(repo.clone()));

    let malformed = use_case.execute("12345").await;
    assert!(matches!(malformed, Err(ClientsError::FormNotFound)));

    let unknown = use_case.execute(&FormId::new().to_string()).await;
    assert!(matches!(unknown, Err(ClientsError::FormNotFound)));
}

#[tokio::test]
async fn get_form_returns_the_stored_form() {
    let repo = InMemoryFormRepository::default();
    let created = CreateFormUseCase::new(Arc::new(repo.clone()))
        .execute(
            UserRole::Admin,
            form_input("checkin-v1", vec![text_question("Notes")]),
        )
        .await
        .unwrap();

    let found = GetFormUseCase::new(Arc::new(repo))
        .execute(&created.form_id.to_string())
        .await
        .unwrap();

    assert_eq!(found.version, "checkin-v1");
    assert_eq!(found.questions.len(), 1);
}
