//! HTTP Handlers
//!
//! The authenticated caller arrives as an `AuthUser` request extension,
//! inserted by the auth middleware on the protected router.

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use auth::AuthUser;

use crate::application::config::ClientsConfig;
use crate::application::{
    CreateFormInput, CreateFormUseCase, CreateProfileInput, CreateProfileUseCase,
    CreateSubmissionInput, CreateSubmissionUseCase, GetFormUseCase, ListProfilesInput,
    ListProfilesUseCase, ProfileHistoryUseCase,
};
use crate::domain::repository::{
    FormRepository, ProfileRepository, ReportRepository, SubmissionRepository,
};
use crate::error::ClientsResult;
use crate::presentation::dto::{
    CreateFormRequest, CreateProfileRequest, CreateSubmissionRequest, FormResponse,
    ListProfilesQuery, ProfileListResponse, ProfileResponse, SubmissionResponse,
};

/// Shared state for clients handlers
#[derive(Clone)]
pub struct ClientsAppState<P, F, S, R>
where
    P: ProfileRepository + Clone + Send + Sync + 'static,
    F: FormRepository + Clone + Send + Sync + 'static,
    S: SubmissionRepository + Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    pub profiles: Arc<P>,
    pub forms: Arc<F>,
    pub submissions: Arc<S>,
    pub reports: Arc<R>,
    pub config: Arc<ClientsConfig>,
}

// ============================================================================
// Profiles
// ============================================================================

/// POST /profiles
pub async fn create_profile<P, F, S, R>(
    State(state): State<ClientsAppState<P, F, S, R>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateProfileRequest>,
) -> ClientsResult<impl IntoResponse>
where
    P: ProfileRepository + Clone + Send + Sync + 'static,
    F: FormRepository + Clone + Send + Sync + 'static,
    S: SubmissionRepository + Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateProfileUseCase::new(state.profiles.clone());

    let profile = use_case
        .execute(
            auth.user_id,
            CreateProfileInput {
                full_name: req.full_name,
                birth_date: req.birth_date,
                gender: req.gender,
                phone: req.phone,
                contact_email: req.email,
                anamnesis: req.anamnesis,
                measurements: req.measurements,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(profile))))
}

/// GET /profiles?page&limit
pub async fn list_profiles<P, F, S, R>(
    State(state): State<ClientsAppState<P, F, S, R>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListProfilesQuery>,
) -> ClientsResult<Json<ProfileListResponse>>
where
    P: ProfileRepository + Clone + Send + Sync + 'static,
    F: FormRepository + Clone + Send + Sync + 'static,
    S: SubmissionRepository + Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListProfilesUseCase::new(state.profiles.clone(), state.config.clone());

    let page = use_case
        .execute(
            auth.user_id,
            ListProfilesInput {
                page: query.page,
                limit: query.limit,
            },
        )
        .await?;

    Ok(Json(ProfileListResponse::from(page)))
}

/// GET /profiles/{id}/history
pub async fn profile_history<P, F, S, R>(
    State(state): State<ClientsAppState<P, F, S, R>>,
    Extension(auth): Extension<AuthUser>,
    Path(profile_id): Path<String>,
) -> ClientsResult<impl IntoResponse>
where
    P: ProfileRepository + Clone + Send + Sync + 'static,
    F: FormRepository + Clone + Send + Sync + 'static,
    S: SubmissionRepository + Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    let use_case = ProfileHistoryUseCase::new(
        state.profiles.clone(),
        state.submissions.clone(),
        state.reports.clone(),
    );

    let events = use_case.execute(auth.user_id, &profile_id).await?;

    Ok(Json(events))
}

// ============================================================================
// Forms
// ============================================================================

/// GET /forms/{id}
pub async fn get_form<P, F, S, R>(
    State(state): State<ClientsAppState<P, F, S, R>>,
    Path(form_id): Path<String>,
) -> ClientsResult<Json<FormResponse>>
where
    P: ProfileRepository + Clone + Send + Sync + 'static,
    F: FormRepository + Clone + Send + Sync + 'static,
    S: SubmissionRepository + Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetFormUseCase::new(state.forms.clone());

    let form = use_case.execute(&form_id).await?;

    Ok(Json(FormResponse::from(form)))
}

/// POST /forms (administrators only)
pub async fn create_form<P, F, S, R>(
    State(state): State<ClientsAppState<P, F, S, R>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateFormRequest>,
) -> ClientsResult<impl IntoResponse>
where
    P: ProfileRepository + Clone + Send + Sync + 'static,
    F: FormRepository + Clone + Send + Sync + 'static,
    S: SubmissionRepository + Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateFormUseCase::new(state.forms.clone());

    let form = use_case
        .execute(
            auth.role,
            CreateFormInput {
                name: req.name,
                version: req.version,
                description: req.description,
                questions: req.questions,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(FormResponse::from(form))))
}

// ============================================================================
// Submissions
// ============================================================================

/// POST /submissions
pub async fn create_submission<P, F, S, R>(
    State(state): State<ClientsAppState<P, F, S, R>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateSubmissionRequest>,
) -> ClientsResult<impl IntoResponse>
where
    P: ProfileRepository + Clone + Send + Sync + 'static,
    F: FormRepository + Clone + Send + Sync + 'static,
    S: SubmissionRepository + Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateSubmissionUseCase::new(
        state.profiles.clone(),
        state.submissions.clone(),
        state.reports.clone(),
    );

    let submission = use_case
        .execute(
            auth.user_id,
            CreateSubmissionInput {
                profile_id: req.profile_id,
                form_version: req.form_version,
                answers: req.answers,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse::from(submission)),
    ))
}
