//! Clients Router

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::config::ClientsConfig;
use crate::domain::repository::{
    FormRepository, ProfileRepository, ReportRepository, SubmissionRepository,
};
use crate::infra::postgres::{
    PgFormRepository, PgProfileRepository, PgReportRepository, PgSubmissionRepository,
};
use crate::presentation::handlers::{self, ClientsAppState};

/// Create the Clients router with PostgreSQL repositories
pub fn clients_router(pool: PgPool, config: Arc<ClientsConfig>) -> Router {
    clients_router_generic(
        PgProfileRepository::new(pool.clone()),
        PgFormRepository::new(pool.clone()),
        PgSubmissionRepository::new(pool.clone()),
        PgReportRepository::new(pool),
        config,
    )
}

/// Create a generic Clients router for any repository implementations.
/// Callers must wrap this router with the auth middleware; every route
/// expects an `AuthUser` extension.
pub fn clients_router_generic<P, F, S, R>(
    profiles: P,
    forms: F,
    submissions: S,
    reports: R,
    config: Arc<ClientsConfig>,
) -> Router
where
    P: ProfileRepository + Clone + Send + Sync + 'static,
    F: FormRepository + Clone + Send + Sync + 'static,
    S: SubmissionRepository + Clone + Send + Sync + 'static,
    R: ReportRepository + Clone + Send + Sync + 'static,
{
    let state = ClientsAppState {
        profiles: Arc::new(profiles),
        forms: Arc::new(forms),
        submissions: Arc::new(submissions),
        reports: Arc::new(reports),
        config,
    };

    Router::new()
        .route(
            "/profiles",
            post(handlers::create_profile::<P, F, S, R>)
                .get(handlers::list_profiles::<P, F, S, R>),
        )
        .route(
            "/profiles/{id}/history",
            get(handlers::profile_history::<P, F, S, R>),
        )
        .route(
            "/forms",
            post(handlers::create_form::<P, F, S, R>),
        )
        .route(
            "/forms/{id}",
            get(handlers::get_form::<P, F, S, R>),
        )
        .route(
            "/submissions",
            post(handlers::create_submission::<P, F, S, R>),
        )
        .with_state(state)
}
