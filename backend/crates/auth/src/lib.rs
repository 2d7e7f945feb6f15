//! Auth - User authentication lifecycle
//!
//! Registration with email verification, verification-gated login with
//! bearer tokens, and password reset. Layered as domain / application /
//! infra / presentation.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::config::AuthConfig;
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{AuthMiddlewareState, AuthUser, require_auth};
pub use presentation::router::{auth_router, auth_router_generic};
