//! Clients - Profile management bounded context
//!
//! Profiles owned by users, form definitions, form submissions with
//! synchronous report generation, and a merged history feed. Layered as
//! domain / application / infra / presentation.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::ClientsConfig;
pub use error::{ClientsError, ClientsResult};
pub use infra::postgres::{
    PgFormRepository, PgProfileRepository, PgReportRepository, PgSubmissionRepository,
};
pub use presentation::router::{clients_router, clients_router_generic};
