//! Domain Entities

pub mod form;
pub mod profile;
pub mod report;
pub mod submission;
