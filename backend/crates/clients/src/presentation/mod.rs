//! Presentation Layer
//!
//! HTTP surface: DTOs, handlers and router composition.

pub mod dto;
pub mod handlers;
pub mod router;
