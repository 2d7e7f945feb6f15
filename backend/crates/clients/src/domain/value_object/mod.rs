//! Value Objects

pub mod full_name;
