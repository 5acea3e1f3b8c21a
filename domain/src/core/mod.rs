//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the text-generation model a request targets
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
