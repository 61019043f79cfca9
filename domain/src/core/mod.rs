//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: hosted completion models (Falcon family on AI71)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod string;
