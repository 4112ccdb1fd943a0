//! # Quill Core
//!
//! The domain layer of the Quill posts service.
//! This crate contains the post catalog logic with zero infrastructure dependencies:
//! entities, validation, the authorization gate, visibility and search filters,
//! and page arithmetic.

pub mod catalog;
pub mod domain;
pub mod error;
pub mod ports;

pub use catalog::{CatalogSettings, PostCatalog};
pub use error::DomainError;
