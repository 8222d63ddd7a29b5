//! Shared utilities, configuration, and error handling for Showcase
//!
//! This crate provides common functionality used across the Showcase admin service:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Field-level validation errors
//! - Slug derivation for sluggable entities
//! - Request extractors (pagination, validated JSON, path and query with JSON rejections)

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod slug;
pub mod validation;

pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{ApiPath, ApiQuery, Page, Pagination, ValidatedJson};
pub use slug::{is_valid_slug, slugify, unique_slug, Sluggable};
pub use validation::{not_blank, Rule, ValidationErrors};
