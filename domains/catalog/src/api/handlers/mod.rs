//! HTTP handlers for the Catalog domain

pub mod faqs;
pub mod genres;
pub mod highlights;
pub mod links;
pub mod projects;

/// Trimmed text, or `None` when the value is missing or blank
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
