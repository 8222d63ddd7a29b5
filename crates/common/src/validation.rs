//! Field-level validation errors
//!
//! Every entity validator reports failures as a map of field name to the
//! first rule that field violated. The map is surfaced to API clients as-is
//! under `error.fields`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A validation rule a field can violate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    Max,
    Distinct,
    Unique,
    Exists,
    Length,
    Range,
    Url,
    Invalid,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Max => "max",
            Rule::Distinct => "distinct",
            Rule::Unique => "unique",
            Rule::Exists => "exists",
            Rule::Length => "length",
            Rule::Range => "range",
            Rule::Url => "url",
            Rule::Invalid => "invalid",
        }
    }

    /// Map a `validator` error code onto a rule
    pub fn from_code(code: &str) -> Self {
        match code {
            "required" => Rule::Required,
            "max" => Rule::Max,
            "distinct" => Rule::Distinct,
            "unique" => Rule::Unique,
            "exists" => Rule::Exists,
            "length" => Rule::Length,
            "range" => Rule::Range,
            "url" => Rule::Url,
            _ => Rule::Invalid,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collected field errors, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Rule>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a single-field error set
    pub fn single(field: impl Into<String>, rule: Rule) -> Self {
        let mut errors = Self::new();
        errors.add(field, rule);
        errors
    }

    /// Record a violation. Only the first rule reported for a field is kept.
    pub fn add(&mut self, field: impl Into<String>, rule: Rule) {
        self.fields.entry(field.into()).or_insert(rule);
    }

    pub fn get(&self, field: &str) -> Option<Rule> {
        self.fields.get(field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rule)> {
        self.fields.iter().map(|(field, rule)| (field.as_str(), *rule))
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, rule) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", field, rule)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// `validator` custom rule: whitespace-only text counts as missing
///
/// Reported with the `required` code so a blank field reads the same as an
/// absent one, and alongside every other field's failure.
pub fn not_blank(value: &str) -> std::result::Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("required"));
    }
    Ok(())
}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(source: validator::ValidationErrors) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, field_errors) in source.field_errors() {
            if let Some(first) = field_errors.first() {
                errors.add(field.to_string(), Rule::from_code(first.code.as_ref()));
            }
        }
        errors
    }
}
