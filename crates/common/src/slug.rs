//! URL slugs derived from a source field

use regex::Regex;

/// Slug used when the source text has no alphanumeric characters
pub const FALLBACK_SLUG: &str = "item";

lazy_static::lazy_static! {
    /// Lowercase alphanumeric words joined by single hyphens
    pub static ref SLUG_REGEX: Regex =
        Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
}

/// Turn arbitrary text into a slug.
///
/// Lowercases, replaces every run of non-alphanumeric characters with one
/// hyphen and trims hyphens from both ends. Returns an empty string when
/// nothing alphanumeric is left.
pub fn slugify(source: &str) -> String {
    let mut slug = String::with_capacity(source.len());
    let mut pending_hyphen = false;

    for ch in source.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Check a slug against the canonical format
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Candidate slug for the given collision attempt: `base`, `base-1`, `base-2`, ...
pub fn with_suffix(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt)
    }
}

/// First candidate from `base`, `base-1`, `base-2`, ... that is not taken
pub fn unique_slug(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    (0..)
        .map(|attempt| with_suffix(base, attempt))
        .find(|candidate| !is_taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// An entity whose slug is derived from one of its text fields
pub trait Sluggable {
    /// The text the slug is built from
    fn slug_source(&self) -> &str;

    /// Slug for the current source text, never empty
    fn base_slug(&self) -> String {
        let slug = slugify(self.slug_source());
        if slug.is_empty() {
            FALLBACK_SLUG.to_string()
        } else {
            slug
        }
    }
}
