//! Heading text to identifier normalization.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SlugConfig;

static NON_ALNUM_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug separator pattern is valid"));

/// Normalize heading text into an identifier using the configured bounds.
#[must_use]
pub fn slugify_with(text: &str, cfg: &SlugConfig) -> String {
    let lowered = text.trim().to_lowercase();
    let mut slug = NON_ALNUM_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string();
    // Only ASCII survives the replacement, so byte truncation is char-safe.
    if slug.len() > cfg.max_len {
        slug.truncate(cfg.max_len);
        slug.truncate(slug.trim_end_matches('-').len());
    }
    if slug.is_empty() {
        cfg.fallback.clone()
    } else {
        slug
    }
}

/// [`slugify_with`] using the default 64 character limit and `section` fallback.
#[must_use]
pub fn slugify(text: &str) -> String {
    slugify_with(text, &SlugConfig::default())
}
