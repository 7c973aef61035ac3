//! Token sanitizing and keyword matching.

pub mod keyword;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_LOWERCASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z]").expect("static pattern compiles"));

/// Normalise a raw token before matching.
///
/// Trims surrounding whitespace, lowercases, drops embedded newlines and then
/// every character outside `a-z`. Applying it twice yields the same string.
pub fn sanitize_token(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase().replace('\n', "");
    NON_LOWERCASE.replace_all(&lowered, "").into_owned()
}

/// Decides whether a sanitized token is a hit.
pub trait TokenMatcher: Send + Sync {
    fn keyword(&self) -> &str;
    fn is_match(&self, sanitized: &str) -> bool;
}

use crate::config::Config;
use anyhow::Result;

pub fn build_token_matcher(cfg: &Config) -> Result<Box<dyn TokenMatcher>> {
    Ok(Box::new(keyword::KeywordMatcher::new(&cfg.keyword)?))
}
