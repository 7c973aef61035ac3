use anyhow::{Result, anyhow};
use regex::Regex;

use crate::scanner::{TokenMatcher, sanitize_token};

/// Whole-word, case-insensitive keyword matcher.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Regex,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Result<Self> {
        let keyword = sanitize_token(keyword);
        if keyword.is_empty() {
            return Err(anyhow!("keyword must contain at least one ASCII letter"));
        }
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&keyword)))
            .map_err(|e| anyhow!("invalid keyword pattern {keyword}: {e}"))?;
        Ok(Self { keyword, pattern })
    }
}

impl TokenMatcher for KeywordMatcher {
    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn is_match(&self, sanitized: &str) -> bool {
        !sanitized.is_empty() && self.pattern.is_match(sanitized)
    }
}
