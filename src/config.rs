//! Client Configuration
//!
//! Runtime settings for the search client. The base address of the service is
//! environment-specific and carries no behaviour of its own.

use crate::query::executor::DEFAULT_CACHE_CAPACITY;
use crate::query::types::normalize_subject;

use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(750);

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Normalised service address, without a trailing slash.
    pub base_url: String,
    /// Quiet window before typed text is committed as a query.
    pub debounce: Duration,
    /// Initial result limit; `None` lets the service pick its default.
    pub limit: Option<NonZeroU32>,
    /// Initial subject filter.
    pub subject_filter: Option<String>,
    /// Per-request timeout. `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
    /// Settled searches kept before the least recently used one is dropped.
    pub cache_capacity: NonZeroUsize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            limit: None,
            subject_filter: None,
            request_timeout: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl SearchConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            ..Self::default()
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_limit(mut self, limit: Option<NonZeroU32>) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_subject_filter(mut self, subject: Option<String>) -> Self {
        self.subject_filter = normalize_subject(subject);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

/// Trims the address, adds `http://` when no scheme is given and drops trailing slashes.
/// Blank input falls back to [`DEFAULT_BASE_URL`].
pub fn normalize_base_url(candidate: &str) -> String {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return DEFAULT_BASE_URL.to_string();
    }

    let normalized = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    normalized.trim_end_matches('/').to_string()
}
