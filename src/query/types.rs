use std::fmt;
use std::num::NonZeroU32;

/// The cache key of a search: query text plus optional limit and subject filter.
///
/// Two params are the same search iff they are structurally equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParams {
    query: String,
    limit: Option<NonZeroU32>,
    subject_filter: Option<String>,
}

impl QueryParams {
    /// The subject filter is trimmed; a blank one is treated as no filter.
    pub fn new(
        query: impl Into<String>,
        limit: Option<NonZeroU32>,
        subject_filter: Option<String>,
    ) -> Self {
        Self {
            query: query.into(),
            limit,
            subject_filter: normalize_subject(subject_filter),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> Option<NonZeroU32> {
        self.limit
    }

    pub fn subject_filter(&self) -> Option<&str> {
        self.subject_filter.as_deref()
    }

    /// Empty queries mean "no search" rather than "search for nothing".
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.query)?;
        if let Some(limit) = self.limit {
            write!(f, " limit={}", limit)?;
        }
        if let Some(subject) = &self.subject_filter {
            write!(f, " subject={}", subject)?;
        }
        Ok(())
    }
}

/// Trims a subject code and maps a blank one to `None`.
pub fn normalize_subject(subject: Option<String>) -> Option<String> {
    subject
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Lifecycle of one fetch as seen by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// Nothing requested.
    Idle,
    /// A fetch is in flight.
    Loading,
    Success(T),
    /// Human-readable error message, shown verbatim.
    Failure(String),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        QueryState::Idle
    }
}

/// Monotonically increasing identifier of an issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);
