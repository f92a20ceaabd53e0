//! Search Service Wire Protocol
//!
//! Endpoint paths and request URL construction for the remote search service.
//!
//! Optional parameters are omitted from the query string entirely when absent; the
//! service treats an empty `subject_filter=` differently from no filter at all.

use crate::query::types::QueryParams;

// --- API Endpoints ---

/// Ranked course search: `GET /search?query=..[&limit=..][&subject_filter=..]`.
pub const ENDPOINT_SEARCH: &str = "/search";
/// Distinct subject codes, used for filter suggestions.
pub const ENDPOINT_SUBJECTS: &str = "/subjects";

/// Builds the full search URL for `params` against an already-normalised base URL.
pub fn search_url(base_url: &str, params: &QueryParams) -> String {
    let mut url = format!(
        "{}{}?query={}",
        base_url,
        ENDPOINT_SEARCH,
        urlencoding::encode(params.query())
    );

    if let Some(limit) = params.limit() {
        url.push_str(&format!("&limit={}", limit));
    }
    if let Some(subject) = params.subject_filter() {
        url.push_str(&format!("&subject_filter={}", urlencoding::encode(subject)));
    }

    url
}

pub fn subjects_url(base_url: &str) -> String {
    format!("{}{}", base_url, ENDPOINT_SUBJECTS)
}
