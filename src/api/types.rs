use serde::{Deserialize, Serialize};

/// A single ranked course returned by the search service.
///
/// Results arrive pre-ranked (highest relevance first); the client never re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub subject: String,
    pub title: String,
    pub description: String,
    /// Similarity in `[0, 1]`, as computed by the service.
    pub relevance_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectsResponse {
    pub subjects: Vec<String>,
}
