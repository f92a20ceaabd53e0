use crate::api::types::Course;
use crate::query::types::QueryState;
use crate::render::view::{ResultsView, project};

use std::num::NonZeroU32;
use thiserror::Error;

/// Snapshot of everything the front end may display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchView {
    pub raw_query: String,
    pub committed_query: String,
    pub limit: Option<NonZeroU32>,
    pub subject_filter: Option<String>,
    /// State of the search for the current committed params.
    pub results: QueryState<Vec<Course>>,
    pub subjects: QueryState<Vec<String>>,
}

impl SearchView {
    pub fn results_view(&self) -> ResultsView {
        project(&self.results, self.committed_query.is_empty())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("search session is closed")]
    Closed,
}
