//! Query Executor
//!
//! Owns the search cache of one session and decides, for every committed query, whether
//! to fetch, to wait for an in-flight fetch, or to reuse a cached result. Settled results
//! live in a bounded LRU; running fetches are tracked apart from it and never evicted.
//!
//! ## Execution model
//! The executor itself is never shared: it lives on the session's event loop and is only
//! mutated there. Each fetch runs on a spawned task whose single side effect is sending a
//! `Completion` back through the channel handed to `QueryExecutor::new`; the loop feeds it
//! to `handle_completion`, which applies it only if the token still matches.

use super::types::{QueryParams, QueryState, RequestToken};
use crate::api::client::SearchApi;
use crate::api::error::ApiError;
use crate::api::types::Course;

use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Settled searches kept per session unless configured otherwise.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(capacity) => capacity,
    None => unreachable!(),
};

/// Result of a finished fetch, sent from the fetch task back to the event loop.
#[derive(Debug)]
pub enum Completion {
    Search {
        params: QueryParams,
        token: RequestToken,
        result: Result<Vec<Course>, ApiError>,
    },
    Subjects {
        token: RequestToken,
        result: Result<Vec<String>, ApiError>,
    },
}

/// A search whose fetch has not reported back yet.
struct InFlight {
    token: RequestToken,
    fetch: JoinHandle<()>,
}

pub struct QueryExecutor<A: SearchApi> {
    api: Arc<A>,
    /// Searches with a running fetch. Never evicted, so dedup and the token check hold.
    in_flight: HashMap<QueryParams, InFlight>,
    /// Finished searches (Success or Failure), least recently used evicted first.
    /// A key lives in at most one of `in_flight` and `settled`.
    settled: LruCache<QueryParams, QueryState<Vec<Course>>>,
    /// Latest committed non-empty params. `None` means the view is Idle.
    current: Option<QueryParams>,
    subjects: QueryState<Vec<String>>,
    subjects_fetch: Option<(RequestToken, JoinHandle<()>)>,
    next_token: u64,
    completions: mpsc::UnboundedSender<Completion>,
}

impl<A: SearchApi> QueryExecutor<A> {
    pub fn new(api: Arc<A>, completions: mpsc::UnboundedSender<Completion>) -> Self {
        Self {
            api,
            in_flight: HashMap::new(),
            settled: LruCache::new(DEFAULT_CACHE_CAPACITY),
            current: None,
            subjects: QueryState::Idle,
            subjects_fetch: None,
            next_token: 0,
            completions,
        }
    }

    /// Bounds the number of settled searches kept. Shrinking drops the oldest first,
    /// but never the current search.
    pub fn with_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        if let Some(current) = &self.current {
            self.settled.promote(current);
        }
        self.settled.resize(capacity);
        self
    }

    /// Makes `params` the current search.
    ///
    /// - empty query: the view goes Idle and nothing is fetched;
    /// - fetch already in flight for `params`: nothing new is issued;
    /// - cached success: reused as is;
    /// - unknown, evicted or previously failed: a new fetch is issued.
    pub fn commit(&mut self, params: QueryParams) {
        if params.is_empty() {
            if self.current.take().is_some() {
                tracing::debug!("Empty query committed, view reset to idle");
            }
            return;
        }

        let needs_fetch = if self.in_flight.contains_key(&params) {
            tracing::debug!("Fetch for {} already in flight, not issuing another", params);
            false
        } else {
            match self.settled.get(&params) {
                Some(QueryState::Success(_)) => {
                    tracing::debug!("Reusing cached results for {}", params);
                    false
                }
                Some(_) => {
                    self.settled.pop(&params);
                    true
                }
                None => true,
            }
        };

        if needs_fetch {
            self.issue_search(params.clone());
        }
        self.current = Some(params);
    }

    /// Starts loading subject codes unless they are loaded or loading already.
    pub fn load_subjects(&mut self) {
        if matches!(self.subjects, QueryState::Loading | QueryState::Success(_)) {
            return;
        }

        let token = self.next_token();
        let api = self.api.clone();
        let completions = self.completions.clone();

        tracing::info!("Loading subjects (request {})", token.0);
        let handle = tokio::spawn(async move {
            let result = api.subjects().await;
            let _ = completions.send(Completion::Subjects { token, result });
        });

        self.subjects = QueryState::Loading;
        self.subjects_fetch = Some((token, handle));
    }

    /// Applies a finished fetch. Returns `true` when the visible state changed.
    pub fn handle_completion(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Search {
                params,
                token,
                result,
            } => self.apply_search(params, token, result),
            Completion::Subjects { token, result } => self.apply_subjects(token, result),
        }
    }

    /// State of the current search. Idle when the committed query is empty.
    pub fn state(&self) -> QueryState<Vec<Course>> {
        let Some(params) = &self.current else {
            return QueryState::Idle;
        };
        if self.in_flight.contains_key(params) {
            return QueryState::Loading;
        }
        self.settled.peek(params).cloned().unwrap_or(QueryState::Idle)
    }

    pub fn current(&self) -> Option<&QueryParams> {
        self.current.as_ref()
    }

    pub fn subjects(&self) -> &QueryState<Vec<String>> {
        &self.subjects
    }

    /// Number of search fetches still running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Number of settled searches held in the cache.
    pub fn cached(&self) -> usize {
        self.settled.len()
    }

    /// Abandons every in-flight fetch and forgets all cached state.
    ///
    /// Fetch tasks are aborted, never awaited.
    pub fn reset(&mut self) {
        let mut aborted = 0;
        for (_, pending) in self.in_flight.drain() {
            pending.fetch.abort();
            aborted += 1;
        }
        if let Some((_, handle)) = self.subjects_fetch.take() {
            handle.abort();
            aborted += 1;
        }

        if aborted > 0 {
            tracing::debug!("Abandoned {} in-flight fetch(es)", aborted);
        }

        self.settled.clear();
        self.current = None;
        self.subjects = QueryState::Idle;
    }

    fn next_token(&mut self) -> RequestToken {
        self.next_token += 1;
        RequestToken(self.next_token)
    }

    fn issue_search(&mut self, params: QueryParams) {
        let token = self.next_token();
        let api = self.api.clone();
        let completions = self.completions.clone();
        let task_params = params.clone();

        tracing::info!("Searching {} (request {})", params, token.0);
        let fetch = tokio::spawn(async move {
            let result = api.search(&task_params).await;
            let _ = completions.send(Completion::Search {
                params: task_params,
                token,
                result,
            });
        });

        self.in_flight.insert(params, InFlight { token, fetch });
    }

    fn apply_search(
        &mut self,
        params: QueryParams,
        token: RequestToken,
        result: Result<Vec<Course>, ApiError>,
    ) -> bool {
        match self.in_flight.get(&params) {
            Some(pending) if pending.token == token => {}
            Some(pending) => {
                tracing::debug!(
                    "Dropping stale request {} for {} (latest is {})",
                    token.0,
                    params,
                    pending.token.0
                );
                return false;
            }
            None => {
                tracing::debug!("Dropping request {} for forgotten params {}", token.0, params);
                return false;
            }
        }
        self.in_flight.remove(&params);

        let is_current = self.current.as_ref() == Some(&params);

        match result {
            Ok(courses) => {
                tracing::info!("Request {} returned {} result(s)", token.0, courses.len());
                self.settle(params, QueryState::Success(courses), is_current);
                is_current
            }
            Err(err) if is_current => {
                tracing::warn!("Request {} for {} failed: {}", token.0, params, err);
                self.settle(params, QueryState::Failure(err.to_string()), true);
                true
            }
            Err(err) => {
                tracing::debug!("Dropping failure of superseded request {}: {}", token.0, err);
                false
            }
        }
    }

    /// Stores a finished search, evicting the least recently used entry when full.
    /// The current search is never the one evicted.
    fn settle(&mut self, params: QueryParams, state: QueryState<Vec<Course>>, is_current: bool) {
        if !is_current && self.settled.len() >= self.settled.cap().get() {
            if let Some(current) = &self.current {
                self.settled.promote(current);
            }
            let lru_is_current = self
                .settled
                .peek_lru()
                .is_some_and(|(key, _)| Some(key) == self.current.as_ref());
            if lru_is_current {
                tracing::debug!("Cache full, not keeping superseded results for {}", params);
                return;
            }
        }

        if let Some((evicted, _)) = self.settled.push(params, state) {
            tracing::debug!("Evicted cached results for {}", evicted);
        }
    }

    fn apply_subjects(
        &mut self,
        token: RequestToken,
        result: Result<Vec<String>, ApiError>,
    ) -> bool {
        match &self.subjects_fetch {
            Some((pending, _)) if *pending == token => {}
            _ => {
                tracing::debug!("Dropping stale subjects request {}", token.0);
                return false;
            }
        }
        self.subjects_fetch = None;

        self.subjects = match result {
            Ok(subjects) => {
                tracing::info!("Loaded {} subject(s)", subjects.len());
                QueryState::Success(subjects)
            }
            Err(err) => {
                tracing::warn!("Loading subjects failed: {}", err);
                QueryState::Failure(err.to_string())
            }
        };
        true
    }
}

impl<A: SearchApi> Drop for QueryExecutor<A> {
    fn drop(&mut self) {
        self.reset();
    }
}

/// Case-insensitive prefix match over loaded subject codes, keeping their order.
pub fn suggest_subjects<'a>(subjects: &'a [String], prefix: &str) -> Vec<&'a str> {
    let prefix = prefix.trim().to_lowercase();
    subjects
        .iter()
        .filter(|subject| subject.to_lowercase().starts_with(&prefix))
        .map(String::as_str)
        .collect()
}
