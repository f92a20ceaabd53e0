//! Test Support
//!
//! A scripted, in-memory `SearchApi` for unit tests. Replies are either looked up
//! immediately by query text, or (in gated mode) held until the test releases them,
//! which lets tests force any completion order.

use crate::api::client::SearchApi;
use crate::api::error::ApiError;
use crate::api::types::Course;
use crate::query::types::QueryParams;

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Courses(Vec<Course>),
    Status(u16),
}

impl Reply {
    fn into_result(self) -> Result<Vec<Course>, ApiError> {
        match self {
            Reply::Courses(courses) => Ok(courses),
            Reply::Status(status) => Err(ApiError::Http(status)),
        }
    }
}

pub(crate) struct ScriptedApi {
    gated: bool,
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<QueryParams>>,
    gates: Mutex<Vec<(QueryParams, oneshot::Sender<Reply>)>>,
    subjects: Mutex<Result<Vec<String>, u16>>,
    subject_calls: AtomicUsize,
}

impl ScriptedApi {
    /// Answers every search immediately (empty results unless scripted).
    pub(crate) fn immediate() -> Self {
        Self::with_mode(false)
    }

    /// Holds every search until `release` is called for it.
    pub(crate) fn gated() -> Self {
        Self::with_mode(true)
    }

    fn with_mode(gated: bool) -> Self {
        Self {
            gated,
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            gates: Mutex::new(Vec::new()),
            subjects: Mutex::new(Ok(vec!["CS".to_string(), "HADM".to_string()])),
            subject_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn reply(self, query: &str, reply: Reply) -> Self {
        self.replies.lock().unwrap().insert(query.to_string(), reply);
        self
    }

    pub(crate) fn subjects_reply(self, reply: Result<Vec<String>, u16>) -> Self {
        *self.subjects.lock().unwrap() = reply;
        self
    }

    pub(crate) fn calls(&self) -> Vec<QueryParams> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn subject_calls(&self) -> usize {
        self.subject_calls.load(Ordering::SeqCst)
    }

    /// Releases the oldest held search for `query`. Returns `false` if none is waiting.
    pub(crate) fn release(&self, query: &str, reply: Reply) -> bool {
        let mut gates = self.gates.lock().unwrap();
        match gates.iter().position(|(params, _)| params.query() == query) {
            Some(idx) => {
                let (_, sender) = gates.remove(idx);
                sender.send(reply).is_ok()
            }
            None => false,
        }
    }

    fn record(&self, params: &QueryParams) {
        self.calls.lock().unwrap().push(params.clone());
    }

    fn scripted(&self, query: &str) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or(Reply::Courses(Vec::new()))
    }

    fn open_gate(&self, params: &QueryParams) -> oneshot::Receiver<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push((params.clone(), tx));
        rx
    }

    fn scripted_subjects(&self) -> Result<Vec<String>, ApiError> {
        self.subject_calls.fetch_add(1, Ordering::SeqCst);
        self.subjects.lock().unwrap().clone().map_err(ApiError::Http)
    }
}

impl SearchApi for ScriptedApi {
    async fn search(&self, params: &QueryParams) -> Result<Vec<Course>, ApiError> {
        self.record(params);

        if !self.gated {
            return self.scripted(params.query()).into_result();
        }

        let gate = self.open_gate(params);
        match gate.await {
            Ok(reply) => reply.into_result(),
            Err(_) => Err(ApiError::Network("gate dropped".to_string())),
        }
    }

    async fn subjects(&self) -> Result<Vec<String>, ApiError> {
        self.scripted_subjects()
    }
}

pub(crate) fn course(id: &str, subject: &str, title: &str, score: f64) -> Course {
    Course {
        id: id.to_string(),
        subject: subject.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        relevance_score: score,
    }
}

/// Lets spawned tasks on the current-thread test runtime make progress.
pub(crate) async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
