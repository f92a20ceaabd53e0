//! Session Handle & Event Loop
//!
//! `SearchSession` is the cheap, synchronous front of a session; `SessionLoop` is the task
//! that owns all mutable state and applies events one at a time.

use super::protocol::SessionCommand;
use super::types::{SearchView, SessionError};
use crate::api::client::SearchApi;
use crate::config::SearchConfig;
use crate::debounce::debouncer::Debouncer;
use crate::debounce::input::QueryInput;
use crate::query::executor::{Completion, QueryExecutor};
use crate::query::types::{QueryParams, normalize_subject};

use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Handle to a running search session.
///
/// Dropping the handle closes the command channel, which ends the session the same way
/// `shutdown` does.
pub struct SearchSession {
    commands: mpsc::UnboundedSender<SessionCommand>,
    view: watch::Receiver<SearchView>,
    task: JoinHandle<()>,
}

impl SearchSession {
    /// Starts a session on the current tokio runtime. Subjects start loading right away.
    pub fn spawn<A: SearchApi>(api: Arc<A>, config: &SearchConfig) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let initial = SearchView {
            limit: config.limit,
            subject_filter: normalize_subject(config.subject_filter.clone()),
            ..SearchView::default()
        };
        let (view_tx, view_rx) = watch::channel(initial);

        let session_loop = SessionLoop {
            input: QueryInput::new(),
            debouncer: Debouncer::new(config.debounce),
            committed: String::new(),
            limit: config.limit,
            subject_filter: normalize_subject(config.subject_filter.clone()),
            executor: QueryExecutor::new(api, completion_tx)
                .with_cache_capacity(config.cache_capacity),
            commands: command_rx,
            completions: completion_rx,
            view: view_tx,
        };

        tracing::info!(
            "Starting search session (debounce {} ms)",
            config.debounce.as_millis()
        );
        let task = tokio::spawn(session_loop.run());

        Self {
            commands: command_tx,
            view: view_rx,
            task,
        }
    }

    /// Replaces the raw query text, as if typed.
    pub fn input(&self, raw: impl Into<String>) -> Result<(), SessionError> {
        self.send(SessionCommand::Input {
            raw: raw.into(),
            at: Instant::now(),
        })
    }

    /// Commits the current raw text without waiting for the debounce window.
    pub fn submit(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::Submit)
    }

    pub fn set_limit(&self, limit: Option<NonZeroU32>) -> Result<(), SessionError> {
        self.send(SessionCommand::SetLimit(limit))
    }

    pub fn set_subject_filter(&self, subject: Option<String>) -> Result<(), SessionError> {
        self.send(SessionCommand::SetSubjectFilter(subject))
    }

    pub fn load_subjects(&self) -> Result<(), SessionError> {
        self.send(SessionCommand::LoadSubjects)
    }

    /// Latest published snapshot.
    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.clone()
    }

    /// Stops the session and waits for the loop to exit. In-flight fetches are aborted,
    /// not awaited.
    pub async fn shutdown(self) {
        let _ = self.commands.send(SessionCommand::Shutdown);
        if let Err(e) = self.task.await {
            tracing::warn!("Search session ended abnormally: {}", e);
        }
    }

    fn send(&self, command: SessionCommand) -> Result<(), SessionError> {
        self.commands
            .send(command)
            .map_err(|_| SessionError::Closed)
    }
}

/// The single owner of a session's mutable state.
struct SessionLoop<A: SearchApi> {
    input: QueryInput,
    debouncer: Debouncer,
    committed: String,
    limit: Option<NonZeroU32>,
    subject_filter: Option<String>,
    executor: QueryExecutor<A>,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    completions: mpsc::UnboundedReceiver<Completion>,
    view: watch::Sender<SearchView>,
}

impl<A: SearchApi> SessionLoop<A> {
    async fn run(mut self) {
        self.executor.load_subjects();
        self.publish();

        loop {
            let deadline = self.debouncer.deadline();

            tokio::select! {
                biased;

                command = self.commands.recv() => match command {
                    Some(SessionCommand::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },

                Some(completion) = self.completions.recv() => {
                    // Stale and superseded completions leave the view as it was
                    if !self.executor.handle_completion(completion) {
                        continue;
                    }
                }

                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(query) = self.debouncer.poll_expired(Instant::now()) {
                        self.commit(query);
                    }
                }
            }

            self.publish();
        }

        self.teardown();
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Input { raw, at } => {
                if self.input.set(raw) {
                    self.debouncer.schedule(self.input.current(), at);
                }
            }
            SessionCommand::Submit => {
                let query = self.debouncer.submit(self.input.current());
                self.commit(query);
            }
            SessionCommand::SetLimit(limit) => {
                self.limit = limit;
                self.executor.commit(self.params());
            }
            SessionCommand::SetSubjectFilter(subject) => {
                self.subject_filter = normalize_subject(subject);
                self.executor.commit(self.params());
            }
            SessionCommand::LoadSubjects => self.executor.load_subjects(),
            SessionCommand::Shutdown => {}
        }
    }

    fn commit(&mut self, query: String) {
        tracing::debug!("Committed query {:?}", query);
        self.committed = query;
        self.executor.commit(self.params());
    }

    fn params(&self) -> QueryParams {
        QueryParams::new(
            self.committed.clone(),
            self.limit,
            self.subject_filter.clone(),
        )
    }

    fn publish(&self) {
        let next = SearchView {
            raw_query: self.input.current().to_string(),
            committed_query: self.committed.clone(),
            limit: self.limit,
            subject_filter: self.subject_filter.clone(),
            results: self.executor.state(),
            subjects: self.executor.subjects().clone(),
        };

        self.view.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    fn teardown(&mut self) {
        if self.debouncer.cancel() {
            tracing::debug!("Dropped pending query commit");
        }
        self.executor.reset();
        tracing::info!("Search session closed");
    }
}
