use std::num::NonZeroU32;
use tokio::time::Instant;

/// Messages accepted by the session event loop.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// The raw text changed. `at` is when the edit happened, so queueing delay does not
    /// stretch the debounce window.
    Input { raw: String, at: Instant },
    /// Commit the current raw text now.
    Submit,
    SetLimit(Option<NonZeroU32>),
    SetSubjectFilter(Option<String>),
    /// Load subject codes if they are not loaded or loading.
    LoadSubjects,
    Shutdown,
}
