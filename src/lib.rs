//! Course Search Client Library
//!
//! The interactive side of a semantic course search: raw keystrokes go in, ranked course
//! results (or a loading, error or empty state) come out. The remote ranking service is
//! treated as an opaque HTTP endpoint.
//!
//! ## Architecture Modules
//! The pipeline is split into small subsystems, leaves first:
//!
//! - **`api`**: The wire contract of the remote service and an HTTP client for it, behind
//!   the `SearchApi` trait.
//! - **`debounce`**: Raw query input and the trailing-edge debouncer that decides when
//!   typed text becomes a committed query.
//! - **`query`**: The query cache/executor. One fetch per distinct parameter tuple, with a
//!   request-token guard so out-of-order responses never overwrite the current view.
//! - **`render`**: Pure projection of the query state into what the user sees.
//! - **`session`**: The single event loop that wires the above together and publishes
//!   view snapshots.
//! - **`config`**: Runtime settings (service address, debounce window, filters).

pub mod api;
pub mod config;
pub mod debounce;
pub mod query;
pub mod render;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;
