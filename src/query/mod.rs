//! Query Cache & Executor Module
//!
//! Turns committed queries into network fetches and exposes the outcome as a single,
//! always-consistent state for the current query.
//!
//! ## Guarantees
//! 1. **Idle on empty**: an empty committed query never reaches the network.
//! 2. **Dedup**: at most one in-flight fetch per distinct `QueryParams`.
//! 3. **Staleness**: every fetch carries a `RequestToken`; a completion is only applied
//!    if its entry still holds that token, and the view is always derived from the
//!    *current* params, so out-of-order responses can never overwrite it.
//!
//! ## Submodules
//! - **`types`**: `QueryParams`, `QueryState`, `RequestToken`.
//! - **`executor`**: The search cache and the subjects loader.

pub mod executor;
pub mod types;
