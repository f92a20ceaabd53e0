//! Query Input & Debounce Module
//!
//! Converts a high-frequency stream of raw text edits into a low-frequency stream of
//! committed queries.
//!
//! ## Behaviour
//! - **Trailing edge only**: a value is committed once no edit has arrived for the quiet
//!   window. Every edit restarts the window; nothing is emitted on the leading edge.
//! - **Submit**: bypasses the window, cancelling whatever was pending.
//! - **Teardown**: a cancelled debouncer holds no deadline, so nothing can fire later.
//!
//! The debouncer is a plain state machine over deadlines. It never sleeps itself; the
//! owning event loop waits on `deadline()` and calls `poll_expired`. It does timing only,
//! never dedup: identical submits are all passed through.
//!
//! ## Submodules
//! - **`input`**: The raw, unthrottled text being typed.
//! - **`debouncer`**: The deadline state machine.

pub mod debouncer;
pub mod input;
