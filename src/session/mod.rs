//! Search Session Module
//!
//! One interactive search surface: raw input, debouncer, query executor and the published
//! view, all owned by a single event loop running on one tokio task.
//!
//! ## Architecture Overview
//! 1. **Commands**: The `SearchSession` handle turns user actions (typing, submit, filter
//!    changes) into `SessionCommand`s on an unbounded channel.
//! 2. **Event loop**: The loop waits on three sources at once: commands, fetch completions
//!    and the debounce deadline. Every state change happens inside the loop, so nothing
//!    needs a lock.
//! 3. **View**: After each event the loop publishes a `SearchView` snapshot through a
//!    `watch` channel, before it looks at the next event.
//! 4. **Teardown**: When the handle is dropped or shut down, the loop cancels the pending
//!    commit and aborts in-flight fetches without waiting for them.
//!
//! ## Submodules
//! - **`protocol`**: Commands accepted by the loop.
//! - **`types`**: The published `SearchView` and `SessionError`.
//! - **`service`**: The handle and the event loop.

pub mod protocol;
pub mod service;
pub mod types;
