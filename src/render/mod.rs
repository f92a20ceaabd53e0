//! Results Rendering Module
//!
//! Pure projection of the current query state into exactly one visual state:
//! nothing, loading placeholders, an error, a list of course rows, or "no results".
//!
//! The projection needs only the query state and whether the committed query is empty;
//! the text rendering (`Display`) is what the terminal front end prints.

pub mod view;
