//! Log query engine
//!
//! Turns a user's exercise log plus optional `from`/`to`/`limit` tokens into the
//! entries a client sees. Everything here is pure and synchronous; lookups go
//! through [`ExerciseSource`] so the caller decides where records come from.

pub mod bounds;
pub mod engine;

pub use bounds::{Bound, DateRange, Verdict};
pub use engine::{
    ExerciseSource, LogEntry, LogQuery, LogView, Resolution, parse_limit, resolve_log,
};
