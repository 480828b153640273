//! Bridge between the UI thread and the backend worker that owns all network I/O.

pub mod commands;
pub mod runtime;
