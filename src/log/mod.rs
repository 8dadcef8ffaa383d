//! Event transcript logging
//!
//! Every event received is appended to a JSONL transcript, including the
//! debug-level ones the console hides. Failure lines point readers here.

pub mod jsonl;

pub use jsonl::{EventLogger, LoggedEvent};
