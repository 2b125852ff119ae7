//! celara-core
//!
//! Pure domain types for de-identified clinical summarization.
//! No I/O and no HTTP dependency — this is the shared vocabulary of the
//! Celara system.

pub mod error;
pub mod models;
