//! celara-ollama
//!
//! Local model invocation over the Ollama HTTP API. The scrubbed
//! narrative is the only payload that ever crosses this boundary.

pub mod client;
pub mod error;
pub mod prompt;
