pub mod audit;
pub mod identifiers;
pub mod redaction;
pub mod summary;
