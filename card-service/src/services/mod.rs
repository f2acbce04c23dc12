//! Provider integration and failure classification.

pub mod classify;
pub mod providers;
