//! HTTP handlers for the card service.

pub mod generate;
pub mod health;
pub mod models;

pub use generate::generate;
pub use health::health_check;
pub use models::{list_models, probe_models};
