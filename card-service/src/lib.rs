//! Holiday card image service.
//!
//! A stateless HTTP proxy that forwards an uploaded photo plus a named
//! background style to the Gemini image generation API and relays the first
//! returned image artifact back to the client. The API key stays server-side;
//! clients only ever see classified, user-safe error messages.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
