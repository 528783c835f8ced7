//! Gemini-backed [`engine::Assistant`].
//!
//! Talks to the `generateContent` REST endpoint with structured JSON output
//! for record extraction and plain text for spending advice.

pub use client::GeminiClient;
pub use config::{API_KEY_FALLBACKS, GeminiConfig};

mod client;
mod config;
mod prompt;
mod wire;
