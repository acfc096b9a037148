//! Google Gemini provider
//!
//! A thin `generateContent` client: one POST per description, no streaming,
//! no retries.

pub mod client;
pub mod config;
pub mod convert;
pub mod errors;
pub mod headers;
pub mod types;

pub use client::GeminiClient;
pub use config::{DEFAULT_BASE_URL, GEMINI_MODEL, GeminiConfig};
