// Gemini API module.
// Client and wire types for the generative-language generateContent endpoint.

pub mod client;
pub mod types;

pub use client::{DEFAULT_MODEL, GeminiClient};
