//! LLM-backed brand and match analysis via a local Ollama server.
//!
//! The model's replies are free text that usually, but not always, contains
//! JSON. [`parse`] normalizes whatever comes back through an ordered fallback
//! chain, so malformed content degrades to defaults instead of erroring; only
//! transport and HTTP failures surface as [`AnalyzerError`].

pub mod client;
pub mod error;
pub mod parse;
mod prompt;

pub use client::OllamaClient;
pub use error::AnalyzerError;
pub use parse::{parse_brand_profile, parse_match_analysis};
