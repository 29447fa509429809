//! TikTok candidate search and retrieval.
//!
//! Wraps the Apify TikTok search actor behind [`ApifyClient`] and builds
//! deduplicated, follower-ranked candidate lists with [`KolRetriever`]:
//! keyword derivation from the brand profile, Thai-market hashtag variants,
//! batched search calls, and first-seen-wins username dedup.

pub mod client;
pub mod error;
pub mod retriever;

pub use client::ApifyClient;
pub use error::SearchError;
pub use retriever::{derive_search_keywords, expand_hashtags, KolRetriever};
