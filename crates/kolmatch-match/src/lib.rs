//! Match scoring and ranking.
//!
//! Combines the qualitative AI assessment with a TF-IDF cosine text
//! similarity and a capped engagement bonus into one composite score, then
//! ranks candidates for a brand.

pub mod engine;
pub mod scorer;
pub mod similarity;

pub use engine::MatchEngine;
pub use scorer::score_candidate;
pub use similarity::text_similarity;
