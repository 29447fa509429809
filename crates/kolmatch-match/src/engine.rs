//! Ranking engine: retrieve, score, sort, truncate.

use std::cmp::Ordering;

use futures::stream::{self, StreamExt};

use kolmatch_core::{
    BrandProfile, CandidateProfile, CandidateSearch, MatchAnalysis, MatchAnalyzer, MatchResult,
};
use kolmatch_search::KolRetriever;

use crate::scorer::score_candidate;

/// Retrieval headroom: fetch this many times the requested count so that the
/// ranking has candidates to discard.
const RETRIEVAL_HEADROOM: usize = 3;

/// Orchestrates the retriever and the analyzer into a ranked shortlist.
pub struct MatchEngine<S, A> {
    retriever: KolRetriever<S>,
    analyzer: A,
    max_concurrent_scoring: usize,
}

impl<S: CandidateSearch, A: MatchAnalyzer> MatchEngine<S, A> {
    #[must_use]
    pub fn new(retriever: KolRetriever<S>, analyzer: A, max_concurrent_scoring: usize) -> Self {
        Self {
            retriever,
            analyzer,
            max_concurrent_scoring,
        }
    }

    /// Find the top `limit` matching KOLs for a brand.
    ///
    /// Retrieves `limit * 3` candidates, scores all of them concurrently
    /// (bounded, order-preserving, so completion order cannot influence the
    /// result), sorts by composite score descending with ties keeping their
    /// pre-sort order, and truncates to `limit`. When fewer than `limit`
    /// candidates exist, returns whatever is available.
    pub async fn find_matching_kols(&self, brand: &BrandProfile, limit: usize) -> Vec<MatchResult> {
        let candidates = self
            .retriever
            .find_candidates(brand, limit.saturating_mul(RETRIEVAL_HEADROOM))
            .await;
        tracing::info!(count = candidates.len(), "scoring retrieved candidates");

        let concurrency = self.max_concurrent_scoring.max(1);
        let mut results: Vec<MatchResult> = stream::iter(candidates)
            .map(|candidate| self.score_one(brand, candidate))
            .buffered(concurrency)
            .collect()
            .await;

        results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
        });
        results.truncate(limit);
        results
    }

    /// Score a single candidate. An analysis failure degrades to the zeroed
    /// default and never aborts the batch.
    async fn score_one(&self, brand: &BrandProfile, candidate: CandidateProfile) -> MatchResult {
        let analysis = match self.analyzer.analyze_match(brand, &candidate).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(
                    candidate = %candidate.username,
                    error = %e,
                    "match analysis failed, scoring with degraded default"
                );
                MatchAnalysis::default()
            }
        };
        score_candidate(brand, candidate, analysis)
    }
}
