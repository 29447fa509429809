//! Boundary traits for the external search and analysis services.
//!
//! Both services are opaque fallible black boxes: the pipeline only sees
//! `Result<Response, ServiceError>` and decides per call site how to degrade.
//! Implementers can swap the backing provider without touching scoring logic.

use std::future::Future;

use thiserror::Error;

use crate::types::{BrandProfile, CandidateProfile, MatchAnalysis, RawSearchItem};

/// Error from an external service call.
///
/// The pipeline never propagates these past a component boundary; they are
/// logged and replaced with a well-defined empty/default value.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service returned error: {0}")]
    Api(String),

    #[error("unexpected response shape: {0}")]
    Response(String),
}

/// Qualitative brand/candidate match assessment.
pub trait MatchAnalyzer {
    /// Assess how well `candidate` fits `brand`.
    ///
    /// Malformed response *content* must be normalized inside the
    /// implementation (defaults, not errors); only transport and API-level
    /// failures surface as `Err`.
    fn analyze_match(
        &self,
        brand: &BrandProfile,
        candidate: &CandidateProfile,
    ) -> impl Future<Output = Result<MatchAnalysis, ServiceError>> + Send;
}

/// Hashtag-driven candidate video search.
pub trait CandidateSearch {
    /// Search for videos matching any of `tags`, returning raw records.
    fn search_videos(
        &self,
        tags: &[String],
        results_per_page: usize,
    ) -> impl Future<Output = Result<Vec<RawSearchItem>, ServiceError>> + Send;
}
