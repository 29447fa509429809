//! Composite match scoring for a single brand/candidate pair.

use kolmatch_core::{BrandProfile, CandidateProfile, MatchAnalysis, MatchResult};

use crate::similarity::text_similarity;

/// The qualitative AI signal dominates; textual overlap corroborates;
/// engagement is a minor adjustment.
const AI_WEIGHT: f64 = 0.65;
const SIMILARITY_WEIGHT: f64 = 0.25;
const ENGAGEMENT_WEIGHT: f64 = 0.10;

/// Cap on the likes-per-100-followers bonus, so pathological ratios (tiny
/// follower counts with many likes) cannot dominate the composite score.
const ENGAGEMENT_BONUS_CAP: f64 = 50.0;

#[derive(Debug, Clone, Copy)]
pub(crate) struct EngagementMetrics {
    pub avg_likes_per_video: f64,
    pub likes_per_100_followers: f64,
}

/// Derived engagement metrics, guarded against division by zero.
pub(crate) fn engagement_metrics(candidate: &CandidateProfile) -> EngagementMetrics {
    #[allow(clippy::cast_precision_loss)]
    let videos = candidate.video_count.max(1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let followers = candidate.follower_count.max(1) as f64;

    EngagementMetrics {
        avg_likes_per_video: candidate.total_likes / videos,
        likes_per_100_followers: (candidate.total_likes / followers) * 100.0,
    }
}

/// Weighted composite in [0, 100], rounded to 1 decimal.
///
/// The AI term is clamped to its contractual [0, 100] range before
/// weighting; `engagement_bonus` is expected to be pre-capped.
pub(crate) fn composite_score(ai_score: i64, similarity: f64, engagement_bonus: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let ai = (ai_score.clamp(0, 100)) as f64;
    let combined = AI_WEIGHT * ai
        + SIMILARITY_WEIGHT * (similarity * 100.0)
        + ENGAGEMENT_WEIGHT * engagement_bonus;
    round_to(combined, 1)
}

/// Score one candidate against a brand, producing the final [`MatchResult`].
///
/// Deterministic for identical inputs: the same (brand, candidate, analysis)
/// triple always yields an identical result.
#[must_use]
pub fn score_candidate(
    brand: &BrandProfile,
    candidate: CandidateProfile,
    analysis: MatchAnalysis,
) -> MatchResult {
    let engagement = engagement_metrics(&candidate);
    let engagement_bonus = engagement.likes_per_100_followers.min(ENGAGEMENT_BONUS_CAP);

    let brand_blob = [brand.keywords.as_slice(), brand.key_themes.as_slice()]
        .concat()
        .join(" ");
    let candidate_blob = format!("{} {}", candidate.biography, candidate.video_texts);
    let similarity = text_similarity(&brand_blob, &candidate_blob);

    let match_score = composite_score(analysis.match_score, similarity, engagement_bonus);

    MatchResult {
        profile_url: format!("https://www.tiktok.com/@{}", candidate.username),
        username: candidate.username,
        nickname: candidate.nickname,
        biography: candidate.biography,
        follower_count: candidate.follower_count,
        match_score,
        engagement_avg_likes_per_video: round_to(engagement.avg_likes_per_video, 2),
        engagement_likes_per_100_followers: round_to(engagement.likes_per_100_followers, 2),
        audience_fit: analysis.audience_fit,
        content_alignment: analysis.content_alignment,
        collaboration_potential: analysis.collaboration_potential,
        match_reasons: analysis.match_reasons,
        cautions: analysis.cautions,
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.try_into().unwrap_or(1));
    (value * factor).round() / factor
}
