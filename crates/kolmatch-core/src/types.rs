use serde::{Deserialize, Serialize};

/// Structured summary of a brand's identity, produced once per run by the
/// analysis service and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandProfile {
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub brand_voice: String,
    #[serde(default)]
    pub key_themes: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl BrandProfile {
    /// True when the analysis produced nothing usable: no industry, no
    /// themes, no keywords. Callers treat this as a fatal input condition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.industry.trim().is_empty() && self.key_themes.is_empty() && self.keywords.is_empty()
    }
}

/// A TikTok creator profile assembled from raw search results.
///
/// Created by the retriever, deduplicated by `username` (first occurrence
/// wins), and never mutated after scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub video_count: u64,
    #[serde(default)]
    pub total_likes: f64,
    /// Sample text from the creator's videos, used for text similarity.
    #[serde(default)]
    pub video_texts: String,
}

/// Qualitative match assessment returned by the analysis service.
///
/// `Default` is the degraded value substituted when the service fails:
/// score 0, empty text fields, empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    #[serde(default)]
    pub match_score: i64,
    #[serde(default)]
    pub audience_fit: String,
    #[serde(default)]
    pub content_alignment: String,
    #[serde(default)]
    pub collaboration_potential: String,
    #[serde(default)]
    pub match_reasons: Vec<String>,
    #[serde(default)]
    pub cautions: Vec<String>,
}

/// A fully scored candidate, ready for ranking and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub username: String,
    pub profile_url: String,
    pub nickname: String,
    pub biography: String,
    pub follower_count: u64,
    /// Composite score in [0, 100], rounded to 1 decimal.
    pub match_score: f64,
    pub engagement_avg_likes_per_video: f64,
    pub engagement_likes_per_100_followers: f64,
    pub audience_fit: String,
    pub content_alignment: String,
    pub collaboration_potential: String,
    pub match_reasons: Vec<String>,
    pub cautions: Vec<String>,
}

/// One raw video record from the search service.
///
/// Every field is defaulted: a record missing data deserializes to empty
/// strings and zeros rather than failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSearchItem {
    #[serde(default, rename = "webVideoUrl")]
    pub web_video_url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "authorMeta")]
    pub author: RawAuthorMeta,
}

/// Nested author metadata on a raw search record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAuthorMeta {
    #[serde(default)]
    pub name: String,
    /// The creator's bio text.
    #[serde(default)]
    pub signature: String,
    /// Number of published videos.
    #[serde(default)]
    pub video: u64,
    /// Follower count.
    #[serde(default)]
    pub fans: u64,
    /// Total likes across all videos.
    #[serde(default)]
    pub heart: f64,
}

/// Pre-fetched Facebook page data handed to the brand-profile extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacebookPageData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub posts: Vec<String>,
}

/// Pre-fetched website data handed to the brand-profile extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebsiteData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub content: String,
}
