//! Candidate retrieval: keyword derivation, hashtag expansion, batched
//! search, and first-seen-wins dedup by username.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use kolmatch_core::{BrandProfile, CandidateProfile, CandidateSearch, RawSearchItem};

/// Keywords per search batch; one actor call is issued per batch.
const KEYWORD_BATCH_SIZE: usize = 3;

/// Hashtag cap per actor call.
const MAX_TAGS_PER_BATCH: usize = 10;

/// Thai-script market suffix appended to each hashtag variant.
const THAI_SUFFIX: &str = "ไทย";

/// Builds candidate lists from a brand profile via a [`CandidateSearch`]
/// backend.
pub struct KolRetriever<S> {
    search: S,
    results_per_page: usize,
}

impl<S: CandidateSearch> KolRetriever<S> {
    #[must_use]
    pub fn new(search: S, results_per_page: usize) -> Self {
        Self {
            search,
            results_per_page,
        }
    }

    /// Find up to `target_limit` unique candidates for a brand.
    ///
    /// Issues one search call per keyword batch, deduplicates by username
    /// (first occurrence wins), and stops fetching once the limit is
    /// reached. Identical batches within the run are served from a local
    /// cache. The returned list is sorted by follower count descending
    /// (stable) and truncated to `target_limit`.
    ///
    /// Any search failure aborts retrieval for this invocation and yields an
    /// empty list; the failure is logged, not propagated.
    pub async fn find_candidates(
        &self,
        brand: &BrandProfile,
        target_limit: usize,
    ) -> Vec<CandidateProfile> {
        let keywords = derive_search_keywords(brand);
        tracing::info!(?keywords, "derived search keywords");

        let mut candidates: Vec<CandidateProfile> = Vec::new();
        let mut seen_usernames: HashSet<String> = HashSet::new();
        let mut batch_cache: HashMap<Vec<String>, Vec<RawSearchItem>> = HashMap::new();
        let results_per_page = self.results_per_page.min(target_limit.max(1));

        for batch in keywords.chunks(KEYWORD_BATCH_SIZE) {
            if candidates.len() >= target_limit {
                break;
            }

            let tags = expand_hashtags(batch);
            if tags.is_empty() {
                continue;
            }

            let mut cache_key = tags.clone();
            cache_key.sort_unstable();

            let items = if let Some(cached) = batch_cache.get(&cache_key) {
                tracing::debug!(tags = ?cache_key, "search batch served from cache");
                cached.clone()
            } else {
                tracing::info!(tag_count = tags.len(), first_tags = ?&tags[..tags.len().min(5)], "searching TikTok hashtags");
                match self.search.search_videos(&tags, results_per_page).await {
                    Ok(items) => {
                        batch_cache.insert(cache_key, items.clone());
                        items
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "candidate search failed, aborting retrieval");
                        return Vec::new();
                    }
                }
            };

            for item in items {
                if candidates.len() >= target_limit {
                    break;
                }
                let Some(username) = extract_username(&item.web_video_url) else {
                    continue;
                };
                if seen_usernames.insert(username.clone()) {
                    candidates.push(candidate_from_item(username, item));
                }
            }
        }

        candidates.sort_by(|a, b| b.follower_count.cmp(&a.follower_count));
        candidates.truncate(target_limit);
        candidates
    }
}

/// Derive the search keyword list for a brand: up to 5 keywords, the
/// industry, and up to 3 key themes. Empty strings and strings of two or
/// fewer characters are dropped, and duplicates removed. Callers must not
/// rely on the ordering.
#[must_use]
pub fn derive_search_keywords(brand: &BrandProfile) -> Vec<String> {
    let mut raw: Vec<&str> = Vec::new();
    raw.extend(brand.keywords.iter().take(5).map(String::as_str));
    raw.push(brand.industry.as_str());
    raw.extend(brand.key_themes.iter().take(3).map(String::as_str));

    let mut seen: HashSet<&str> = HashSet::new();
    raw.into_iter()
        .filter(|kw| kw.chars().count() > 2)
        .filter(|kw| seen.insert(*kw))
        .map(str::to_string)
        .collect()
}

/// Expand a keyword batch into hashtag variants: the bare keyword
/// (lowercased, whitespace removed), a Thai-script variant, and a
/// `thailand`-suffixed variant. Duplicates are removed and the result is
/// capped at 10 tags.
#[must_use]
pub fn expand_hashtags(batch: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for keyword in batch {
        let clean: String = keyword
            .split_whitespace()
            .collect::<String>()
            .to_lowercase();
        if clean.is_empty() {
            continue;
        }
        for tag in [
            clean.clone(),
            format!("{clean}{THAI_SUFFIX}"),
            format!("{clean}thailand"),
        ] {
            if seen.insert(tag.clone()) {
                tags.push(tag);
            }
        }
    }

    tags.truncate(MAX_TAGS_PER_BATCH);
    tags
}

/// Extract the `@handle` segment from a video URL. Returns `None` for empty
/// URLs or URLs without an `@handle` segment.
fn extract_username(url: &str) -> Option<String> {
    static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
    if url.is_empty() {
        return None;
    }
    let re = USERNAME_RE.get_or_init(|| Regex::new("@([^/]+)").expect("valid regex"));
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn candidate_from_item(username: String, item: RawSearchItem) -> CandidateProfile {
    CandidateProfile {
        username,
        nickname: item.author.name,
        biography: item.author.signature,
        follower_count: item.author.fans,
        video_count: item.author.video,
        total_likes: item.author.heart,
        video_texts: item.text,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kolmatch_core::{RawAuthorMeta, ServiceError};

    use super::*;

    fn brand() -> BrandProfile {
        BrandProfile {
            industry: "Cosmetics".to_string(),
            target_audience: String::new(),
            brand_voice: String::new(),
            key_themes: vec![
                "natural ingredients".to_string(),
                "sustainability".to_string(),
                "self-care".to_string(),
            ],
            keywords: vec![
                "skincare".to_string(),
                "organic".to_string(),
                "beauty".to_string(),
                "thai".to_string(),
                "wellness".to_string(),
            ],
        }
    }

    fn item(username: &str, fans: u64) -> RawSearchItem {
        RawSearchItem {
            web_video_url: format!("https://www.tiktok.com/@{username}/video/123"),
            text: "sample caption".to_string(),
            author: RawAuthorMeta {
                name: username.to_uppercase(),
                signature: format!("{username} bio"),
                video: 10,
                fans,
                heart: 1000.0,
            },
        }
    }

    /// In-memory search backend: serves a fixed item list, or fails.
    struct FakeSearch {
        items: Vec<RawSearchItem>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeSearch {
        fn with_items(items: Vec<RawSearchItem>) -> Self {
            Self {
                items,
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                items: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl CandidateSearch for FakeSearch {
        async fn search_videos(
            &self,
            _tags: &[String],
            _results_per_page: usize,
        ) -> Result<Vec<RawSearchItem>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ServiceError::Api("actor run failed".to_string()));
            }
            Ok(self.items.clone())
        }
    }

    #[test]
    fn derives_expected_keyword_set() {
        let derived: HashSet<String> = derive_search_keywords(&brand()).into_iter().collect();
        let expected: HashSet<String> = [
            "skincare",
            "organic",
            "beauty",
            "thai",
            "wellness",
            "Cosmetics",
            "natural ingredients",
            "sustainability",
            "self-care",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        assert_eq!(derived, expected);
    }

    #[test]
    fn keyword_derivation_drops_short_and_empty() {
        let b = BrandProfile {
            industry: String::new(),
            keywords: vec!["ok".to_string(), String::new(), "skincare".to_string()],
            ..BrandProfile::default()
        };
        let derived = derive_search_keywords(&b);
        assert_eq!(derived, vec!["skincare".to_string()]);
    }

    #[test]
    fn keyword_derivation_caps_keywords_and_themes() {
        let b = BrandProfile {
            industry: "Food".to_string(),
            keywords: (0..10).map(|i| format!("keyword{i}")).collect(),
            key_themes: (0..6).map(|i| format!("theme{i}")).collect(),
            ..BrandProfile::default()
        };
        let derived = derive_search_keywords(&b);
        // 5 keywords + industry + 3 themes
        assert_eq!(derived.len(), 9);
        assert!(derived.contains(&"keyword4".to_string()));
        assert!(!derived.contains(&"keyword5".to_string()));
        assert!(derived.contains(&"theme2".to_string()));
        assert!(!derived.contains(&"theme3".to_string()));
    }

    #[test]
    fn hashtag_expansion_produces_three_variants() {
        let tags = expand_hashtags(&["Skin Care".to_string()]);
        assert_eq!(
            tags,
            vec![
                "skincare".to_string(),
                format!("skincare{THAI_SUFFIX}"),
                "skincarethailand".to_string(),
            ]
        );
    }

    #[test]
    fn hashtag_expansion_caps_at_ten() {
        let batch: Vec<String> = (0..4).map(|i| format!("keyword{i}")).collect();
        let tags = expand_hashtags(&batch);
        assert_eq!(tags.len(), 10);
    }

    #[test]
    fn hashtag_expansion_skips_whitespace_only_keywords() {
        let tags = expand_hashtags(&["   ".to_string()]);
        assert!(tags.is_empty());
    }

    #[test]
    fn extracts_username_from_video_url() {
        assert_eq!(
            extract_username("https://www.tiktok.com/@mintkol/video/99"),
            Some("mintkol".to_string())
        );
        assert_eq!(extract_username(""), None);
        assert_eq!(extract_username("https://www.tiktok.com/discover"), None);
    }

    #[tokio::test]
    async fn dedups_usernames_first_occurrence_wins() {
        let mut first = item("mint", 100);
        first.author.signature = "first bio".to_string();
        let mut dup = item("mint", 9999);
        dup.author.signature = "second bio".to_string();
        let search = FakeSearch::with_items(vec![first, dup, item("fah", 50)]);
        let retriever = KolRetriever::new(search, 10);

        let candidates = retriever.find_candidates(&brand(), 10).await;
        let usernames: Vec<&str> = candidates.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(
            usernames.iter().collect::<HashSet<_>>().len(),
            usernames.len(),
            "usernames must be unique: {usernames:?}"
        );
        let mint = candidates
            .iter()
            .find(|c| c.username == "mint")
            .expect("mint retained");
        assert_eq!(mint.biography, "first bio");
        assert_eq!(mint.follower_count, 100);
    }

    #[tokio::test]
    async fn never_returns_more_than_target_limit() {
        let items: Vec<RawSearchItem> = (0..20).map(|i| item(&format!("kol{i}"), i)).collect();
        let search = FakeSearch::with_items(items);
        let retriever = KolRetriever::new(search, 10);

        let candidates = retriever.find_candidates(&brand(), 7).await;
        assert_eq!(candidates.len(), 7);
    }

    #[tokio::test]
    async fn sorts_by_follower_count_descending() {
        let search = FakeSearch::with_items(vec![
            item("small", 10),
            item("big", 5000),
            item("mid", 700),
        ]);
        let retriever = KolRetriever::new(search, 10);

        let candidates = retriever.find_candidates(&brand(), 10).await;
        let followers: Vec<u64> = candidates.iter().map(|c| c.follower_count).collect();
        assert_eq!(followers, vec![5000, 700, 10]);
    }

    #[tokio::test]
    async fn search_failure_yields_empty_list() {
        let retriever = KolRetriever::new(FakeSearch::failing(), 10);
        let candidates = retriever.find_candidates(&brand(), 10).await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn stops_issuing_batches_once_limit_reached() {
        // 9 keywords -> 3 batches; the first batch already fills the limit.
        let items: Vec<RawSearchItem> = (0..5).map(|i| item(&format!("kol{i}"), i)).collect();
        let search = FakeSearch::with_items(items);
        let retriever = KolRetriever::new(search, 10);

        let candidates = retriever.find_candidates(&brand(), 3).await;
        assert_eq!(candidates.len(), 3);
        assert_eq!(retriever.search.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn skips_items_without_extractable_username() {
        let mut no_url = item("ignored", 10);
        no_url.web_video_url = String::new();
        let mut bad_url = item("ignored2", 10);
        bad_url.web_video_url = "https://www.tiktok.com/discover/foo".to_string();
        let search = FakeSearch::with_items(vec![no_url, bad_url, item("real", 42)]);
        let retriever = KolRetriever::new(search, 10);

        let candidates = retriever.find_candidates(&brand(), 10).await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].username, "real");
    }

    #[tokio::test]
    async fn empty_keyword_set_returns_empty_without_search_calls() {
        let search = FakeSearch::with_items(vec![item("kol", 1)]);
        let retriever = KolRetriever::new(search, 10);
        let empty_brand = BrandProfile::default();

        let candidates = retriever.find_candidates(&empty_brand, 10).await;
        assert!(candidates.is_empty());
        assert_eq!(retriever.search.calls.load(Ordering::SeqCst), 0);
    }
}
