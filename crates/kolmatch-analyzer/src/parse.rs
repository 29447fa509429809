//! Tolerant parsing of model replies.
//!
//! Replies are supposed to be a single JSON object but often arrive wrapped
//! in markdown fences or prose, or as loosely formatted `field: value` lines.
//! Parsing runs an ordered strategy chain — fenced/embedded JSON, whole-body
//! JSON, line-based field extraction — and the first success wins. Nothing
//! in here returns an error; the final fallback is a defaulted struct.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use kolmatch_core::{BrandProfile, MatchAnalysis};

/// Ordered JSON-producing strategies, tried before line-based extraction.
const JSON_STRATEGIES: &[fn(&str) -> Option<Value>] = &[parse_fenced_json, parse_whole_body];

/// Parse a brand-profile reply into a [`BrandProfile`].
///
/// Absent or unusable fields default to empty; a completely unusable reply
/// yields `BrandProfile::default()`.
#[must_use]
pub fn parse_brand_profile(response: &str) -> BrandProfile {
    for strategy in JSON_STRATEGIES {
        if let Some(v) = strategy(response) {
            return BrandProfile {
                industry: text_field(&v, "industry"),
                target_audience: text_field(&v, "target_audience"),
                brand_voice: text_field(&v, "brand_voice"),
                key_themes: list_field(&v, "key_themes"),
                keywords: list_field(&v, "keywords"),
            };
        }
    }
    line_based_brand_profile(response)
}

/// Parse a match-analysis reply into a [`MatchAnalysis`].
///
/// `match_score` coercion: JSON number → integer; string → first numeric
/// substring, else 50; any other shape → 50; absent → 0.
#[must_use]
pub fn parse_match_analysis(response: &str) -> MatchAnalysis {
    for strategy in JSON_STRATEGIES {
        if let Some(v) = strategy(response) {
            return MatchAnalysis {
                match_score: coerce_match_score(v.get("match_score")),
                audience_fit: text_field(&v, "audience_fit"),
                content_alignment: text_field(&v, "content_alignment"),
                collaboration_potential: text_field(&v, "collaboration_potential"),
                match_reasons: list_field(&v, "match_reasons"),
                cautions: list_field(&v, "cautions"),
            };
        }
    }
    line_based_match_analysis(response)
}

/// Extract a JSON object from markdown fences or the first `{...}` span.
fn parse_fenced_json(response: &str) -> Option<Value> {
    static BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    let re = BLOCK_RE.get_or_init(|| {
        Regex::new(r"(?s)```json\n(.*?)\n```|```(.*?)```|(\{.*\})").expect("valid regex")
    });
    let caps = re.captures(response)?;
    let block = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str();
    serde_json::from_str::<Value>(block)
        .ok()
        .filter(Value::is_object)
}

/// Parse the entire trimmed reply as JSON.
fn parse_whole_body(response: &str) -> Option<Value> {
    serde_json::from_str::<Value>(response.trim())
        .ok()
        .filter(Value::is_object)
}

fn text_field(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn list_field(v: &Value, key: &str) -> Vec<String> {
    v.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map_or_else(|| item.to_string(), str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_match_score(value: Option<&Value>) -> i64 {
    match value {
        None => 0,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(50),
        Some(Value::String(s)) => first_number(s).unwrap_or(50),
        Some(_) => 50,
    }
}

/// First run of digits in `s`, parsed as an integer.
fn first_number(s: &str) -> Option<i64> {
    static DIGITS_RE: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS_RE.get_or_init(|| Regex::new(r"\d+").expect("valid regex"));
    re.find(s)?.as_str().parse().ok()
}

fn field_tail(line: &str) -> String {
    line.splitn(2, ':').nth(1).unwrap_or("").trim().to_string()
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn line_based_brand_profile(response: &str) -> BrandProfile {
    let mut profile = BrandProfile::default();
    for line in response.lines() {
        let lower = line.to_lowercase();
        if lower.contains("industry:") {
            profile.industry = field_tail(line);
        } else if lower.contains("target audience:") {
            profile.target_audience = field_tail(line);
        } else if lower.contains("brand voice:") {
            profile.brand_voice = field_tail(line);
        } else if lower.contains("key themes:") || lower.contains("themes:") {
            profile.key_themes = split_list(&field_tail(line));
        } else if lower.contains("keywords:") {
            profile.keywords = split_list(&field_tail(line));
        }
    }
    profile
}

fn line_based_match_analysis(response: &str) -> MatchAnalysis {
    let mut analysis = MatchAnalysis::default();
    for line in response.lines() {
        let lower = line.to_lowercase();
        if lower.contains("match score:") {
            analysis.match_score = first_number(&field_tail(line)).unwrap_or(50);
        } else if lower.contains("audience fit:") {
            analysis.audience_fit = field_tail(line);
        } else if lower.contains("content alignment:") {
            analysis.content_alignment = field_tail(line);
        } else if lower.contains("collaboration potential:") {
            analysis.collaboration_potential = field_tail(line);
        } else if lower.contains("match reasons:") || lower.contains("reasons:") {
            analysis.match_reasons = split_list(&field_tail(line));
        } else if lower.contains("cautions:") || lower.contains("concerns:") {
            analysis.cautions = split_list(&field_tail(line));
        }
    }
    analysis
}
