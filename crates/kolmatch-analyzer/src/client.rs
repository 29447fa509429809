//! HTTP client for the Ollama chat API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use kolmatch_core::{
    BrandProfile, CandidateProfile, FacebookPageData, MatchAnalysis, MatchAnalyzer, ServiceError,
    WebsiteData,
};

use crate::error::AnalyzerError;
use crate::parse::{parse_brand_profile, parse_match_analysis};
use crate::prompt::{build_brand_prompt, build_match_prompt};

/// Client for a chat model served by Ollama.
///
/// Point `base_url` at the Ollama server root (`http://localhost:11434` in
/// production, a wiremock server in tests).
pub struct OllamaClient {
    client: Client,
    model: String,
    chat_url: Url,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: ChatResponseMessage,
}

#[derive(Deserialize, Default)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

impl OllamaClient {
    /// Creates a new client for the given Ollama server and model.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AnalyzerError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, AnalyzerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("kolmatch/0.1 (kol-matching)")
            .build()?;

        let chat_url = format!("{}/api/chat", base_url.trim_end_matches('/'));
        let chat_url = Url::parse(&chat_url)
            .map_err(|e| AnalyzerError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            model: model.to_owned(),
            chat_url,
        })
    }

    /// Extract a brand profile from pre-fetched Facebook page and website
    /// records.
    ///
    /// Malformed reply content degrades to a (possibly empty) defaulted
    /// profile; callers decide whether an empty profile is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError`] only on transport or HTTP failure.
    pub async fn extract_brand_profile(
        &self,
        fb: &FacebookPageData,
        website: &WebsiteData,
    ) -> Result<BrandProfile, AnalyzerError> {
        let prompt = build_brand_prompt(fb, website);
        let reply = self.chat(&prompt).await?;
        let profile = parse_brand_profile(&reply);
        tracing::debug!(
            industry = %profile.industry,
            keyword_count = profile.keywords.len(),
            theme_count = profile.key_themes.len(),
            "extracted brand profile"
        );
        Ok(profile)
    }

    /// Send one user prompt and return the reply content.
    async fn chat(&self, prompt: &str) -> Result<String, AnalyzerError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .client
            .post(self.chat_url.clone())
            .json(&request)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Api(format!("chat response parse error: {e}")))?;

        Ok(body.message.content)
    }
}

impl MatchAnalyzer for OllamaClient {
    async fn analyze_match(
        &self,
        brand: &BrandProfile,
        candidate: &CandidateProfile,
    ) -> Result<MatchAnalysis, ServiceError> {
        let prompt = build_match_prompt(brand, candidate);
        let reply = self.chat(&prompt).await.map_err(ServiceError::from)?;
        Ok(parse_match_analysis(&reply))
    }
}
