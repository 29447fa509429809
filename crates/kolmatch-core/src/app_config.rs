#[derive(Clone)]
pub struct AppConfig {
    /// Base URL of the Ollama server hosting the analysis model.
    pub ollama_url: String,
    /// Model name passed on every chat request.
    pub ollama_model: String,
    /// Apify API token for the TikTok search actor.
    pub apify_token: String,
    /// Apify actor id, `owner~actor` form.
    pub apify_actor: String,
    /// Proxy country code for search calls.
    pub search_region: String,
    /// Per-request timeout for both external HTTP clients.
    pub request_timeout_secs: u64,
    /// `resultsPerPage` ceiling sent to the search actor.
    pub search_results_per_page: usize,
    /// Upper bound on concurrently scored candidates.
    pub max_concurrent_scoring: usize,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("ollama_url", &self.ollama_url)
            .field("ollama_model", &self.ollama_model)
            .field("apify_token", &"[redacted]")
            .field("apify_actor", &self.apify_actor)
            .field("search_region", &self.search_region)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("search_results_per_page", &self.search_results_per_page)
            .field("max_concurrent_scoring", &self.max_concurrent_scoring)
            .field("log_level", &self.log_level)
            .finish()
    }
}
