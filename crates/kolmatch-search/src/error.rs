use kolmatch_core::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search API error: {0}")]
    Api(String),

    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        source: serde_json::Error,
    },
}

impl From<SearchError> for ServiceError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Http(inner) => ServiceError::Transport(inner.to_string()),
            SearchError::Api(msg) => ServiceError::Api(msg),
            SearchError::Deserialize { .. } => ServiceError::Response(e.to_string()),
        }
    }
}
