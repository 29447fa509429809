use kolmatch_core::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analysis API error: {0}")]
    Api(String),
}

impl From<AnalyzerError> for ServiceError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::Http(inner) => ServiceError::Transport(inner.to_string()),
            AnalyzerError::Api(msg) => ServiceError::Api(msg),
        }
    }
}
