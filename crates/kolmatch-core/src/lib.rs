//! Shared data model, configuration, and service boundaries for kolmatch.
//!
//! Everything the pipeline crates agree on lives here: the brand and
//! candidate profiles, the final `MatchResult` shape, the raw search-record
//! types, and the traits the external search/analysis services are hidden
//! behind.

pub mod app_config;
pub mod config;
pub mod services;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use services::{CandidateSearch, MatchAnalyzer, ServiceError};
pub use types::{
    BrandProfile, CandidateProfile, FacebookPageData, MatchAnalysis, MatchResult, RawAuthorMeta,
    RawSearchItem, WebsiteData,
};
