//! Site-Sweep: a single-site broken link and keyword crawler
//!
//! This crate crawls one website from its root page, probes every hyperlink it
//! finds on same-site pages, and reports links that do not resolve with a
//! successful response. Page text is also scanned for a configurable keyword.

pub mod config;
pub mod crawler;
pub mod keyword;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Root URL {url} failed validation: {reason}")]
    RootInvalid { url: String, reason: String },

    #[error("Failed to fetch page {url}: {reason}")]
    PageFetch { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid keyword pattern: {0}")]
    Keyword(#[from] regex::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Site-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlOutcome, ProbeOutcome};
pub use state::CrawlPhase;
pub use url::{normalize_href, LinkClassifier, LinkDecision, SiteRoot};
