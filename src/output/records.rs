//! Report records and output errors
//!
//! This module defines the structured records accumulated during a crawl and
//! the error type for persisting them.

use crate::crawler::Section;
use crate::state::CrawlPhase;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to format output: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A link on a page that did not resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Canonical URL of the link
    pub url: String,

    /// Status line of the failure, or `"No Response"`
    pub reason: String,
}

/// Broken links found on one scanned page section, in markup order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub page_url: String,
    pub section: Section,
    pub broken: Vec<BrokenLink>,
}

impl PageReport {
    pub fn new(page_url: impl Into<String>, section: Section) -> Self {
        Self {
            page_url: page_url.into(),
            section,
            broken: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.broken.is_empty()
    }
}

/// Number of sentences on a page section containing the keyword
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHit {
    pub page_url: String,
    pub section: Section,
    pub count: usize,
}

/// Run metadata written at the top of each report
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub root: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: CrawlPhase,

    /// SHA-256 of the configuration file, when one was used
    pub config_hash: Option<String>,
}

impl RunInfo {
    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_page_report_new_is_clean() {
        let report = PageReport::new("https://x.edu", Section::Main);
        assert!(report.is_clean());
        assert_eq!(report.page_url, "https://x.edu");
    }

    #[test]
    fn test_run_duration() {
        let started_at = Utc::now();
        let run = RunInfo {
            root: "https://x.edu".to_string(),
            started_at,
            finished_at: started_at + Duration::seconds(90),
            outcome: CrawlPhase::Done,
            config_hash: None,
        };
        assert_eq!(run.duration_seconds(), 90);
    }

    #[test]
    fn test_write_error_names_path() {
        let err = OutputError::Write {
            path: "out/broken-links.md".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/broken-links.md"));
    }
}
