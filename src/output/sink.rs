//! In-memory report sink
//!
//! Records are accumulated for the whole run and flushed to the output
//! directory once, when the crawl finishes or aborts.

use crate::config::OutputConfig;
use crate::output::markdown::{format_broken_links, format_keyword_hits, write_report};
use crate::output::records::{KeywordHit, OutputError, OutputResult, PageReport, RunInfo};
use std::path::{Path, PathBuf};

/// Accumulates page reports and keyword hits for one crawl run
#[derive(Debug, Default)]
pub struct ReportSink {
    keyword: String,
    pages: Vec<PageReport>,
    keyword_hits: Vec<KeywordHit>,
}

impl ReportSink {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    pub fn record_page(&mut self, report: PageReport) {
        self.pages.push(report);
    }

    pub fn record_keyword_hit(&mut self, hit: KeywordHit) {
        self.keyword_hits.push(hit);
    }

    pub fn pages(&self) -> &[PageReport] {
        &self.pages
    }

    pub fn keyword_hits(&self) -> &[KeywordHit] {
        &self.keyword_hits
    }

    /// Total broken-link records across all pages
    pub fn broken_link_count(&self) -> usize {
        self.pages.iter().map(|p| p.broken.len()).sum()
    }

    /// Writes both reports into the configured output directory
    ///
    /// A failure to write one report does not stop the other; every failure is
    /// returned.
    pub fn finalize(&self, run: &RunInfo, output: &OutputConfig) -> Vec<OutputError> {
        let dir = Path::new(&output.directory);
        let mut failures = Vec::new();

        let broken = format_broken_links(run, &self.pages).and_then(|md| {
            write_report(&dir.join(&output.broken_links_file), &md)
        });
        if let Err(e) = broken {
            failures.push(e);
        }

        // An empty keyword disables scanning, so there is nothing to report
        if !self.keyword.is_empty() {
            let keywords = format_keyword_hits(run, &self.keyword, &self.keyword_hits)
                .and_then(|md| write_report(&dir.join(&output.keywords_file), &md));
            if let Err(e) = keywords {
                failures.push(e);
            }
        }

        failures
    }

    /// Paths of the report files this sink writes
    pub fn report_paths(output: &OutputConfig) -> [PathBuf; 2] {
        let dir = Path::new(&output.directory);
        [
            dir.join(&output.broken_links_file),
            dir.join(&output.keywords_file),
        ]
    }
}

/// Creates the output directory and removes reports left by a previous run
pub fn prepare_output_dir(output: &OutputConfig) -> OutputResult<()> {
    std::fs::create_dir_all(&output.directory)?;

    for path in ReportSink::report_paths(output) {
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!("Removed old report {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
