//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl driver that ties the other components
//! together:
//! - Validating the root URL before anything else is requested
//! - Scanning the root page's header, main and footer sections
//! - Popping pages from the frontier and scanning their main section
//! - Probing each page's links concurrently, at most once per URL
//! - Handing page reports and keyword hits to the report sink

use crate::config::Config;
use crate::crawler::fetcher::{ProbeOutcome, Prober};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::{scan_section, scan_sections, ScannedSection, Section, SectionIds};
use crate::keyword::KeywordMatcher;
use crate::output::{
    prepare_output_dir, BrokenLink, CrawlStats, FrontierLog, KeywordHit, OutputError, PageReport,
    ReportSink, RunInfo,
};
use crate::state::CrawlPhase;
use crate::url::{normalize_href, LinkClassifier, LinkDecision, SiteRoot, SkipReason};
use crate::{Result, SweepError};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Result of a completed crawl
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Final phase of the run
    pub phase: CrawlPhase,

    /// Every scanned page section in scan order, including clean ones
    pub pages: Vec<PageReport>,

    pub keyword_hits: Vec<KeywordHit>,

    pub stats: CrawlStats,

    /// Report records that could not be persisted
    pub write_failures: Vec<String>,
}

impl CrawlOutcome {
    /// All broken-link records as `(page_url, link)` pairs, in report order
    pub fn broken_links(&self) -> impl Iterator<Item = (&str, &BrokenLink)> {
        self.pages
            .iter()
            .flat_map(|page| page.broken.iter().map(move |link| (page.page_url.as_str(), link)))
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    root: SiteRoot,
    frontier: Arc<Frontier>,
    prober: Arc<Prober>,
    semaphore: Arc<Semaphore>,
    keyword: Option<KeywordMatcher>,
    sections: SectionIds,
    sink: ReportSink,
    frontier_log: FrontierLog,
    phase: CrawlPhase,
    stats: CrawlStats,
    config_hash: Option<String>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Prepares the output directory, removing reports from a previous run,
    /// and opens a fresh frontier log.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SweepError)` - The HTTP client, keyword or output directory
    ///   could not be set up
    pub fn new(config: Config, root: SiteRoot) -> Result<Self> {
        let prober = Prober::new(&config)?;

        let keyword = if config.site.keyword.is_empty() {
            tracing::info!("No keyword configured, keyword scanning disabled");
            None
        } else {
            Some(KeywordMatcher::new(&config.site.keyword)?)
        };

        prepare_output_dir(&config.output)?;
        let log_path = Path::new(&config.output.directory).join(&config.output.frontier_log_file);
        let frontier_log = FrontierLog::create(&log_path)?;
        tracing::debug!("Logging queued URLs to {}", log_path.display());

        let classifier = LinkClassifier::new(config.site.skip_markers.iter().cloned());
        let frontier = Frontier::new(root.clone(), classifier, config.crawler.traversal);
        let semaphore = Semaphore::new(config.crawler.max_concurrent_probes as usize);

        Ok(Self {
            sections: SectionIds::from_config(&config.site),
            sink: ReportSink::new(config.site.keyword.clone()),
            config: Arc::new(config),
            root,
            frontier: Arc::new(frontier),
            prober: Arc::new(prober),
            semaphore: Arc::new(semaphore),
            keyword,
            frontier_log,
            phase: CrawlPhase::Idle,
            stats: CrawlStats::default(),
            config_hash: None,
        })
    }

    /// Records the configuration fingerprint in the report headers
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion
    ///
    /// The root is probed like any other link first. If it does not come
    /// back `Ok` the run aborts with [`SweepError::RootInvalid`] before any
    /// other request; the (empty) reports are still written.
    pub async fn run(&mut self) -> Result<CrawlOutcome> {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let root_url = self.root.as_str().to_string();

        tracing::info!("Validating root URL {}", root_url);
        let root_outcome = self.prober.probe(&root_url).await;
        self.frontier.record(&root_url, root_outcome.clone());
        self.stats.probes += 1;

        if let Some(reason) = root_outcome.reason() {
            tracing::error!("Root URL {} is not usable: {}", root_url, reason);
            self.phase = self.phase.transition(CrawlPhase::Aborted)?;
            self.stats.elapsed = start_time.elapsed();
            self.finalize(started_at, CrawlPhase::Aborted);
            return Err(SweepError::RootInvalid {
                url: root_url,
                reason: reason.to_string(),
            });
        }

        self.phase = self.phase.transition(CrawlPhase::Running)?;
        tracing::info!(
            "Starting {:?} crawl of {} ({} concurrent probes)",
            self.config.crawler.traversal,
            self.root.host(),
            self.config.crawler.max_concurrent_probes
        );

        self.crawl_root().await;

        while let Some(url) = self.frontier.pop() {
            self.crawl_page(&url).await;

            if self.stats.pages_scanned > 0 && self.stats.pages_scanned % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages scanned, {} pending, {} links probed",
                    self.stats.pages_scanned,
                    self.frontier.pending_len(),
                    self.frontier.probed_len()
                );
            }
        }

        self.phase = self.phase.transition(CrawlPhase::Draining)?;
        tracing::info!("Frontier is empty, writing reports");
        self.stats.elapsed = start_time.elapsed();
        self.stats.broken_records = self.sink.broken_link_count() as u64;
        let write_failures = self.finalize(started_at, CrawlPhase::Done);
        self.phase = self.phase.transition(CrawlPhase::Done)?;

        tracing::info!(
            "Crawl completed: {} pages visited, {} sections scanned, {} links probed, {} broken-link records in {:?}",
            self.frontier.visited_len(),
            self.stats.pages_scanned,
            self.stats.probes,
            self.stats.broken_records,
            self.stats.elapsed
        );

        Ok(CrawlOutcome {
            phase: self.phase,
            pages: self.sink.pages().to_vec(),
            keyword_hits: self.sink.keyword_hits().to_vec(),
            stats: self.stats.clone(),
            write_failures,
        })
    }

    /// Scans the root page as three logical pages: header, main and footer
    async fn crawl_root(&mut self) {
        let root_url = self.root.as_str().to_string();
        self.frontier.mark_visited(&root_url);
        // "/" on any page normalizes to the root with a trailing slash
        self.frontier.mark_visited(&format!("{}/", root_url));

        let Some(body) = self.fetch(&root_url).await else {
            return;
        };

        let ids = [
            self.sections.id(Section::Header),
            self.sections.id(Section::Main),
            self.sections.id(Section::Footer),
        ];
        let scanned = scan_sections(&body, &ids);
        let sections = [Section::Header, Section::Main, Section::Footer];

        for (section, scanned) in sections.into_iter().zip(scanned) {
            self.scan_page(&root_url, section, scanned).await;
        }
    }

    /// Fetches a queued page and scans its main section
    async fn crawl_page(&mut self, url: &str) {
        if !self.frontier.mark_visited(url) {
            return;
        }

        tracing::debug!("Crawling {}", url);
        if let Some(body) = self.fetch(url).await {
            let scanned = scan_section(&body, self.sections.id(Section::Main));
            self.scan_page(url, Section::Main, scanned).await;
        }
    }

    async fn fetch(&mut self, url: &str) -> Option<String> {
        let retries = self.config.crawler.page_fetch_retries;
        let backoff = Duration::from_millis(self.config.crawler.retry_backoff_ms);

        match self.prober.fetch_page_with_retry(url, retries, backoff).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!("Skipping page {}: {}", url, e);
                self.stats.pages_failed += 1;
                None
            }
        }
    }

    /// Classifies, probes and reports the links of one page section
    async fn scan_page(&mut self, page_url: &str, section: Section, scanned: Option<ScannedSection>) {
        let Some(scanned) = scanned else {
            tracing::debug!("{} has no {} section", page_url, section);
            return;
        };
        self.stats.pages_scanned += 1;

        let mut links = Vec::with_capacity(scanned.hrefs.len());
        let mut claimed = Vec::new();

        for href in &scanned.hrefs {
            let url = normalize_href(href, page_url, &self.root);
            let decision = self.frontier.classify(&url, page_url);

            match &decision {
                LinkDecision::Probe => {
                    if self.frontier.claim(&url) {
                        claimed.push(url.clone());
                    }
                }
                LinkDecision::Skip(reason) => {
                    tracing::trace!("Skipping {} on {}: {}", url, page_url, reason);
                    self.stats.links_skipped += 1;
                }
            }
            links.push((url, decision));
        }
        self.stats.links_seen += links.len() as u64;

        self.probe_all(&claimed).await;

        for url in &claimed {
            let healthy = self.frontier.outcome(url).is_some_and(|o| o.is_ok());
            if healthy && self.frontier.push(url) {
                self.frontier_log.append(url);
                self.stats.queued += 1;
            }
        }

        let mut report = PageReport::new(page_url, section);
        for (url, decision) in links {
            let reportable = matches!(
                decision,
                LinkDecision::Probe | LinkDecision::Skip(SkipReason::AlreadyProbed)
            );
            if !reportable {
                continue;
            }
            if let Some(reason) = self.frontier.outcome(&url).as_ref().and_then(|o| o.reason()) {
                report.broken.push(BrokenLink {
                    url,
                    reason: reason.to_string(),
                });
            }
        }

        if !report.is_clean() {
            tracing::info!(
                "{} broken link(s) on {} ({})",
                report.broken.len(),
                page_url,
                section
            );
        }
        self.sink.record_page(report);

        if let Some(matcher) = &self.keyword {
            let count = matcher.count_sentences(&scanned.text);
            if count > 0 {
                tracing::debug!(
                    "{} sentence(s) with {} on {} ({})",
                    count,
                    matcher.keyword(),
                    page_url,
                    section
                );
                self.stats.keyword_pages += 1;
                self.sink.record_keyword_hit(KeywordHit {
                    page_url: page_url.to_string(),
                    section,
                    count,
                });
            }
        }
    }

    /// Probes claimed URLs concurrently and records every outcome
    async fn probe_all(&mut self, urls: &[String]) {
        if urls.is_empty() {
            return;
        }

        let mut tasks = JoinSet::new();
        for url in urls {
            let prober = Arc::clone(&self.prober);
            let frontier = Arc::clone(&self.frontier);
            let semaphore = Arc::clone(&self.semaphore);
            let url = url.clone();

            tasks.spawn(async move {
                // The semaphore is never closed, so a permit always arrives
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = prober.probe(&url).await;
                frontier.record(&url, outcome.clone());
                (url, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((url, outcome)) => {
                    self.stats.probes += 1;
                    match &outcome {
                        ProbeOutcome::Ok => {}
                        ProbeOutcome::Broken(_) => self.stats.broken += 1,
                        ProbeOutcome::Unreachable => self.stats.unreachable += 1,
                    }
                    tracing::debug!("Probed {}: {}", url, outcome);
                }
                Err(e) => tracing::warn!("Probe task failed: {}", e),
            }
        }

        // A failed task never recorded its outcome; release its claim
        for url in urls {
            if self.frontier.outcome(url).is_none() {
                self.frontier.record(url, ProbeOutcome::Unreachable);
                self.stats.probes += 1;
                self.stats.unreachable += 1;
            }
        }
    }

    /// Writes the reports and collects every persistence failure
    fn finalize(&mut self, started_at: DateTime<Utc>, outcome: CrawlPhase) -> Vec<String> {
        let run = RunInfo {
            root: self.root.to_string(),
            started_at,
            finished_at: Utc::now(),
            outcome,
            config_hash: self.config_hash.clone(),
        };

        let mut failures: Vec<OutputError> = self.frontier_log.take_failures();
        failures.extend(self.sink.finalize(&run, &self.config.output));

        failures
            .into_iter()
            .map(|e| {
                tracing::warn!("Report output failed: {}", e);
                e.to_string()
            })
            .collect()
    }
}
