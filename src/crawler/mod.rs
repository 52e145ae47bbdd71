//! Crawler module for page fetching and link probing
//!
//! This module contains the core crawling logic, including:
//! - HTTP probing with manual redirect handling
//! - HTML section scanning and link extraction
//! - The crawl frontier (visited set, pending queue, probe cache)
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use fetcher::{
    build_http_client, classify_response, status_line, ProbeOutcome, ProbeResponse, Prober,
    NO_RESPONSE,
};
pub use frontier::Frontier;
pub use parser::{scan_section, scan_sections, ScannedSection, Section, SectionIds};

use crate::config::Config;
use crate::url::SiteRoot;
use crate::Result;

/// Runs a complete crawl of `root`
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Prepare the output directory
/// 2. Validate the root URL with a probe
/// 3. Scan the root page and every same-site page reachable from it
/// 4. Write the broken-link and keyword reports
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed; broken links are not an error
/// * `Err(SweepError)` - The root URL was invalid or the output directory
///   could not be prepared
///
/// # Example
///
/// ```no_run
/// use site_sweep::config::Config;
/// use site_sweep::crawler::crawl;
/// use site_sweep::url::SiteRoot;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let root = SiteRoot::parse("https://financialaid.arizona.edu")?;
/// let outcome = crawl(Config::default(), root).await?;
/// println!("{} broken links", outcome.broken_links().count());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config, root: SiteRoot) -> Result<CrawlOutcome> {
    let mut coordinator = Coordinator::new(config, root)?;
    coordinator.run().await
}
