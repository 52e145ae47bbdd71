//! Crawl statistics
//!
//! Counters collected by the crawl driver and a console summary printed by
//! the binary when the run ends.

use std::time::Duration;

/// Counters for one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched and scanned
    pub pages_scanned: u64,

    /// Pages that could not be fetched after retries
    pub pages_failed: u64,

    /// Anchors seen across all scanned sections
    pub links_seen: u64,

    /// Anchors skipped by the classifier or the frontier
    pub links_skipped: u64,

    /// Distinct URLs probed
    pub probes: u64,

    /// Distinct URLs that probed `Broken`
    pub broken: u64,

    /// Distinct URLs that probed `Unreachable`
    pub unreachable: u64,

    /// Broken-link records written, one per occurrence
    pub broken_records: u64,

    /// Page sections with at least one keyword sentence
    pub keyword_pages: u64,

    /// URLs accepted into the pending queue
    pub queued: u64,

    pub elapsed: Duration,
}

impl CrawlStats {
    /// Probes per second over the whole run
    pub fn probe_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.probes as f64 / secs
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Pages:");
    println!("  Scanned: {}", stats.pages_scanned);
    println!("  Failed to fetch: {}", stats.pages_failed);
    println!("  Queued: {}", stats.queued);
    println!();

    println!("Links:");
    println!("  Seen: {}", stats.links_seen);
    println!("  Skipped: {}", stats.links_skipped);
    println!("  Probed: {} ({:.2}/sec)", stats.probes, stats.probe_rate());
    println!("  Broken: {}", stats.broken);
    println!("  Unreachable: {}", stats.unreachable);
    println!("  Broken-link records: {}", stats.broken_records);
    println!();

    println!("Keyword pages: {}", stats.keyword_pages);
    println!("Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_rate() {
        let stats = CrawlStats {
            probes: 50,
            elapsed: Duration::from_secs(10),
            ..CrawlStats::default()
        };
        assert!((stats.probe_rate() - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_probe_rate_zero_elapsed() {
        let stats = CrawlStats {
            probes: 3,
            ..CrawlStats::default()
        };
        assert_eq!(stats.probe_rate(), 0.0);
    }
}
