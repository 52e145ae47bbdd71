//! Output module for crawl reports
//!
//! This module handles:
//! - Accumulating broken-link and keyword records during a crawl
//! - Rendering and writing the markdown reports
//! - The incremental frontier log
//! - Run statistics

mod frontier_log;
mod markdown;
mod records;
mod sink;
pub mod stats;

pub use frontier_log::FrontierLog;
pub use markdown::{format_broken_links, format_keyword_hits, sentence_count, write_report};
pub use records::{BrokenLink, KeywordHit, OutputError, OutputResult, PageReport, RunInfo};
pub use sink::{prepare_output_dir, ReportSink};
pub use stats::{print_statistics, CrawlStats};
