//! State module for tracking crawl progress
//!
//! A crawl run moves through a small set of phases. The crawl driver owns the
//! current phase and rejects transitions the state machine does not allow.

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
