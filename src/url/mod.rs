//! URL handling module for Site-Sweep
//!
//! This module turns raw hrefs into canonical URLs and decides which of them
//! are worth probing. Both operate relative to an explicit [`SiteRoot`].

mod classify;
mod domain;
mod normalize;

// Re-export main types and functions
pub use classify::{is_same_page_anchor, LinkClassifier, LinkDecision, SkipReason};
pub use domain::{extract_domain, SiteRoot};
pub use normalize::normalize_href;
