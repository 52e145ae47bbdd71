//! Crawl frontier: traversal order and de-duplication state
//!
//! The frontier owns everything that must be consistent across one crawl run:
//! - The visited set (URLs fetched as pages)
//! - The pending queue (same-site URLs discovered but not yet fetched)
//! - The probe cache (every probe outcome, keyed by canonical URL)
//! - The in-flight set (URLs whose probe has been claimed but not recorded)
//!
//! All of it sits behind one mutex so that the claim step, which checks the
//! cache and the in-flight set and then inserts, is atomic. Probe tasks share
//! the frontier through an `Arc`.

use crate::config::Traversal;
use crate::crawler::fetcher::ProbeOutcome;
use crate::url::{LinkClassifier, LinkDecision, SiteRoot, SkipReason};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct FrontierState {
    visited: HashSet<String>,
    pending: VecDeque<String>,
    probed: HashMap<String, ProbeOutcome>,
    in_flight: HashSet<String>,
}

/// Shared crawl state for one run
#[derive(Debug)]
pub struct Frontier {
    root: SiteRoot,
    classifier: LinkClassifier,
    traversal: Traversal,
    state: Mutex<FrontierState>,
}

impl Frontier {
    /// Creates an empty frontier for `root`
    pub fn new(root: SiteRoot, classifier: LinkClassifier, traversal: Traversal) -> Self {
        Self {
            root,
            classifier,
            traversal,
            state: Mutex::new(FrontierState::default()),
        }
    }

    // A poisoned lock only means a probe task panicked mid-update; every
    // update leaves the sets consistent, so the data is still usable.
    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Classifies a canonical URL found on `page_url`
    ///
    /// Applies the stateless classifier first, then skips URLs that were
    /// already visited, already probed, or are being probed right now.
    pub fn classify(&self, url: &str, page_url: &str) -> LinkDecision {
        let decision = self.classifier.classify(url, page_url);
        if !decision.is_probe() {
            return decision;
        }

        let state = self.lock();
        if state.visited.contains(url) {
            LinkDecision::Skip(SkipReason::Visited)
        } else if state.probed.contains_key(url) || state.in_flight.contains(url) {
            LinkDecision::Skip(SkipReason::AlreadyProbed)
        } else {
            LinkDecision::Probe
        }
    }

    /// Claims the right to probe `url`
    ///
    /// Returns false if the URL already has an outcome or another claim is in
    /// flight. A successful claim must be followed by [`Frontier::record`].
    pub fn claim(&self, url: &str) -> bool {
        let mut state = self.lock();
        if state.probed.contains_key(url) || state.in_flight.contains(url) {
            return false;
        }
        state.in_flight.insert(url.to_string())
    }

    /// Stores the outcome of a probe and releases its claim
    pub fn record(&self, url: &str, outcome: ProbeOutcome) {
        let mut state = self.lock();
        state.in_flight.remove(url);
        state.probed.insert(url.to_string(), outcome);
    }

    /// The cached probe outcome for `url`, if any
    pub fn outcome(&self, url: &str) -> Option<ProbeOutcome> {
        self.lock().probed.get(url).cloned()
    }

    /// Queues `url` for a page visit
    ///
    /// Only same-site, unvisited URLs are accepted. Returns true if the URL
    /// was queued.
    pub fn push(&self, url: &str) -> bool {
        if !self.root.contains(url) {
            return false;
        }

        let mut state = self.lock();
        if state.visited.contains(url) {
            return false;
        }
        state.pending.push_back(url.to_string());
        true
    }

    /// Takes the next unvisited URL from the pending queue
    ///
    /// Depth-first traversal takes the most recently queued URL, breadth-first
    /// the oldest. Entries visited since they were queued are dropped here.
    pub fn pop(&self) -> Option<String> {
        let mut state = self.lock();
        loop {
            let next = match self.traversal {
                Traversal::DepthFirst => state.pending.pop_back(),
                Traversal::BreadthFirst => state.pending.pop_front(),
            }?;

            if !state.visited.contains(&next) {
                return Some(next);
            }
            tracing::trace!("Dropping already visited {}", next);
        }
    }

    /// Marks `url` as fetched; returns false if it already was
    pub fn mark_visited(&self, url: &str) -> bool {
        self.lock().visited.insert(url.to_string())
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn visited_len(&self) -> usize {
        self.lock().visited.len()
    }

    /// Number of distinct URLs with a recorded probe outcome
    pub fn probed_len(&self) -> usize {
        self.lock().probed.len()
    }
}
