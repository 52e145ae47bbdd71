//! Phase definitions for a single crawl run
use crate::SweepError;
use std::fmt;

/// Represents the current phase of a crawl run
///
/// ```text
/// Idle ──► Running ──► Draining ──► Done
///   │
///   └────► Aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Root URL not yet validated
    Idle,

    /// Pages are being popped from the pending queue and scanned
    Running,

    /// Pending queue is empty; reports are being finalized
    Draining,

    /// The crawl completed
    Done,

    /// The root URL failed validation; nothing was crawled
    Aborted,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if the state machine allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Idle, Self::Aborted)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Done)
        )
    }

    /// Moves to `next`, or fails with `InvalidTransition`
    pub fn transition(self, next: CrawlPhase) -> Result<CrawlPhase, SweepError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(SweepError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
