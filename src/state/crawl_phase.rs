/// Crawl phase definitions for tracking the lifecycle of a crawl run
///
/// A run moves strictly forward: it is created idle, becomes running once the
/// frontier is seeded, and is done when the queue drains with nothing in flight.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Frontier exists but has not been seeded
    Idle,

    /// Seeded; pages are being dispatched
    Running,

    /// Queue empty and no fetch in flight
    Done,
}

impl CrawlPhase {
    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running) | (Self::Running, Self::Done)
        )
    }

    /// Returns true once the run can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
