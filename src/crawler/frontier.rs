//! Crawl frontier: the visited set and the pending-URL queue
//!
//! The frontier is owned by a single coordinator task. Every dispatch goes
//! through `next_target`, which checks and marks the visited set in one step
//! before a fetch is spawned, so a target can never be fetched twice.

use crate::state::CrawlPhase;
use crate::url::CrawlTarget;
use crate::ScribeError;
use std::collections::{HashSet, VecDeque};

/// Frontier manages pending and dispatched crawl targets
///
/// Invariants:
/// - `visited` only grows during a run
/// - a target is never in both `visited` and the queue
/// - `queued` mirrors the queue contents for O(1) membership checks
#[derive(Debug)]
pub struct Frontier {
    phase: CrawlPhase,

    /// Targets already handed to the fetcher
    visited: HashSet<CrawlTarget>,

    /// Targets waiting to be dispatched
    queue: VecDeque<CrawlTarget>,

    /// Membership index over `queue`
    queued: HashSet<CrawlTarget>,

    /// Dispatched targets whose outcome has not been reported yet
    in_flight: usize,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    /// Creates an empty, idle frontier
    pub fn new() -> Self {
        Self {
            phase: CrawlPhase::Idle,
            visited: HashSet::new(),
            queue: VecDeque::new(),
            queued: HashSet::new(),
            in_flight: 0,
        }
    }

    /// Seeds the frontier with the crawl's starting point
    ///
    /// Moves the frontier from idle to running.
    pub fn seed(&mut self, target: CrawlTarget) -> Result<(), ScribeError> {
        self.transition(CrawlPhase::Running)?;
        self.enqueue(target);
        Ok(())
    }

    /// Adds a target unless it was already visited or queued
    ///
    /// Returns true if the target was newly queued.
    pub fn enqueue(&mut self, target: CrawlTarget) -> bool {
        if self.visited.contains(&target) || self.queued.contains(&target) {
            return false;
        }

        self.queued.insert(target.clone());
        self.queue.push_back(target);
        true
    }

    /// Pops the next target and marks it visited
    ///
    /// The caller must report the outcome with [`Frontier::complete`].
    /// Returns None when the queue is empty.
    pub fn next_target(&mut self) -> Option<CrawlTarget> {
        while let Some(target) = self.queue.pop_front() {
            self.queued.remove(&target);

            // enqueue() already refuses visited targets; re-check at dispatch anyway
            if !self.visited.insert(target.clone()) {
                tracing::debug!("Skipping already visited target: {}", target);
                continue;
            }

            self.in_flight += 1;
            return Some(target);
        }

        None
    }

    /// Records that a dispatched target has finished, successfully or not
    pub fn complete(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Marks the run done once the queue is drained and nothing is in flight
    pub fn finish(&mut self) -> Result<(), ScribeError> {
        if !self.is_exhausted() {
            tracing::warn!(
                "Finishing crawl with {} queued and {} in flight",
                self.queue.len(),
                self.in_flight
            );
        }
        self.transition(CrawlPhase::Done)
    }

    /// Returns true when there is nothing left to dispatch or wait for
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty() && self.in_flight == 0
    }

    pub fn is_visited(&self, target: &CrawlTarget) -> bool {
        self.visited.contains(target)
    }

    pub fn is_queued(&self, target: &CrawlTarget) -> bool {
        self.queued.contains(target)
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Visited targets in sorted order
    pub fn visited_sorted(&self) -> Vec<String> {
        let mut visited: Vec<String> = self.visited.iter().map(|t| t.to_string()).collect();
        visited.sort();
        visited
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), ScribeError> {
        if !self.phase.can_transition_to(next) {
            return Err(ScribeError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!("Crawl phase: {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(path: &str) -> CrawlTarget {
        CrawlTarget::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_new_frontier_is_idle_and_exhausted() {
        let frontier = Frontier::new();
        assert_eq!(frontier.phase(), CrawlPhase::Idle);
        assert!(frontier.is_exhausted());
        assert_eq!(frontier.visited_count(), 0);
    }

    #[test]
    fn test_seed_starts_run() {
        let mut frontier = Frontier::new();
        frontier.seed(target("/")).unwrap();

        assert_eq!(frontier.phase(), CrawlPhase::Running);
        assert_eq!(frontier.queue_len(), 1);
        assert!(frontier.is_queued(&target("/")));
    }

    #[test]
    fn test_seed_twice_is_invalid() {
        let mut frontier = Frontier::new();
        frontier.seed(target("/")).unwrap();
        let result = frontier.seed(target("/other"));
        assert!(matches!(result, Err(ScribeError::InvalidTransition { .. })));
    }

    #[test]
    fn test_next_target_marks_visited_at_dispatch() {
        let mut frontier = Frontier::new();
        frontier.seed(target("/")).unwrap();

        let next = frontier.next_target().unwrap();
        assert_eq!(next, target("/"));
        assert!(frontier.is_visited(&next));
        assert!(!frontier.is_queued(&next));
        assert_eq!(frontier.in_flight(), 1);
        assert!(!frontier.is_exhausted());
    }

    #[test]
    fn test_enqueue_rejects_visited_and_queued() {
        let mut frontier = Frontier::new();
        frontier.seed(target("/")).unwrap();

        assert!(!frontier.enqueue(target("/")));
        let root = frontier.next_target().unwrap();
        assert!(!frontier.enqueue(root));

        assert!(frontier.enqueue(target("/a")));
        assert!(!frontier.enqueue(target("/a")));
        assert!(!frontier.enqueue(target("/a#again")));
        assert_eq!(frontier.queue_len(), 1);
    }

    #[test]
    fn test_no_target_dispatched_twice() {
        let mut frontier = Frontier::new();
        frontier.seed(target("/")).unwrap();

        let mut dispatched = Vec::new();
        while let Some(next) = frontier.next_target() {
            dispatched.push(next.clone());
            // Every page links back to every known page
            for path in ["/", "/a", "/b", "/a?x=1"] {
                frontier.enqueue(target(path));
            }
            frontier.complete();
        }

        assert_eq!(dispatched.len(), 4);
        let unique: HashSet<_> = dispatched.iter().collect();
        assert_eq!(unique.len(), dispatched.len());
        assert_eq!(frontier.visited_count(), 4);
    }

    #[test]
    fn test_complete_and_finish() {
        let mut frontier = Frontier::new();
        frontier.seed(target("/")).unwrap();
        frontier.next_target().unwrap();

        assert!(frontier.next_target().is_none());
        assert!(!frontier.is_exhausted());

        frontier.complete();
        assert!(frontier.is_exhausted());

        frontier.finish().unwrap();
        assert_eq!(frontier.phase(), CrawlPhase::Done);
    }

    #[test]
    fn test_finish_without_seed_is_invalid() {
        let mut frontier = Frontier::new();
        assert!(frontier.finish().is_err());
    }

    #[test]
    fn test_visited_sorted() {
        let mut frontier = Frontier::new();
        frontier.seed(target("/b")).unwrap();
        frontier.enqueue(target("/a"));
        while frontier.next_target().is_some() {
            frontier.complete();
        }

        assert_eq!(
            frontier.visited_sorted(),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }
}
