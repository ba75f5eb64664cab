use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::OnceLock;

use dashmap::{DashMap, DashSet};

use crate::error::MazeError;
use crate::view::NodeId;

/// Progress shared by every task of one search.
///
/// A fresh instance is created for each search and borrowed by all of its tasks; nothing carries over between searches.
/// Tasks never wait on each other, so whatever a task has to hand back to the search, a path or a failure, is reported here.
#[derive(Debug, Default)]
pub(crate) struct SharedState {
    visited: DashSet<NodeId>,
    predecessor: DashMap<NodeId, NodeId>,
    goal_found: AtomicBool,
    tasks_forked: AtomicUsize,
    found: OnceLock<Vec<NodeId>>,
    failure: OnceLock<MazeError>,
}

impl SharedState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim `node` for exploration. Returns `true` for exactly one caller per node.
    pub(crate) fn mark_visited(&self, node: NodeId) -> bool {
        self.visited.insert(node)
    }

    pub(crate) fn is_visited(&self, node: NodeId) -> bool {
        self.visited.contains(&node)
    }

    /// Record that `child` was first reached from `parent`.
    ///
    /// The first recorded predecessor of a node sticks; later calls for the same `child` are no-ops.
    /// Since `parent` is always visited before `child` is recorded, this keeps every predecessor chain acyclic and rooted at the start.
    pub(crate) fn record_predecessor(&self, child: NodeId, parent: NodeId) {
        debug_assert_ne!(child, parent);
        self.predecessor.entry(child).or_insert(parent);
    }

    pub(crate) fn predecessor_of(&self, node: NodeId) -> Option<NodeId> {
        self.predecessor.get(&node).map(|entry| *entry)
    }

    pub(crate) fn recorded_predecessors(&self) -> usize {
        self.predecessor.len()
    }

    pub(crate) fn goal_found(&self) -> bool {
        self.goal_found.load(Ordering::Acquire)
    }

    /// Raise the goal flag. Returns `true` if this call was the one to raise it.
    ///
    /// Every predecessor written by the caller before this call is visible to any task that then observes [`Self::goal_found`].
    pub(crate) fn set_goal_found(&self) -> bool {
        !self.goal_found.swap(true, Ordering::AcqRel)
    }

    /// Hand a path to a goal back to the search. The first path reported is kept, later ones are dropped.
    pub(crate) fn report_path(&self, path: Vec<NodeId>) -> bool {
        self.found.set(path).is_ok()
    }

    /// Abandon the search because of `error`. Only the first failure is kept.
    pub(crate) fn report_failure(&self, error: MazeError) -> bool {
        self.failure.set(error).is_ok()
    }

    /// Whether tasks should stop walking, either because a goal was found or because the search failed.
    pub(crate) fn should_stop(&self) -> bool {
        self.goal_found() || self.failure.get().is_some()
    }

    pub(crate) fn take_path(&mut self) -> Option<Vec<NodeId>> {
        self.found.take()
    }

    pub(crate) fn take_failure(&mut self) -> Option<MazeError> {
        self.failure.take()
    }

    pub(crate) fn count_forks(&self, children: usize) {
        self.tasks_forked.fetch_add(children, Ordering::Relaxed);
    }

    pub(crate) fn tasks_forked(&self) -> usize {
        self.tasks_forked.load(Ordering::Relaxed)
    }

    pub(crate) fn into_visited(self) -> DashSet<NodeId> {
        self.visited
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;

    use super::*;

    #[test]
    fn only_one_thread_claims_a_node() {
        let state = SharedState::new();
        let barrier = Barrier::new(8);

        let claims: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| {
                    barrier.wait();
                    (0..100).filter(|node| state.mark_visited(*node)).count()
                }))
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).sum()
        });

        assert_eq!(claims, 100);
    }

    #[test]
    fn first_predecessor_sticks() {
        let state = SharedState::new();
        state.record_predecessor(5, 4);
        state.record_predecessor(5, 6);

        assert_eq!(state.predecessor_of(5), Some(4));
        assert_eq!(state.predecessor_of(4), None);
        assert_eq!(state.recorded_predecessors(), 1);
    }

    #[test]
    fn first_report_wins() {
        let mut state = SharedState::new();
        assert!(!state.should_stop());

        assert!(state.report_path(vec![0, 1]));
        assert!(!state.report_path(vec![0, 2, 3]));
        assert!(state.report_failure(MazeError::UnknownNode(7)));
        assert!(!state.report_failure(MazeError::UnknownNode(8)));
        assert!(state.should_stop());

        assert_eq!(state.take_path(), Some(vec![0, 1]));
        assert!(matches!(state.take_failure(), Some(MazeError::UnknownNode(7))));
        assert_eq!(state.take_path(), None);
    }

    #[test]
    fn goal_flag_is_raised_once() {
        let state = SharedState::new();
        assert!(!state.goal_found());
        assert!(state.set_goal_found());
        assert!(!state.set_goal_found());
        assert!(state.goal_found());
    }
}
