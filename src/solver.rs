use std::collections::HashSet;

use itertools::Itertools;
use rayon::{Scope, ThreadPoolBuilder};
use tracing::{debug, error, info, info_span, warn};

use crate::config::SolverConfig;
use crate::error::{MazeError, SolverFailure};
use crate::state::SharedState;
use crate::view::{MazeView, NodeId};

/// A path through a maze, from its start to a goal.
pub type Path = Vec<NodeId>;

/// Everything a finished search has to say.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The path found, or [`None`] if no goal is reachable from the start.
    pub path: Option<Path>,
    /// Every node some task claimed during the search.
    pub visited: HashSet<NodeId>,
    /// How many child tasks were forked over the whole search.
    pub tasks_forked: usize,
}

/// Search `maze` for a path from its start to any goal, forking after `fork_after` steps.
///
/// `fork_after = 0` never forks. The path returned is not necessarily the shortest, and repeated searches of the same maze may return different paths.
/// Returns `Ok(None)` if no goal is reachable.
pub fn solve<V: MazeView>(maze: &V, fork_after: usize) -> Result<Option<Path>, SolverFailure> {
    solve_with(maze, &SolverConfig::default().with_fork_after(fork_after))
}

/// [`solve`] with full control over the [`SolverConfig`].
pub fn solve_with<V: MazeView>(maze: &V, config: &SolverConfig) -> Result<Option<Path>, SolverFailure> {
    Ok(solve_with_stats(maze, config)?.path)
}

/// Run a complete search on a dedicated work-stealing pool and report what it did.
///
/// The search state is created empty here and dropped on return, so consecutive searches never see each other's progress.
/// A path that fails [`is_valid_path`] is never returned; the search reports [`SolverFailure::InvalidPath`] instead.
pub fn solve_with_stats<V: MazeView>(maze: &V, config: &SolverConfig) -> Result<SearchOutcome, SolverFailure> {
    let _span = info_span!("search", fork_after = config.fork_after).entered();

    let mut builder = ThreadPoolBuilder::new().thread_name(|index| format!("mazewalk-{index}"));
    if let Some(threads) = config.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    let mut state = SharedState::new();
    let root = SolverTask::new(maze, &state, config.fork_after, maze.start());
    // every task of the search is spawned into this scope, which returns once the last of them has finished
    pool.scope(|scope| root.run(scope));

    if let Some(failure) = state.take_failure() {
        return Err(failure.into());
    }
    let path = state.take_path();

    if let Some(path) = &path {
        if !is_valid_path(maze, path)? {
            error!(len = path.len(), "search produced a path which does not lead from the start to a goal");
            return Err(SolverFailure::InvalidPath { len: path.len() });
        }
    }

    let tasks_forked = state.tasks_forked();
    let visited: HashSet<NodeId> = state.into_visited().into_iter().collect();
    info!(
        found = path.is_some(),
        path_len = path.as_ref().map_or(0, Vec::len),
        visited = visited.len(),
        tasks_forked,
        "search finished"
    );

    Ok(SearchOutcome { path, visited, tasks_forked })
}

/// Tests whether `path` begins at the start of `maze`, steps only between neighbors and ends at a goal.
pub fn is_valid_path<V: MazeView + ?Sized>(maze: &V, path: &[NodeId]) -> Result<bool, MazeError> {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Ok(false);
    };
    if *first != maze.start() {
        return Ok(false);
    }

    for (a, b) in path.iter().tuple_windows() {
        if !maze.neighbors(*a)?.contains(b) {
            return Ok(false);
        }
    }

    maze.has_goal(*last)
}

/// Walk a predecessor relation backwards from `to` until `from` is reached.
///
/// Gives up after `limit` lookups, which must be at least the number of recorded predecessors, so a cyclic relation cannot loop forever.
/// Returns [`None`] if the walk misses a lookup or gives up.
pub(crate) fn path_from_to(from: NodeId, to: NodeId, limit: usize, predecessor: impl Fn(NodeId) -> Option<NodeId>) -> Option<Path> {
    let mut path = vec![to];
    let mut current = to;

    while current != from {
        if path.len() > limit {
            warn!(from, to, "predecessor chain loops");
            return None;
        }
        current = match predecessor(current) {
            Some(previous) => previous,
            None => {
                warn!(from, to, broken_at = current, "predecessor chain is broken");
                return None;
            }
        };
        path.push(current);
    }

    path.reverse();
    Some(path)
}

/// How a task's own walk ended.
enum Walk {
    /// The walk claimed this goal.
    Reached(NodeId),
    /// The walk stopped at a branch point and hands these nodes to child tasks.
    Forked(Vec<NodeId>),
    /// Nothing left to walk, or the search is over.
    Ended,
}

/// One unit of work of a search: a depth-first walk from `start`, handing its branches to child tasks once it has walked far enough.
///
/// Every task borrows the maze and the state of its search; only the nodes of its own walk belong to it.
/// A task never waits for its children. They are spawned into the scope of the search, and whatever a task finds is reported to the shared state,
/// so the depth of a worker's stack does not grow with the depth of the fork tree.
pub(crate) struct SolverTask<'s, V: MazeView> {
    maze: &'s V,
    state: &'s SharedState,
    fork_after: usize,
    start: NodeId,
}

impl<'s, V: MazeView + 's> SolverTask<'s, V> {
    pub(crate) fn new(maze: &'s V, state: &'s SharedState, fork_after: usize, start: NodeId) -> Self {
        Self { maze, state, fork_after, start }
    }

    fn child(&self, start: NodeId) -> Self {
        Self::new(self.maze, self.state, self.fork_after, start)
    }

    /// Walk from this task's start and report the outcome: a path to the goal it reached, child tasks for the branches it forked, or a malformed maze.
    pub(crate) fn run(self, scope: &Scope<'s>) {
        match self.walk() {
            Ok(Walk::Reached(goal)) => {
                if let Some(path) = self.path_to(goal) {
                    self.state.report_path(path);
                }
            }
            Ok(Walk::Forked(children)) => self.fork(children, scope),
            Ok(Walk::Ended) => {}
            Err(failure) => {
                if self.state.report_failure(failure) {
                    debug!(task = self.start, "maze query failed, abandoning the search");
                }
            }
        }
    }

    /// Walk until a goal is found, the walk is exhausted or it is time to fork.
    fn walk(&self) -> Result<Walk, MazeError> {
        // deferred branches, walked by this task after backtracking
        let mut frontier = vec![self.start];
        let mut steps = 0;

        while let Some(current) = frontier.pop() {
            if self.state.should_stop() {
                return Ok(Walk::Ended);
            }
            // another task owns this node
            if !self.state.mark_visited(current) {
                continue;
            }

            if self.maze.has_goal(current)? {
                if self.state.set_goal_found() {
                    debug!(goal = current, "goal found");
                }
                return Ok(Walk::Reached(current));
            }

            let unvisited = self.maze.neighbors(current)?
                .into_iter()
                .filter(|neighbor| !self.state.is_visited(*neighbor))
                .collect_vec();
            for neighbor in &unvisited {
                self.state.record_predecessor(*neighbor, current);
            }

            if unvisited.len() > 1 && self.fork_after > 0 && steps >= self.fork_after {
                debug!(at = current, steps, branches = unvisited.len(), deferred = frontier.len(), "forking");
                // fork every branch, including the ones deferred earlier; this task keeps none
                let mut children = unvisited;
                children.extend(frontier.drain(..).rev());
                return Ok(Walk::Forked(children));
            }

            if !unvisited.is_empty() {
                steps += 1;
            }
            frontier.extend(unvisited);
        }

        Ok(Walk::Ended)
    }

    /// Spawn a child task for each of `children`, in order.
    ///
    /// A child's path is reconstructed from the maze start, which is also where this task's own prefix begins,
    /// so it needs no stitching onto the path leading here.
    fn fork(&self, children: Vec<NodeId>, scope: &Scope<'s>) {
        self.state.count_forks(children.len());
        for start in children {
            let child = self.child(start);
            scope.spawn(move |scope| child.run(scope));
        }
    }

    fn path_to(&self, to: NodeId) -> Option<Path> {
        path_from_to(self.maze.start(), to, self.state.recorded_predecessors(), |node| self.state.predecessor_of(node))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn reconstructs_chain() {
        let predecessors = HashMap::from([(3, 2), (2, 7), (7, 0)]);
        let path = path_from_to(0, 3, predecessors.len(), |node| predecessors.get(&node).copied());
        assert_eq!(path, Some(vec![0, 7, 2, 3]));
    }

    #[test]
    fn trivial_chain() {
        assert_eq!(path_from_to(4, 4, 0, |_| None), Some(vec![4]));
    }

    #[test]
    fn broken_chain() {
        let predecessors = HashMap::from([(3, 2)]);
        assert_eq!(path_from_to(0, 3, predecessors.len(), |node| predecessors.get(&node).copied()), None);
    }

    #[test]
    fn cyclic_chain() {
        let predecessors = HashMap::from([(3, 2), (2, 1), (1, 3)]);
        assert_eq!(path_from_to(0, 3, predecessors.len(), |node| predecessors.get(&node).copied()), None);
    }
}
