//! A plain single-thread depth-first search, kept as the baseline the parallel solver is checked against.

use std::collections::{HashMap, HashSet};

use crate::error::MazeError;
use crate::solver::{path_from_to, Path};
use crate::view::{MazeView, NodeId};

/// Search `maze` depth-first on the calling thread.
///
/// Returns a path from the start to a goal, or [`None`] if no goal is reachable.
pub fn solve<V: MazeView + ?Sized>(maze: &V) -> Result<Option<Path>, MazeError> {
    let start = maze.start();
    let mut visited = HashSet::new();
    let mut predecessor: HashMap<NodeId, NodeId> = HashMap::new();
    let mut frontier = vec![start];

    while let Some(current) = frontier.pop() {
        if maze.has_goal(current)? {
            return Ok(path_from_to(start, current, predecessor.len(), |node| predecessor.get(&node).copied()));
        }
        if !visited.insert(current) {
            continue;
        }

        for neighbor in maze.neighbors(current)? {
            frontier.push(neighbor);
            // the latest discovery of an unvisited node is the one that will be popped first
            if !visited.contains(&neighbor) {
                predecessor.insert(neighbor, current);
            }
        }
    }

    Ok(None)
}
