use crate::error::MazeError;

/// An opaque identifier of a maze cell, unique and stable for the lifetime of its maze.
pub type NodeId = usize;

/// The capabilities a solver needs from a maze, and nothing more.
///
/// Implementations are shared read-only between every task of a search, hence the [`Sync`] bound.
/// A well-formed view only ever hands out ids it can itself resolve; an id it cannot resolve is reported as a [`MazeError`] and aborts the search.
pub trait MazeView: Sync {
    /// The node every search starts from.
    fn start(&self) -> NodeId;
    /// All nodes reachable from `id` in a single move. Never contains `id` itself.
    fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, MazeError>;
    /// Whether `id` holds a goal.
    fn has_goal(&self, id: NodeId) -> Result<bool, MazeError>;
}

