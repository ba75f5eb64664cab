use rayon::ThreadPoolBuildError;
use thiserror::Error;

use crate::view::NodeId;

/// Ways a maze, or the map file describing one, can be malformed.
#[derive(Debug, Error)]
pub enum MazeError {
    /// The maze was asked about a node it does not contain.
    #[error("node {0} is not part of the maze")]
    UnknownNode(NodeId),
    /// Cell characters appeared before any `$rows,cols` header.
    #[error("map has no `$rows,cols` header before its cells")]
    MissingHeader,
    /// A `$` line could not be read as `$rows,cols`.
    #[error("malformed map header `{0}`")]
    BadHeader(String),
    /// The header declared zero rows or zero columns.
    #[error("map declares an empty maze")]
    EmptyMaze,
    /// The declared maze could not be built, e.g. because its start cell is walled in.
    #[error("map describes an invalid maze: {0:?}")]
    Invalid(Vec<crate::builder::BuilderInvalidReason>),
    /// The map file could not be read.
    #[error("cannot read map: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a search may fail. Not finding a path is not a failure.
#[derive(Debug, Error)]
pub enum SolverFailure {
    /// The maze answered a query with an error; the whole search was abandoned.
    #[error("malformed maze: {0}")]
    Maze(#[from] MazeError),
    /// The worker pool for the search could not be started.
    #[error("cannot start worker pool: {0}")]
    Pool(#[from] ThreadPoolBuildError),
    /// The search produced a path that does not lead from the start to a goal through adjacent nodes.
    /// This indicates a bug in the maze view or in the shared search state.
    #[error("search produced an invalid path of {len} nodes")]
    InvalidPath {
        /// Length of the rejected path.
        len: usize,
    },
}
