#![warn(missing_docs)]

//! # `mazewalk`
//!
//! A parallel solver for rectangular grid mazes: find a path from the top left cell to any goal cell.
//! Begin by building a maze with [`SquareMazeBuilder`](builder::SquareMazeBuilder) or by reading a map with [`parse_map`],
//! then call [`solve()`] with a fork threshold.
//!
//! The solver needs nothing from a maze beyond the three queries of [`MazeView`], so any graph with integer node ids can be searched.
//!
//! # Internals
//! The search is a depth-first walk split into tasks on a [`rayon`] work-stealing pool.
//! A task walks the maze on its own until it has taken `fork_after` steps; at the next cell with more than one way onward,
//! it hands every open branch to a child task and is done. Tasks never block on each other: all of them are spawned into one
//! [`rayon::Scope`], and the search is over when the last of them has finished.
//!
//! All tasks of one search share three things, besides the slots where they report a path or a failure:
//! 1. the set of visited cells. Inserting into it is the single point where tasks race for a cell, and exactly one of them wins.
//! 2. the predecessor of every discovered cell, always recorded before the cell is walked or forked, so a path to any claimed cell can be read back from it.
//! 3. a "goal found" flag. Tasks check it before every step and give up once it is raised.
//!
//! Paths are not necessarily shortest, and since scheduling varies between runs, so may the path found.
//! A `fork_after` of `0` never forks and is exactly a sequential depth-first search.

pub use builder::Builder;
pub use cell::Tile;
pub use config::SolverConfig;
pub use error::{MazeError, SolverFailure};
pub use location::{Dimension, Location};
pub use maze::Maze;
pub use parse::{parse_map, read_map};
pub use solver::{is_valid_path, solve, solve_with, solve_with_stats, Path, SearchOutcome};
pub use view::{MazeView, NodeId};

pub mod builder;
pub(crate) mod cell;
pub(crate) mod config;
pub(crate) mod error;
pub(crate) mod location;
pub(crate) mod maze;
pub mod parse;
pub mod sequential;
pub mod shape;
pub(crate) mod solver;
pub(crate) mod state;
pub(crate) mod view;
