use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::cell::Tile;
use crate::error::MazeError;
use crate::location::{Dimension, Location};
use crate::shape::Step;
use crate::solver;
use crate::view::{MazeView, NodeId};

/// A maze of cells organized as specified by `Sh`.
///
/// Every accessible cell is a node of an undirected graph; edges join cells a player can move between in one step.
/// The weight of an edge is its direction as seen from the lower-numbered endpoint, which is always one of [`Step::FORWARD_VARIANTS`].
///
/// [`Maze`]s should be built using a [`Builder`](crate::builder::Builder) such as [`SquareMazeBuilder`](crate::builder::SquareMazeBuilder),
/// or read from a map with [`parse_map`](crate::parse::parse_map).
#[derive(Clone)]
pub struct Maze<Sh>
where
    Sh: Step,
{
    pub(crate) graph: UnGraphMap<NodeId, Sh>,
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) tiles: Array2<Tile>,
    pub(crate) start: NodeId,
}

impl<Sh> Maze<Sh>
where
    Sh: Step,
{
    /// The `(width, height)` of this maze.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Number of accessible cells.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// The cell a node id refers to, if `id` is part of this maze.
    pub fn location_of(&self, id: NodeId) -> Option<Location> {
        if !self.graph.contains_node(id) {
            return None;
        }

        let width = self.dims.0.get();
        Some(Location(id % width, id / width))
    }

    /// The node id of an accessible cell.
    pub fn id_at(&self, location: Location) -> Option<NodeId> {
        if !location.within(self.dims) {
            return None;
        }

        let id = location.1 * self.dims.0.get() + location.0;
        self.graph.contains_node(id).then_some(id)
    }

    /// The direction of the move from `a` to `b`, or [`None`] if the two are not connected.
    pub fn direction_between(&self, a: NodeId, b: NodeId) -> Option<Sh> {
        self.graph.edge_weight(a, b).map(|forward| if a < b { *forward } else { forward.invert() })
    }

    /// Tests whether `path` begins at the start node, follows a connected chain of adjacent nodes and ends at a goal.
    pub fn is_valid_path(&self, path: &[NodeId]) -> bool {
        solver::is_valid_path(self, path).unwrap_or(false)
    }

    /// Spell out `path` as the sequence of moves it takes, e.g. `"RRDD"`.
    ///
    /// Returns [`None`] if two consecutive nodes of `path` are not connected.
    pub fn moves(&self, path: &[NodeId]) -> Option<String> {
        path.iter()
            .tuple_windows()
            .map(|(a, b)| self.direction_between(*a, *b).map(|dir| dir.symbol()))
            .collect()
    }

    /// Render this maze with the cells of `path` marked.
    ///
    /// Ids in `path` which are not part of the maze are ignored.
    pub fn render_path(&self, path: &[NodeId]) -> String {
        let on_path: HashSet<Location> = path.iter().filter_map(|id| self.location_of(*id)).collect();

        Sh::print(Array2::from_shape_fn(self.tiles.raw_dim(), |index| {
            let tile = self.tiles[index];
            if on_path.contains(&Location::from(index)) {
                tile.marked().display()
            } else {
                tile.display()
            }
        }))
    }
}

impl<Sh> MazeView for Maze<Sh>
where
    Sh: Step,
{
    fn start(&self) -> NodeId {
        self.start
    }

    fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>, MazeError> {
        if !self.graph.contains_node(id) {
            return Err(MazeError::UnknownNode(id));
        }

        Ok(self.graph.neighbors(id).collect_vec())
    }

    fn has_goal(&self, id: NodeId) -> Result<bool, MazeError> {
        let location = self.location_of(id).ok_or(MazeError::UnknownNode(id))?;
        Ok(self.tiles[location.as_index()].is_goal())
    }
}

impl<Sh: Step> Display for Maze<Sh> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Sh::print(self.tiles.map(Tile::display)))
    }
}
