use std::collections::HashSet;
use std::num::NonZero;

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::cell::Tile;
use crate::location::{Dimension, Location};
use crate::maze::Maze;
use crate::shape::{MazeShape, SquareStep, Step};
use crate::view::NodeId;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A tile or wall was placed outside the bounds specified by `dims` on a builder.
    FeatureOutOfBounds,
    /// The start cell, `Location(0, 0)`, is not accessible.
    StartInaccessible,
}

/// Functionality all builders must implement, parametrised over the grid shape `Sh` of the resulting maze.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
pub trait Builder<Sh: Step>: Clone {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order.
    /// Every cell starts out [`Empty`](Tile::Empty).
    fn with_dims(dims: (Dimension, Dimension)) -> Self;
    /// Place `tile` at `location`, replacing whatever was there.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    fn set_tile(&mut self, location: Location, tile: Tile) -> &mut Self;
    /// Shorthand for [`Self::set_tile`] with a [`Goal`](Tile::Goal).
    fn add_goal(&mut self, location: Location) -> &mut Self {
        self.set_tile(location, Tile::Goal)
    }
    /// Shorthand for [`Self::set_tile`] with a [`Solid`](Tile::Solid) block, removing `location` from the maze graph.
    fn fill(&mut self, location: Location) -> &mut Self {
        self.set_tile(location, Tile::Solid)
    }
    /// Disconnect the two `locations`, i.e. place a wall between them.
    ///
    /// If the two locations are not adjacent, this function does nothing and does not invalidate the builder.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either location is out of bounds.
    /// If the builder is already in an invalid state, this function does nothing.
    fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self;
    /// Shorthand for multiple calls to [`Self::disconnect`], with the same conditions.
    ///
    /// Disconnect cells neighboring `location` in each of `directions`.
    fn disconnect_around(&mut self, location: Location, directions: Vec<Sh>) -> &mut Self;
    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>>;
    /// Convert the state of this builder into a [`Maze`].
    /// If the builder is invalid for any reason, a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    fn build(&self) -> Result<Maze<Sh>, Vec<BuilderInvalidReason>>;
}

/// A builder for rectangular mazes with square cells.
///
/// Node ids are assigned row-major: the cell at `Location(x, y)` gets id `y * width + x`.
#[derive(Clone)]
pub struct SquareMazeBuilder {
    // width, height
    dims: (Dimension, Dimension),
    cells: Array2<Tile>,
    invalid_reasons: Vec<BuilderInvalidReason>,
    walls: HashSet<UnorderedPair<Location>>,
}

impl Default for SquareMazeBuilder {
    fn default() -> Self {
        let five = NonZero::<usize>::MIN.saturating_add(4);
        Self::with_dims((five, five))
    }
}

impl Builder<SquareStep> for SquareMazeBuilder {
    fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_elem((dims.1.get(), dims.0.get()), Tile::Empty),
            invalid_reasons: Default::default(),
            walls: Default::default(),
        }
    }

    fn set_tile(&mut self, location: Location, tile: Tile) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        match self.cells.get_mut(location.as_index()) {
            Some(cell) => *cell = tile,
            None => self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds),
        }

        self
    }

    fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if !location.within(self.dims) {
                self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
                return self;
            }
        }

        if SquareStep::direction_to(locations.0, locations.1).is_none() {
            return self;
        }

        self.walls.insert(locations);
        self
    }

    fn disconnect_around(&mut self, location: Location, directions: Vec<SquareStep>) -> &mut Self {
        for direction in directions {
            let other = direction.attempt_from(location);
            // a wall against the outer edge is already implied
            if other.within(self.dims) {
                self.disconnect(UnorderedPair::from((location, other)));
            }
        }

        self
    }

    fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    fn build(&self) -> Result<Maze<SquareStep>, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        let start = Location(0, 0);
        if !self.cells[start.as_index()].is_accessible() {
            return Err(vec![BuilderInvalidReason::StartInaccessible]);
        }

        let width = self.dims.0.get();
        let id_of = |location: Location| -> NodeId { location.1 * width + location.0 };

        let mut graph = UnGraphMap::with_capacity(
            // naively allocate for a complete grid of this size, which usually isn't too far off
            self.cells.len(),
            // "horizontal" edges
            (self.dims.0.get() - 1) * self.dims.1.get()
                // "vertical" edges
                + (self.dims.1.get() - 1) * self.dims.0.get(),
        );

        for (index, tile) in self.cells.indexed_iter() {
            if tile.is_accessible() {
                graph.add_node(id_of(Location::from(index)));
            }
        }

        for (index, tile) in self.cells.indexed_iter() {
            if !tile.is_accessible() {
                continue;
            }
            let location = Location::from(index);

            // add edges down and to the right, if possible
            for direction in SquareStep::FORWARD_VARIANTS {
                let other = direction.attempt_from(location);
                let open = self.cells.get(other.as_index()).is_some_and(Tile::is_accessible);
                if open && !self.walls.contains(&UnorderedPair::from((location, other))) {
                    graph.add_edge(id_of(location), id_of(other), *direction);
                }
            }
        }

        Ok(Maze {
            graph,
            dims: self.dims,
            tiles: self.cells.clone(),
            start: id_of(start),
        })
    }
}
