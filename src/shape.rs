use std::hash::Hash;

use ndarray::Array2;
use strum::VariantArray;

use crate::location::Location;

/// Functionality that must be implemented on a case-by-case basis for any maze shape.
///
/// [`SquareStep`] is the built-in implementation.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash + Ord + PartialOrd + Send + Sync + 'static {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie outside the maze; callers check bounds.
    fn attempt_from(&self, location: Location) -> Location;
    /// The static array of all "forward" directions.
    ///
    /// Forward directions should be those which, upon stepping from one location to another, cause the destination location to be indexed higher than the origin location.
    /// For example, for [`SquareStep`] and given the row-major ordering of the cell array, [`Down`](SquareStep::Down) and [`Right`](SquareStep::Right) are forward directions.
    const FORWARD_VARIANTS: &'static [Self];
    /// Invert the direction specified by `self`.
    fn invert(&self) -> Self;
    /// The single character used when listing a path as a sequence of moves.
    fn symbol(&self) -> char;
    /// Dump the specified [`ndarray::Array2`], laying out individual characters based on the geometry of the shape [`Self`].
    fn print(cells: Array2<char>) -> String;
}

/// The square cell type and rectangular maze shape.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Step for SquareStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    const FORWARD_VARIANTS: &'static [Self] = &[Self::Right, Self::Down];

    fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    fn print(cells: Array2<char>) -> String {
        let mut out = String::with_capacity(cells.nrows() * (cells.ncols() + 1));

        for row in cells.rows() {
            for col in row {
                out.push(*col);
            }
            out.push('\n');
        }

        out
    }
}

/// Functionality on top of [`Step`] with identical implementation across all shapes.
pub trait MazeShape: Step {
    /// Determine the direction from `a` to `b` by calling [`attempt_from`](Step::attempt_from) until one works.
    ///
    /// This does not consider walls or tiles; it returns [`None`] unless `a` and `b` are adjacent in the array representation.
    fn direction_to(a: Location, b: Location) -> Option<Self>;
}

impl<Sh> MazeShape for Sh
where
    Sh: Step,
{
    fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
