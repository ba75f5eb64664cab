use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// A maze dimension; mazes always have at least one row and one column.
pub type Dimension = NonZero<Coord>;

/// A cell of a maze, addressed by column then row. Rows count down from the top, so `Location(0, 0)` is the start.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The `[row, column]` index of this cell in a tile array.
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    pub(crate) fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_and_indices() {
        let dims = (NonZero::new(3).unwrap(), NonZero::new(2).unwrap());

        assert!(Location(2, 1).within(dims));
        assert!(!Location(1, 2).within(dims));
        // stepping off the top or left edge wraps around to a huge coordinate
        assert!(!Location(0, 0).offset_by((-1, 0)).within(dims));

        assert_eq!(Location(2, 1).as_index(), (1, 2));
        assert_eq!(Location::from((1, 2)), Location(2, 1));
        assert_eq!(Location(2, 1).to_string(), "(2, 1)");
    }
}
