//! Reading mazes from map text.
//!
//! A map is read line by line with all whitespace removed. An `@` starts a comment which runs to the end of its line.
//! A line `$rows,cols` declares the size of the maze and must come before any cells; a `$` after some cells just ends the line.
//! Every other character is one cell, filling the maze left to right and top to bottom:
//!
//! ```text
//! @ a small maze
//! $3,4
//! . . * v  @ the goal is top right
//! . # . .
//! . . . *
//! ```
//!
//! Characters past the declared bounds are ignored and cells the map leaves out are [`Empty`](Tile::Empty).
//! Unrecognised characters are read as empty cells.

use std::fs;
use std::num::NonZero;
use std::path::Path;

use tracing::warn;

use crate::builder::{Builder, SquareMazeBuilder};
use crate::cell::Tile;
use crate::error::MazeError;
use crate::location::{Dimension, Location};
use crate::maze::Maze;
use crate::shape::SquareStep;

/// Parse map text into a maze.
pub fn parse_map(text: &str) -> Result<Maze<SquareStep>, MazeError> {
    let mut builder: Option<SquareMazeBuilder> = None;
    let mut dims: Option<(Dimension, Dimension)> = None;
    let (mut row, mut col) = (0usize, 0usize);

    for line in text.lines() {
        let line: String = line.chars().filter(|ch| !ch.is_whitespace()).collect();
        // both a comment and a header end the cells of their line
        let (cells, rest) = line.split_at(line.find(['@', '$']).unwrap_or(line.len()));

        if cells.is_empty() {
            if let Some(header) = rest.strip_prefix('$') {
                let parsed = parse_header(header)?;
                dims = Some(parsed);
                builder = Some(SquareMazeBuilder::with_dims(parsed));
                (row, col) = (0, 0);
            }
            continue;
        }

        let (Some(builder), Some((width, height))) = (builder.as_mut(), dims) else {
            return Err(MazeError::MissingHeader);
        };

        for ch in cells.chars() {
            // ignore rows and columns beyond the declared ones
            if row < height.get() && col < width.get() {
                let location = Location(col, row);
                let tile = Tile::from_map_char(ch).unwrap_or_else(|| {
                    warn!(symbol = %ch, at = %location, "unrecognized map symbol, using an empty cell instead");
                    Tile::Empty
                });
                builder.set_tile(location, tile);
            }
            col += 1;
        }

        if col >= width.get() {
            row += 1;
            col = 0;
        }
    }

    builder.ok_or(MazeError::MissingHeader)?.build().map_err(MazeError::Invalid)
}

/// Read and parse the map file at `path`.
pub fn read_map(path: impl AsRef<Path>) -> Result<Maze<SquareStep>, MazeError> {
    parse_map(&fs::read_to_string(path)?)
}

fn parse_header(header: &str) -> Result<(Dimension, Dimension), MazeError> {
    let bad = || MazeError::BadHeader(format!("${header}"));

    let (rows, cols) = header.split_once(',').ok_or_else(bad)?;
    let rows: usize = rows.parse().map_err(|_| bad())?;
    let cols: usize = cols.parse().map_err(|_| bad())?;

    match (NonZero::new(cols), NonZero::new(rows)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(MazeError::EmptyMaze),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::MazeView;

    #[test]
    fn reads_header_comments_and_tiles() {
        let maze = parse_map("@ comment\n$2,3\n. * v\n. . .\n").unwrap();

        assert_eq!(maze.dims().0.get(), 3);
        assert_eq!(maze.dims().1.get(), 2);
        assert_eq!(format!("{}", maze), ".*v\n...\n");
        assert_eq!(maze.node_count(), 5);
        assert!(maze.has_goal(2).unwrap());
        assert!(!maze.has_goal(0).unwrap());
    }

    #[test]
    fn pads_short_maps_and_drops_overflow() {
        let maze = parse_map("$2,2\n.v..\n..\n..\n").unwrap();

        // a row longer than declared is cut short, it does not spill into the next row
        assert_eq!(format!("{}", maze), ".v\n..\n");

        let short = parse_map("$3,2\n.v\n").unwrap();
        assert_eq!(format!("{}", short), ".v\n..\n..\n");
    }

    #[test]
    fn comments_end_the_line() {
        // read as cells, the comment would complete the first row and move `#` along the second
        let maze = parse_map("$2,4\n.v@x\n. . @ trailing\n#...\n").unwrap();
        assert_eq!(format!("{}", maze), ".v..\n#...\n");
        assert_eq!(maze.id_at(Location(0, 1)), None);

        let cut = parse_map("$1,3\n.$9,9\n.v\n").unwrap();
        assert_eq!(format!("{}", cut), "..v\n");
    }

    #[test]
    fn unknown_symbols_become_empty() {
        let maze = parse_map("$1,3\n.x v\n").unwrap();
        assert_eq!(format!("{}", maze), "..v\n");
    }

    #[test]
    fn rejects_bad_maps() {
        assert!(matches!(parse_map(". . v\n"), Err(MazeError::MissingHeader)));
        assert!(matches!(parse_map(""), Err(MazeError::MissingHeader)));
        assert!(matches!(parse_map("$a,3\n..."), Err(MazeError::BadHeader(_))));
        assert!(matches!(parse_map("$0,3\n"), Err(MazeError::EmptyMaze)));
        assert!(matches!(parse_map("$1,2\n#v\n"), Err(MazeError::Invalid(_))));
    }
}
