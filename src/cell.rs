/// What occupies a single cell of the maze.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Tile {
    /// Open floor.
    #[default]
    Empty,
    /// An inaccessible brick wall.
    Brick,
    /// An inaccessible solid block.
    Solid,
    /// Open floor holding a goal.
    Goal,
    /// Open floor lying on a displayed path. Never produced by parsing.
    Marked,
    /// A goal lying on a displayed path. Never produced by parsing.
    Found,
}

impl Tile {
    /// Whether a player may stand on this tile, i.e. whether it becomes a node of the maze graph.
    pub fn is_accessible(&self) -> bool {
        matches!(self, Self::Empty | Self::Goal | Self::Marked | Self::Found)
    }

    pub(crate) fn is_goal(&self) -> bool {
        matches!(self, Self::Goal | Self::Found)
    }

    /// The tile shown in place of `self` when it lies on a path.
    pub(crate) fn marked(self) -> Self {
        match self {
            Self::Empty => Self::Marked,
            Self::Goal => Self::Found,
            other => other,
        }
    }

    /// The character used in map files and renderings.
    pub fn display(&self) -> char {
        match self {
            Self::Empty => '.',
            Self::Brick => '*',
            Self::Solid => '#',
            Self::Goal => 'v',
            Self::Marked => '+',
            Self::Found => '!',
        }
    }

    /// Parse a map character. Only tiles that can appear in a map file are recognised.
    pub fn from_map_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Empty),
            '*' => Some(Self::Brick),
            '#' => Some(Self::Solid),
            'v' => Some(Self::Goal),
            _ => None,
        }
    }
}
