//! Grid positions, facings and bounds.

use aoc_solver::ParseError;

/// One of the four cardinal directions.
///
/// Variants are declared in rotation order (each is a quarter turn
/// counter-clockwise from the previous), which [`Direction::quarter_turns_to`]
/// relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Every direction, in neighbor expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Direction for a rotation index in `0..4` (up, left, down, right).
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..4`.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Direction::Up,
            1 => Direction::Left,
            2 => Direction::Down,
            3 => Direction::Right,
            _ => panic!("direction index {index} is out of range"),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Number of quarter turns needed to face `other`: 0, 1 or 2.
    pub fn quarter_turns_to(self, other: Direction) -> u8 {
        let diff = (other as u8 + 4 - self as u8) % 4;
        diff.min(4 - diff)
    }

    /// Row and column displacement of a single step.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Arrow used for this direction on puzzle keypads and maps.
    pub fn symbol(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Down => 'v',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = ParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '^' => Ok(Direction::Up),
            'v' => Ok(Direction::Down),
            '<' => Ok(Direction::Left),
            '>' => Ok(Direction::Right),
            other => Err(ParseError::InvalidFormat(format!(
                "'{other}' is not a direction"
            ))),
        }
    }
}

/// A cell on a 2D grid, addressed by row and column.
///
/// Coordinates are signed so that stepping off the edge of a grid yields a
/// value that bounds checks can reject rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The adjacent cell in `direction`. No bounds checking.
    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// The adjacent cell in `direction`, if it lies within `bounds`.
    pub fn step_within(self, direction: Direction, bounds: Bounds) -> Option<Self> {
        Some(self.step(direction)).filter(|moved| bounds.contains(*moved))
    }

    pub fn manhattan(self, other: Coord) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// Size of a rectangular grid anchored at `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    pub const fn square(size: i32) -> Self {
        Self::new(size, size)
    }

    pub fn contains(self, coord: Coord) -> bool {
        (0..self.rows).contains(&coord.row) && (0..self.cols).contains(&coord.col)
    }

    /// All cells in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Coord> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }
}

/// A position together with the direction it is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oriented {
    pub pos: Coord,
    pub facing: Direction,
}

impl Oriented {
    pub const fn new(pos: Coord, facing: Direction) -> Self {
        Self { pos, facing }
    }
}
