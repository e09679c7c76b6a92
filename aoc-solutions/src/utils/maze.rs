//! Character maps with walls, a start and an end.

use std::collections::HashSet;

use aoc_solver::ParseError;

use super::pathfinding::{Bounds, Coord, GridMoves};

/// A rectangular map of `#` walls and `.` floor with one `S` and one `E`.
#[derive(Debug, Clone)]
pub struct Maze {
    pub walls: HashSet<Coord>,
    pub bounds: Bounds,
    pub start: Coord,
    pub end: Coord,
}

impl Maze {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut walls = HashSet::new();
        let mut start = None;
        let mut end = None;
        let mut rows = 0;
        let mut cols = None;

        for (row, line) in input.trim().lines().enumerate() {
            let row = row as i32;
            let width = line.chars().count() as i32;
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(ParseError::InvalidFormat(format!(
                        "line {} has {width} columns, expected {expected}",
                        row + 1
                    )));
                }
                Some(_) => {}
            }

            for (col, c) in line.chars().enumerate() {
                let here = Coord::new(row, col as i32);
                match c {
                    '#' => {
                        walls.insert(here);
                    }
                    '.' => {}
                    'S' if start.is_none() => start = Some(here),
                    'E' if end.is_none() => end = Some(here),
                    'S' | 'E' => {
                        return Err(ParseError::InvalidFormat(format!(
                            "second '{c}' at line {} column {}",
                            row + 1,
                            col + 1
                        )));
                    }
                    other => {
                        return Err(ParseError::InvalidFormat(format!(
                            "unexpected '{other}' at line {} column {}",
                            row + 1,
                            col + 1
                        )));
                    }
                }
            }
            rows = row + 1;
        }

        Ok(Self {
            walls,
            bounds: Bounds::new(rows, cols.unwrap_or(0)),
            start: start.ok_or_else(|| ParseError::MissingData("no start tile 'S'".into()))?,
            end: end.ok_or_else(|| ParseError::MissingData("no end tile 'E'".into()))?,
        })
    }

    /// Unit-cost moves between open tiles, confined to the map.
    pub fn moves(&self) -> GridMoves<'_> {
        GridMoves::bounded(&self.walls, self.bounds)
    }
}
