//! One player's board: five pattern lines, a floor line, and the wall.
//!
//! The board owns move legality for its side of the table: a pattern
//! line accepts a colour only while it is empty or already holds that
//! colour, and only while the wall row alongside it does not hold the
//! colour yet.

pub mod line;
pub mod wall;

pub use line::{BoundedRow, FloorLine, PatternLine, FLOOR_CAPACITY, FLOOR_PENALTY};
pub use wall::{Wall, WALL_SIZE, WALL_TEMPLATE};

use crate::containers::TileCensus;
use crate::core::tile::Tile;

/// A player's full board.
#[derive(Clone, Debug)]
pub struct PlayerBoard {
    lines: [PatternLine; WALL_SIZE],
    floor: FloorLine,
    wall: Wall,
}

impl Default for PlayerBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: std::array::from_fn(PatternLine::new),
            floor: FloorLine::new(),
            wall: Wall::new(),
        }
    }

    /// Whether pattern line `row` may receive `colour`.
    ///
    /// True iff the line is empty or holds the same colour, and the
    /// wall row does not already contain the colour.
    #[must_use]
    pub fn can_accept(&self, colour: Tile, row: usize) -> bool {
        let line_ok = match self.lines[row].colour() {
            None => true,
            Some(held) => held == colour,
        };
        line_ok && !self.wall.has_colour_in_row(colour, row)
    }

    /// A pattern line.
    #[must_use]
    pub fn line(&self, row: usize) -> &PatternLine {
        &self.lines[row]
    }

    /// Mutable access to a pattern line.
    pub fn line_mut(&mut self, row: usize) -> &mut PatternLine {
        &mut self.lines[row]
    }

    /// The floor line.
    #[must_use]
    pub fn floor(&self) -> &FloorLine {
        &self.floor
    }

    /// Mutable access to the floor line.
    pub fn floor_mut(&mut self) -> &mut FloorLine {
        &mut self.floor
    }

    /// The wall.
    #[must_use]
    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    /// Mutable access to the wall.
    pub fn wall_mut(&mut self) -> &mut Wall {
        &mut self.wall
    }

    /// Add every tile on this board to a census.
    pub fn report_census(&self, census: &mut TileCensus) {
        for line in &self.lines {
            for tile in line.iter() {
                *census.entry(tile).or_insert(0) += 1;
            }
        }
        for tile in self.floor.iter() {
            *census.entry(tile).or_insert(0) += 1;
        }
        self.wall.report_census(census);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_accepts_anywhere() {
        let board = PlayerBoard::new();
        for row in 0..WALL_SIZE {
            assert!(board.can_accept(Tile::Red, row));
        }
    }

    #[test]
    fn test_can_accept_rejects_other_colour_in_line() {
        let mut board = PlayerBoard::new();
        board.line_mut(2).try_push(Tile::Yellow).unwrap();

        assert!(board.can_accept(Tile::Yellow, 2));
        assert!(!board.can_accept(Tile::Red, 2));
        // Other rows unaffected.
        assert!(board.can_accept(Tile::Red, 3));
    }

    #[test]
    fn test_can_accept_rejects_colour_on_wall_row() {
        let mut board = PlayerBoard::new();
        board.wall_mut().place(Tile::Red, 1);

        assert!(!board.can_accept(Tile::Red, 1));
        // Same colour is fine on another row; other colours fine here.
        assert!(board.can_accept(Tile::Red, 0));
        assert!(board.can_accept(Tile::Yellow, 1));
    }

    #[test]
    fn test_both_rejection_branches_are_independent() {
        let mut board = PlayerBoard::new();

        // Branch one: line colour mismatch, wall empty.
        board.line_mut(0).try_push(Tile::Black).unwrap();
        assert!(!board.can_accept(Tile::LightBlue, 0));

        // Branch two: line empty, wall holds the colour.
        board.wall_mut().place(Tile::LightBlue, 4);
        assert!(board.line(4).is_empty());
        assert!(!board.can_accept(Tile::LightBlue, 4));
    }

    #[test]
    fn test_census_covers_lines_floor_and_wall() {
        let mut board = PlayerBoard::new();
        board.line_mut(1).try_push(Tile::Red).unwrap();
        board.floor_mut().try_push(Tile::First).unwrap();
        board.wall_mut().place(Tile::Yellow, 0);

        let mut census = TileCensus::default();
        board.report_census(&mut census);

        assert_eq!(census.get(&Tile::Red), Some(&1));
        assert_eq!(census.get(&Tile::First), Some(&1));
        assert_eq!(census.get(&Tile::Yellow), Some(&1));
    }
}
