//! The scoring wall: a 5x5 grid with a fixed colour template.
//!
//! Each colour appears exactly once per row and once per column, so a
//! (row, colour) pair names a unique cell. Cells are write-once: a
//! placed tile never moves or changes for the rest of the game.
//!
//! Placement scoring counts contiguous runs through the new tile in
//! both axes, with a bonus when the placement extends a run in each.

use rustc_hash::FxHashMap;

use crate::core::tile::{Tile, ALL_COLOURS};

/// Wall side length.
pub const WALL_SIZE: usize = 5;

/// The fixed colour template. `WALL_TEMPLATE[row][col]` is the only
/// colour cell (row, col) accepts. Row 0 runs B Y R U L; each row
/// below is the one above rotated one cell to the right.
pub const WALL_TEMPLATE: [[Tile; WALL_SIZE]; WALL_SIZE] = [
    [
        Tile::DarkBlue,
        Tile::Yellow,
        Tile::Red,
        Tile::Black,
        Tile::LightBlue,
    ],
    [
        Tile::LightBlue,
        Tile::DarkBlue,
        Tile::Yellow,
        Tile::Red,
        Tile::Black,
    ],
    [
        Tile::Black,
        Tile::LightBlue,
        Tile::DarkBlue,
        Tile::Yellow,
        Tile::Red,
    ],
    [
        Tile::Red,
        Tile::Black,
        Tile::LightBlue,
        Tile::DarkBlue,
        Tile::Yellow,
    ],
    [
        Tile::Yellow,
        Tile::Red,
        Tile::Black,
        Tile::LightBlue,
        Tile::DarkBlue,
    ],
];

/// One player's wall.
#[derive(Clone, Debug, Default)]
pub struct Wall {
    cells: [[Option<Tile>; WALL_SIZE]; WALL_SIZE],
}

impl Wall {
    /// Create an empty wall.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The template colour for a cell.
    #[must_use]
    pub fn template_colour(row: usize, col: usize) -> Tile {
        WALL_TEMPLATE[row][col]
    }

    /// The column `colour` occupies in `row`, from the template.
    ///
    /// A linear scan of the five columns; every colour appears exactly
    /// once per row.
    #[must_use]
    pub fn template_column(colour: Tile, row: usize) -> usize {
        WALL_TEMPLATE[row]
            .iter()
            .position(|&c| c == colour)
            .expect("every colour appears once per template row")
    }

    /// The tile at a cell, if placed.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Tile> {
        self.cells[row][col]
    }

    /// One row of cells, for rendering and save output.
    #[must_use]
    pub fn row(&self, row: usize) -> [Option<Tile>; WALL_SIZE] {
        self.cells[row]
    }

    /// Whether `colour` is already placed somewhere in `row`.
    #[must_use]
    pub fn has_colour_in_row(&self, colour: Tile, row: usize) -> bool {
        self.cells[row][Self::template_column(colour, row)].is_some()
    }

    /// Place a tile in `row` at its template column and return the
    /// placement score.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already occupied or the tile is the
    /// marker. Both are engine bugs: `can_accept` keeps a colour out of
    /// a row that already holds it, and the marker never reaches a
    /// wall.
    pub fn place(&mut self, tile: Tile, row: usize) -> u32 {
        assert!(tile.is_colour(), "marker cannot be placed on a wall");
        let col = Self::template_column(tile, row);
        assert!(
            self.cells[row][col].is_none(),
            "wall cell ({row}, {col}) already occupied"
        );
        self.cells[row][col] = Some(tile);
        self.score_placement(row, col)
    }

    /// Restore a cell from a save. Same invariants as [`Wall::place`],
    /// plus the tile must match the template; callers validate first.
    pub(crate) fn restore(&mut self, row: usize, col: usize, tile: Tile) {
        assert_eq!(
            Self::template_colour(row, col),
            tile,
            "restored tile must match template"
        );
        assert!(self.cells[row][col].is_none(), "cell restored twice");
        self.cells[row][col] = Some(tile);
    }

    /// Score for the tile just placed at (row, col): 1 for the tile,
    /// plus both contiguous runs through it, plus 1 when it joined a
    /// run in each axis.
    fn score_placement(&self, row: usize, col: usize) -> u32 {
        let vertical = self.run_length(row, col, -1, 0) + self.run_length(row, col, 1, 0);
        let horizontal = self.run_length(row, col, 0, -1) + self.run_length(row, col, 0, 1);

        let mut score = 1 + vertical + horizontal;
        if vertical > 0 && horizontal > 0 {
            score += 1;
        }
        score
    }

    /// Occupied cells walking from (row, col) in one direction,
    /// exclusive of the start, stopping at the first empty cell.
    fn run_length(&self, row: usize, col: usize, dr: i32, dc: i32) -> u32 {
        let mut count = 0;
        let mut r = row as i32 + dr;
        let mut c = col as i32 + dc;
        while (0..WALL_SIZE as i32).contains(&r)
            && (0..WALL_SIZE as i32).contains(&c)
            && self.cells[r as usize][c as usize].is_some()
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// Whether every cell of `row` is occupied.
    #[must_use]
    pub fn row_complete(&self, row: usize) -> bool {
        self.cells[row].iter().all(Option::is_some)
    }

    /// Whether any row is fully occupied. Ends the game.
    #[must_use]
    pub fn any_row_complete(&self) -> bool {
        (0..WALL_SIZE).any(|row| self.row_complete(row))
    }

    /// Number of complete rows.
    #[must_use]
    pub fn complete_rows(&self) -> u8 {
        (0..WALL_SIZE).filter(|&row| self.row_complete(row)).count() as u8
    }

    /// Whether every cell of `col` is occupied.
    #[must_use]
    pub fn column_complete(&self, col: usize) -> bool {
        (0..WALL_SIZE).all(|row| self.cells[row][col].is_some())
    }

    /// Number of complete columns.
    #[must_use]
    pub fn complete_columns(&self) -> u8 {
        (0..WALL_SIZE).filter(|&col| self.column_complete(col)).count() as u8
    }

    /// Colours for which all five wall tiles are placed.
    #[must_use]
    pub fn complete_colours(&self) -> u8 {
        let mut counts: FxHashMap<Tile, usize> = FxHashMap::default();
        for row in &self.cells {
            for tile in row.iter().flatten() {
                *counts.entry(*tile).or_insert(0) += 1;
            }
        }
        ALL_COLOURS
            .iter()
            .filter(|colour| counts.get(colour) == Some(&WALL_SIZE))
            .count() as u8
    }

    /// Add this wall's tiles to a census.
    pub fn report_census(&self, census: &mut crate::containers::TileCensus) {
        for row in &self.cells {
            for tile in row.iter().flatten() {
                *census.entry(*tile).or_insert(0) += 1;
            }
        }
    }
}
