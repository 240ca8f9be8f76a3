//! Pattern lines and the floor line.
//!
//! Both are the same capability, a fixed-capacity row of tiles, with
//! different policies layered on top: a pattern line is monochrome and
//! sized by its row, the floor line takes anything up to seven tiles.
//! Composition over a shared `BoundedRow` replaces the inheritance the
//! board game's physical components might suggest.

use smallvec::SmallVec;

use crate::core::tile::Tile;

/// Floor line capacity.
pub const FLOOR_CAPACITY: usize = 7;

/// Penalty per occupied floor position, in insertion order.
pub const FLOOR_PENALTY: [i32; FLOOR_CAPACITY] = [-1, -1, -2, -2, -2, -3, -3];

/// A fixed-capacity row of tiles.
///
/// `try_push` hands a rejected tile back to the caller instead of
/// dropping it; overflow routing is the caller's decision, and no tile
/// is ever silently lost.
#[derive(Clone, Debug)]
pub struct BoundedRow {
    capacity: usize,
    tiles: SmallVec<[Tile; FLOOR_CAPACITY]>,
}

impl BoundedRow {
    /// Create an empty row with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tiles: SmallVec::new(),
        }
    }

    /// Maximum number of tiles this row holds.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tiles currently in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Remaining space.
    #[must_use]
    pub fn space(&self) -> usize {
        self.capacity - self.tiles.len()
    }

    /// Whether the row is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether the row is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.space() == 0
    }

    /// Append a tile, or return it if the row is full.
    pub fn try_push(&mut self, tile: Tile) -> Result<(), Tile> {
        if self.is_full() {
            Err(tile)
        } else {
            self.tiles.push(tile);
            Ok(())
        }
    }

    /// Empty the row, returning tiles in insertion order.
    pub fn take_all(&mut self) -> SmallVec<[Tile; FLOOR_CAPACITY]> {
        std::mem::take(&mut self.tiles)
    }

    /// Iterate tiles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }
}

/// A staging row for one colour, pending wall placement.
///
/// Capacity is `row + 1`: the top line holds one tile, the bottom five.
/// Mixed colours never coexist; `try_push` rejects a mismatched tile.
#[derive(Clone, Debug)]
pub struct PatternLine {
    row: BoundedRow,
}

impl PatternLine {
    /// Create the pattern line for board row `row` (0..=4).
    #[must_use]
    pub fn new(row: usize) -> Self {
        Self {
            row: BoundedRow::new(row + 1),
        }
    }

    /// The colour held, or `None` when empty.
    #[must_use]
    pub fn colour(&self) -> Option<Tile> {
        self.row.iter().next()
    }

    /// Capacity of this line.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.row.capacity()
    }

    /// Tiles currently staged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.row.len()
    }

    /// Whether the line is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    /// Whether the line is complete and ready to score.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.row.is_full()
    }

    /// Stage a tile, or return it if the line is full or holds another
    /// colour.
    pub fn try_push(&mut self, tile: Tile) -> Result<(), Tile> {
        match self.colour() {
            Some(held) if held != tile => Err(tile),
            _ => self.row.try_push(tile),
        }
    }

    /// Drain the line for scoring: one tile for the wall, the rest for
    /// the lid. Returns `None` if the line is not full.
    pub fn drain_for_scoring(&mut self) -> Option<(Tile, SmallVec<[Tile; FLOOR_CAPACITY]>)> {
        if !self.is_full() {
            return None;
        }
        let mut tiles = self.row.take_all();
        let placed = tiles.remove(0);
        Some((placed, tiles))
    }

    /// Iterate staged tiles.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.row.iter()
    }
}

/// The penalty row. Takes any tile, marker included, up to seven.
#[derive(Clone, Debug)]
pub struct FloorLine {
    row: BoundedRow,
}

impl Default for FloorLine {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorLine {
    /// Create an empty floor line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            row: BoundedRow::new(FLOOR_CAPACITY),
        }
    }

    /// Tiles currently on the floor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.row.len()
    }

    /// Whether the floor is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row.is_empty()
    }

    /// Whether the floor is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.row.is_full()
    }

    /// Add a tile, or return it when full so the caller can route it
    /// to the lid.
    pub fn try_push(&mut self, tile: Tile) -> Result<(), Tile> {
        self.row.try_push(tile)
    }

    /// Empty the floor for scoring, in insertion order.
    pub fn take_all(&mut self) -> SmallVec<[Tile; FLOOR_CAPACITY]> {
        self.row.take_all()
    }

    /// Iterate tiles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.row.iter()
    }

    /// Total penalty the current contents would score.
    #[must_use]
    pub fn penalty(&self) -> i32 {
        FLOOR_PENALTY[..self.len()].iter().sum()
    }
}
