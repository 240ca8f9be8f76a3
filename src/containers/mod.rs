//! Shared tile containers: bag, lid, factories, and table centres.
//!
//! Every transfer is an ownership move: a tile removed from one
//! container is inserted into exactly one other, so the per-colour
//! census stays constant across any sequence of operations. The
//! `report_census` methods feed [`crate::state::GameState::validate`].
//!
//! The bag is FIFO and never reshuffled mid-game; draw order is fixed
//! by the seeded generation at new-game time, plus insertion order of
//! whatever the lid returns.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::tile::Tile;

/// Tiles a freshly filled factory holds.
pub const FACTORY_CAPACITY: usize = 4;

/// Per-colour (and marker) tile counts.
pub type TileCensus = FxHashMap<Tile, usize>;

fn count_into(census: &mut TileCensus, tiles: impl IntoIterator<Item = Tile>) {
    for tile in tiles {
        *census.entry(tile).or_insert(0) += 1;
    }
}

/// The draw bag. FIFO: tiles come out in the order they went in.
#[derive(Clone, Debug, Default)]
pub struct Bag {
    tiles: VecDeque<Tile>,
}

impl Bag {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tile to the back of the bag.
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push_back(tile);
    }

    /// Draw the front tile, or `None` if the bag is empty.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop_front()
    }

    /// Number of tiles in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate tiles front to back.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    /// Add this container's tiles to a census.
    pub fn report_census(&self, census: &mut TileCensus) {
        count_into(census, self.iter());
    }
}

/// The box lid: discarded tiles waiting to refill the bag.
#[derive(Clone, Debug, Default)]
pub struct Lid {
    tiles: Vec<Tile>,
}

impl Lid {
    /// Create an empty lid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard a tile into the lid.
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Empty the lid, returning its tiles in insertion order.
    pub fn take_all(&mut self) -> Vec<Tile> {
        std::mem::take(&mut self.tiles)
    }

    /// Number of tiles in the lid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the lid is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterate tiles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    /// Add this container's tiles to a census.
    pub fn report_census(&self, census: &mut TileCensus) {
        count_into(census, self.iter());
    }
}

/// One factory display: at most four tiles, drained completely when
/// drafted from.
#[derive(Clone, Debug, Default)]
pub struct Factory {
    tiles: SmallVec<[Tile; FACTORY_CAPACITY]>,
}

impl Factory {
    /// Create an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a tile on the factory during a refill.
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Whether the factory holds at least one tile of `colour`.
    #[must_use]
    pub fn contains_colour(&self, colour: Tile) -> bool {
        self.tiles.iter().any(|&t| t == colour)
    }

    /// Empty the factory, returning everything it held.
    pub fn drain_all(&mut self) -> SmallVec<[Tile; FACTORY_CAPACITY]> {
        std::mem::take(&mut self.tiles)
    }

    /// Number of tiles on the factory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the factory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether no colour can be drafted from here. The marker can end
    /// up on a factory after cycling through the lid into a nearly dry
    /// bag; alone it blocks no round.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.tiles.iter().all(|t| t.is_marker())
    }

    /// Iterate tiles.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    /// Add this container's tiles to a census.
    pub fn report_census(&self, census: &mut TileCensus) {
        count_into(census, self.iter());
    }
}

/// A table centre: the shared pool factory leftovers accumulate in.
///
/// Unlike a factory, drafting from a centre removes only the chosen
/// colour (and the first-player marker); the rest stays put.
#[derive(Clone, Debug, Default)]
pub struct Centre {
    tiles: Vec<Tile>,
}

impl Centre {
    /// Create an empty centre.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leftover tile (or the marker) to the centre.
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Whether the centre holds at least one tile of `colour`.
    #[must_use]
    pub fn contains_colour(&self, colour: Tile) -> bool {
        self.tiles.iter().any(|&t| t == colour)
    }

    /// Whether the first-player marker is here.
    #[must_use]
    pub fn has_marker(&self) -> bool {
        self.tiles.iter().any(|t| t.is_marker())
    }

    /// Remove and return every tile of `colour`.
    pub fn drain_colour(&mut self, colour: Tile) -> Vec<Tile> {
        let mut taken = Vec::new();
        self.tiles.retain(|&t| {
            if t == colour {
                taken.push(t);
                false
            } else {
                true
            }
        });
        taken
    }

    /// Remove the marker if present.
    pub fn take_marker(&mut self) -> Option<Tile> {
        let pos = self.tiles.iter().position(|t| t.is_marker())?;
        Some(self.tiles.remove(pos))
    }

    /// Number of tiles, marker included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the centre holds nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether no colour can be drafted from here.
    ///
    /// A centre holding only the marker is drained for round-end
    /// purposes: no legal move could ever empty it further.
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.tiles.iter().all(|t| t.is_marker())
    }

    /// Iterate tiles in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles.iter().copied()
    }

    /// Add this container's tiles to a census.
    pub fn report_census(&self, census: &mut TileCensus) {
        count_into(census, self.iter());
    }
}
