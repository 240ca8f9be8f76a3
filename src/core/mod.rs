//! Core value types: tiles, players, moves, RNG.
//!
//! Everything here is plain data. The containers, boards, and engine
//! build on these without adding hidden state.

pub mod action;
pub mod player;
pub mod rng;
pub mod tile;

pub use action::{DraftMove, MoveSource, MoveTarget};
pub use player::{Player, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::GameRng;
pub use tile::{cell_char, Tile, ALL_COLOURS, TILES_PER_COLOUR, TILE_COLOURS};
