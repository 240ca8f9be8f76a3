//! # tessera
//!
//! A 2-4 player tile-drafting board game engine with a text-mode
//! table top: factories and table centres to draft from, pattern
//! lines to stage colours on, and a 5x5 mosaic wall to score.
//!
//! ## Design Principles
//!
//! 1. **Plain-data state**: [`state::GameState`] owns every container;
//!    engine operations borrow it exclusively. No globals, no hidden
//!    instance.
//!
//! 2. **Tiles move, they are never copied**: each transfer removes from
//!    one container and inserts into exactly one other, so the 20-per-
//!    colour census holds between any two turns.
//!
//! 3. **Validate before mutate**: an illegal move is rejected before
//!    the state changes; a defective save file is rejected before the
//!    live game is replaced.
//!
//! ## Modules
//!
//! - `core`: tiles, players, moves, RNG
//! - `containers`: bag, lid, factories, table centres
//! - `board`: pattern lines, floor line, the wall
//! - `state`: the complete game state and its census invariant
//! - `engine`: move validation, turn execution, scoring, setup
//! - `save`: key=value persistence with staged loading
//! - `view`: read-only rendering for the CLI

pub mod board;
pub mod containers;
pub mod core;
pub mod engine;
pub mod save;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    DraftMove, GameRng, MoveSource, MoveTarget, Player, PlayerId, Tile, ALL_COLOURS,
    MAX_PLAYERS, MIN_PLAYERS, TILES_PER_COLOUR, TILE_COLOURS,
};

pub use crate::board::{
    FloorLine, PatternLine, PlayerBoard, Wall, FLOOR_CAPACITY, FLOOR_PENALTY, WALL_SIZE,
    WALL_TEMPLATE,
};

pub use crate::containers::{Bag, Centre, Factory, Lid, TileCensus, FACTORY_CAPACITY};

pub use crate::engine::{
    apply_move, determine_winner, final_scoring, game_over, score_round, validate_move,
    GameResult, MoveError, TurnOutcome,
};

pub use crate::engine::setup::{fill_factories, refill_bag_from_lid, GameBuilder};

pub use crate::save::{load_from_file, parse_save, save_to_file, to_save_string, SaveError};

pub use crate::state::{factory_count_for, GameState, MAX_CENTRES};
