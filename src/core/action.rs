//! Structured moves: the output of the command parser, the input of the
//! rules engine.
//!
//! A draft move is a triple: where the tiles come from, which colour is
//! taken, and where the taken tiles go. The engine never sees raw text;
//! the parser either produces a `DraftMove` or nothing.

use serde::{Deserialize, Serialize};

use crate::core::tile::Tile;

/// Where a move drafts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSource {
    /// A factory, by index.
    Factory(usize),
    /// A table centre, by index (0 or 1).
    Centre(usize),
}

/// Where the drafted tiles go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveTarget {
    /// A pattern line, by row (0..=4).
    PatternLine(usize),
    /// The floor line. Always legal; acts as the overflow sink.
    FloorLine,
}

/// A complete proposed move for the current player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftMove {
    /// Source container.
    pub source: MoveSource,
    /// Destination on the current player's board.
    pub target: MoveTarget,
    /// The colour to take. Every tile of this colour in the source moves.
    pub colour: Tile,
}

impl DraftMove {
    /// Create a move.
    #[must_use]
    pub fn new(source: MoveSource, target: MoveTarget, colour: Tile) -> Self {
        Self {
            source,
            target,
            colour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_equality() {
        let a = DraftMove::new(MoveSource::Factory(0), MoveTarget::PatternLine(2), Tile::Red);
        let b = DraftMove::new(MoveSource::Factory(0), MoveTarget::PatternLine(2), Tile::Red);
        let c = DraftMove::new(MoveSource::Centre(0), MoveTarget::PatternLine(2), Tile::Red);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_move_serialization() {
        let mv = DraftMove::new(MoveSource::Centre(1), MoveTarget::FloorLine, Tile::Black);
        let json = serde_json::to_string(&mv).unwrap();
        let back: DraftMove = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);
    }
}
