//! Player identity and per-game player state.
//!
//! ## PlayerId
//!
//! Type-safe index into the table-order player list (2-4 players).
//!
//! ## Player
//!
//! Name, running score, the rows-completed tie-break statistic, and the
//! owned board. The score never persists below zero: round scoring can
//! go negative in the middle of a computation, but the stored total is
//! clamped.

use serde::{Deserialize, Serialize};

use crate::board::PlayerBoard;

/// Minimum players per game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum players per game.
pub const MAX_PLAYERS: usize = 4;

/// Player identifier, 0-based in table order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The next player in table order, wrapping around.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One seated player.
#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    score: u32,
    rows_completed: u8,
    board: PlayerBoard,
}

impl Player {
    /// Create a player with an empty board and zero score.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            rows_completed: 0,
            board: PlayerBoard::new(),
        }
    }

    /// The player's name. Fixed at creation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Apply a signed score delta, clamping the stored total at zero.
    pub fn apply_score(&mut self, delta: i32) {
        let total = i64::from(self.score) + i64::from(delta);
        self.score = u32::try_from(total.max(0)).unwrap_or(u32::MAX);
    }

    /// Overwrite the score. Used when restoring from a save.
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Completed wall rows, recorded at final scoring. Tie-break data.
    #[must_use]
    pub fn rows_completed(&self) -> u8 {
        self.rows_completed
    }

    pub fn set_rows_completed(&mut self, count: u8) {
        self.rows_completed = count;
    }

    /// The player's board.
    #[must_use]
    pub fn board(&self) -> &PlayerBoard {
        &self.board
    }

    /// Mutable access to the board.
    pub fn board_mut(&mut self) -> &mut PlayerBoard {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{p0}"), "Player 0");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
        assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_new_player() {
        let player = Player::new("Alice");
        assert_eq!(player.name(), "Alice");
        assert_eq!(player.score(), 0);
        assert_eq!(player.rows_completed(), 0);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let mut player = Player::new("Bob");
        player.apply_score(5);
        assert_eq!(player.score(), 5);

        player.apply_score(-14);
        assert_eq!(player.score(), 0);

        player.apply_score(3);
        assert_eq!(player.score(), 3);
    }

    #[test]
    fn test_player_id_serialization() {
        let id = PlayerId::new(2);
        let json = serde_json::to_string(&id).unwrap();
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
