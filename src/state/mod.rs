//! The complete game state.
//!
//! `GameState` owns every container in play: the bag, the lid, the
//! factories, one or two table centres, and the seated players with
//! their boards. It is handed to engine operations by exclusive
//! mutable reference; there is no global instance.
//!
//! ## Census invariant
//!
//! Between turns the state always accounts for exactly 20 tiles of
//! each colour and one first-player marker across all containers.
//! [`GameState::validate`] checks this; it runs after new-game setup
//! and after every load.

use crate::containers::{Bag, Centre, Factory, Lid, TileCensus};
use crate::core::player::{Player, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use crate::core::tile::{ALL_COLOURS, TILES_PER_COLOUR};
use crate::core::Tile;

/// Table centres a game may have.
pub const MAX_CENTRES: usize = 2;

/// Factories in play for a given player count: 5, 7, or 9.
#[must_use]
pub fn factory_count_for(player_count: usize) -> usize {
    match player_count {
        2 => 5,
        3 => 7,
        _ => 9,
    }
}

/// Everything on the table.
#[derive(Clone, Debug)]
pub struct GameState {
    bag: Bag,
    lid: Lid,
    factories: Vec<Factory>,
    centres: Vec<Centre>,
    players: Vec<Player>,
    current: PlayerId,
}

impl GameState {
    /// Create a state with empty containers for the given players.
    ///
    /// The factory count follows the player count (5/7/9). The bag
    /// starts empty; setup or a save loader populates it.
    ///
    /// # Panics
    ///
    /// Panics when the player count is outside 2..=4 or the centre
    /// count outside 1..=2. Callers at trust boundaries (the save
    /// loader) check first.
    #[must_use]
    pub fn new(player_names: Vec<String>, centre_count: usize) -> Self {
        let player_count = player_names.len();
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count),
            "player count must be 2-4, got {player_count}"
        );
        assert!(
            (1..=MAX_CENTRES).contains(&centre_count),
            "centre count must be 1-2, got {centre_count}"
        );

        Self {
            bag: Bag::new(),
            lid: Lid::new(),
            factories: (0..factory_count_for(player_count))
                .map(|_| Factory::new())
                .collect(),
            centres: (0..centre_count).map(|_| Centre::new()).collect(),
            players: player_names.into_iter().map(Player::new).collect(),
            current: PlayerId::new(0),
        }
    }

    // === Players ===

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// All players in table order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// One player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    /// Mutable access to one player.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Set the player to act next.
    pub fn set_current_player(&mut self, id: PlayerId) {
        debug_assert!(id.index() < self.players.len());
        self.current = id;
    }

    /// Pass the turn to the next player in table order.
    pub fn advance_turn(&mut self) {
        self.current = self.current.next(self.player_count());
    }

    // === Containers ===

    /// The draw bag.
    #[must_use]
    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    /// Mutable access to the bag.
    pub fn bag_mut(&mut self) -> &mut Bag {
        &mut self.bag
    }

    /// The box lid.
    #[must_use]
    pub fn lid(&self) -> &Lid {
        &self.lid
    }

    /// Mutable access to the lid.
    pub fn lid_mut(&mut self) -> &mut Lid {
        &mut self.lid
    }

    /// All factories.
    #[must_use]
    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    /// One factory.
    #[must_use]
    pub fn factory(&self, index: usize) -> &Factory {
        &self.factories[index]
    }

    /// Mutable access to one factory.
    pub fn factory_mut(&mut self, index: usize) -> &mut Factory {
        &mut self.factories[index]
    }

    /// All table centres (1 or 2).
    #[must_use]
    pub fn centres(&self) -> &[Centre] {
        &self.centres
    }

    /// One centre.
    #[must_use]
    pub fn centre(&self, index: usize) -> &Centre {
        &self.centres[index]
    }

    /// Mutable access to one centre.
    pub fn centre_mut(&mut self, index: usize) -> &mut Centre {
        &mut self.centres[index]
    }

    /// The centre that receives factory leftovers: the one holding the
    /// fewest tiles, lowest index on ties.
    #[must_use]
    pub fn designated_centre(&self) -> usize {
        self.centres
            .iter()
            .enumerate()
            .min_by_key(|(index, centre)| (centre.len(), *index))
            .map_or(0, |(index, _)| index)
    }

    // === Round bookkeeping ===

    /// Whether drafting is finished: every factory is empty and every
    /// centre has nothing draftable left.
    #[must_use]
    pub fn drafting_done(&self) -> bool {
        self.factories.iter().all(Factory::is_drained)
            && self.centres.iter().all(Centre::is_drained)
    }

    // === Validation ===

    /// Count every tile in play, by colour plus the marker.
    #[must_use]
    pub fn census(&self) -> TileCensus {
        let mut census = TileCensus::default();
        self.bag.report_census(&mut census);
        self.lid.report_census(&mut census);
        for factory in &self.factories {
            factory.report_census(&mut census);
        }
        for centre in &self.centres {
            centre.report_census(&mut census);
        }
        for player in &self.players {
            player.board().report_census(&mut census);
        }
        census
    }

    /// Whether the census matches the canonical distribution: 20 per
    /// colour and exactly one marker.
    #[must_use]
    pub fn validate(&self) -> bool {
        let census = self.census();
        ALL_COLOURS
            .iter()
            .all(|colour| census.get(colour).copied().unwrap_or(0) == TILES_PER_COLOUR)
            && census.get(&Tile::First).copied().unwrap_or(0) == 1
    }
}
