//! New-game construction and factory refills.
//!
//! `GameBuilder` assembles a ready-to-play state: seated players, a
//! generated 100-tile bag, the marker in the first centre, and filled
//! factories. Refilling is also here because every round start reuses
//! it.

use crate::containers::FACTORY_CAPACITY;
use crate::core::rng::GameRng;
use crate::core::tile::{Tile, ALL_COLOURS, TILES_PER_COLOUR, TILE_COLOURS};
use crate::state::GameState;

/// Configures and builds a new game.
///
/// ## Example
///
/// ```
/// use tessera::engine::setup::GameBuilder;
///
/// let state = GameBuilder::new()
///     .player_names(vec!["Alice".into(), "Bob".into()])
///     .seed(42)
///     .build();
///
/// assert!(state.validate());
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    names: Vec<String>,
    centre_count: usize,
    seed: Option<u64>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            names: vec!["Player 1".into(), "Player 2".into()],
            centre_count: 1,
            seed: None,
        }
    }
}

impl GameBuilder {
    /// Start from the defaults: two players, one centre, entropy seed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat these players, in table order. 2-4 names.
    #[must_use]
    pub fn player_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    /// Use one or two table centres.
    #[must_use]
    pub fn centres(mut self, count: usize) -> Self {
        self.centre_count = count;
        self
    }

    /// Fix the bag-generation seed for a reproducible game.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the initial state: bag generated, marker in the first
    /// centre, factories filled, first seated player to act.
    #[must_use]
    pub fn build(self) -> GameState {
        let mut state = GameState::new(self.names, self.centre_count);
        let mut rng = GameRng::from_seed_or_entropy(self.seed);

        generate_bag(&mut state, &mut rng);
        state.centre_mut(0).add(Tile::First);
        fill_factories(&mut state);

        debug_assert!(state.validate(), "new game failed tile census");
        state
    }
}

/// Generate the 100-tile bag: 20 of each colour, ordered by rejection
/// sampling.
///
/// Each draw picks a uniform colour index and walks forward along the
/// fixed colour order past exhausted quotas; running off the end
/// re-rolls. The walk never wraps, so early colours fill slightly
/// sooner on average; the order of a seeded bag is part of the
/// reproducible setup, not a fairness concern.
fn generate_bag(state: &mut GameState, rng: &mut GameRng) {
    let mut counts = [0usize; TILE_COLOURS];
    let mut placed = 0;

    while placed < TILE_COLOURS * TILES_PER_COLOUR {
        let mut index = rng.gen_range(0..TILE_COLOURS);
        while index < TILE_COLOURS && counts[index] == TILES_PER_COLOUR {
            index += 1;
        }
        if index < TILE_COLOURS {
            state.bag_mut().add(ALL_COLOURS[index]);
            counts[index] += 1;
            placed += 1;
        }
    }
}

/// Fill every factory with four tiles drawn one at a time from the bag.
///
/// An empty bag swallows the lid and drawing continues. When bag and
/// lid are both dry, filling stops where it is: short factories are a
/// legitimate late-game state, not an error.
pub fn fill_factories(state: &mut GameState) {
    for index in 0..state.factories().len() {
        for _ in 0..FACTORY_CAPACITY {
            if state.bag().is_empty() {
                refill_bag_from_lid(state);
            }
            match state.bag_mut().draw() {
                Some(tile) => state.factory_mut(index).add(tile),
                None => return,
            }
        }
    }
}

/// Tip the lid back into the bag, in lid insertion order.
pub fn refill_bag_from_lid(state: &mut GameState) {
    for tile in state.lid_mut().take_all() {
        state.bag_mut().add(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::TileCensus;
    use crate::core::player::PlayerId;

    #[test]
    fn test_build_two_player_game() {
        let state = GameBuilder::new().seed(42).build();

        assert!(state.validate());
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.factories().len(), 5);
        assert_eq!(state.current_player(), PlayerId::new(0));
        assert!(state.centre(0).has_marker());

        // 5 factories of 4 leave 80 in the bag.
        for factory in state.factories() {
            assert_eq!(factory.len(), FACTORY_CAPACITY);
        }
        assert_eq!(state.bag().len(), 80);
    }

    #[test]
    fn test_build_is_deterministic_for_a_seed() {
        let a = GameBuilder::new().seed(7).build();
        let b = GameBuilder::new().seed(7).build();

        let tiles_a: Vec<Tile> = a.bag().iter().collect();
        let tiles_b: Vec<Tile> = b.bag().iter().collect();
        assert_eq!(tiles_a, tiles_b);

        for (fa, fb) in a.factories().iter().zip(b.factories()) {
            let ta: Vec<Tile> = fa.iter().collect();
            let tb: Vec<Tile> = fb.iter().collect();
            assert_eq!(ta, tb);
        }
    }

    #[test]
    fn test_generated_bag_has_quota_per_colour() {
        let state = GameBuilder::new().seed(123).build();

        let mut census = TileCensus::default();
        state.bag().report_census(&mut census);
        for factory in state.factories() {
            factory.report_census(&mut census);
        }

        for colour in ALL_COLOURS {
            assert_eq!(census.get(&colour), Some(&TILES_PER_COLOUR));
        }
    }

    #[test]
    fn test_four_player_build() {
        let names = vec!["A".into(), "B".into(), "C".into(), "D".into()];
        let state = GameBuilder::new().player_names(names).centres(2).seed(1).build();

        assert!(state.validate());
        assert_eq!(state.factories().len(), 9);
        assert_eq!(state.centres().len(), 2);
        // 9 factories of 4 leave 64 in the bag.
        assert_eq!(state.bag().len(), 64);
        // The marker always starts in the first centre.
        assert!(state.centre(0).has_marker());
        assert!(!state.centre(1).has_marker());
    }

    #[test]
    fn test_fill_drains_lid_when_bag_runs_dry() {
        let mut state = GameState::new(vec!["A".into(), "B".into()], 1);
        // Two tiles in the bag, six in the lid: first factory needs all
        // of both plus the refill in between.
        state.bag_mut().add(Tile::Red);
        state.bag_mut().add(Tile::Red);
        for _ in 0..6 {
            state.lid_mut().add(Tile::Yellow);
        }

        fill_factories(&mut state);

        assert_eq!(state.factory(0).len(), 4);
        assert_eq!(state.factory(1).len(), 4);
        assert!(state.factory(2).is_empty());
        assert!(state.bag().is_empty());
        assert!(state.lid().is_empty());
    }

    #[test]
    fn test_fill_stops_short_when_everything_is_dry() {
        let mut state = GameState::new(vec!["A".into(), "B".into()], 1);
        for _ in 0..5 {
            state.bag_mut().add(Tile::Black);
        }

        fill_factories(&mut state);

        // Five tiles: one full factory, one single-tile factory, rest
        // empty. Not an error.
        assert_eq!(state.factory(0).len(), 4);
        assert_eq!(state.factory(1).len(), 1);
        assert!(state.factory(2).is_empty());
        assert!(state.factory(3).is_empty());
        assert!(state.factory(4).is_empty());
    }
}
