//! The rules engine: move validation, turn execution, scoring, and
//! winner determination.
//!
//! Operations are free functions over an exclusively borrowed
//! [`GameState`]; the state carries no behaviour of its own and there
//! is no hidden instance anywhere. A rejected move returns before any
//! mutation, so the state is never left half-applied.
//!
//! ## Turn lifecycle
//!
//! [`apply_move`] drains the source, routes the drafted colour to its
//! target (overflow walks target -> floor -> lid), sends factory
//! leftovers to the designated centre, and then either passes the turn
//! or, when nothing draftable remains, runs the round scoring pass,
//! checks for game end, and refills the factories.

pub mod setup;

use smallvec::SmallVec;

use crate::board::FLOOR_PENALTY;
use crate::containers::FACTORY_CAPACITY;
use crate::core::action::{DraftMove, MoveSource, MoveTarget};
use crate::core::player::PlayerId;
use crate::core::tile::Tile;
use crate::state::GameState;

/// Why a proposed move is illegal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The first-player marker is not draftable.
    MarkerNotDraftable,
    /// Factory index out of range.
    NoSuchFactory(usize),
    /// Centre index out of range.
    NoSuchCentre(usize),
    /// Pattern line row out of range.
    NoSuchRow(usize),
    /// The source holds no tile of the chosen colour.
    ColourNotInSource,
    /// The pattern line already holds a different colour.
    LineHoldsOtherColour {
        /// The offending row.
        row: usize,
    },
    /// The wall row alongside the pattern line already has this colour.
    ColourAlreadyOnWall {
        /// The offending row.
        row: usize,
    },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MarkerNotDraftable => write!(f, "the first-player marker cannot be drafted"),
            Self::NoSuchFactory(index) => write!(f, "no factory {index}"),
            Self::NoSuchCentre(index) => write!(f, "no table centre {index}"),
            Self::NoSuchRow(row) => write!(f, "no pattern line {row}"),
            Self::ColourNotInSource => write!(f, "that colour is not in the chosen source"),
            Self::LineHoldsOtherColour { row } => {
                write!(f, "pattern line {row} already holds a different colour")
            }
            Self::ColourAlreadyOnWall { row } => {
                write!(f, "wall row {row} already has that colour")
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// What a successfully applied move led to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Play continues; it is now this player's turn.
    NextPlayer(PlayerId),
    /// The round ended, scoring ran, and factories were refilled.
    RoundEnd,
    /// The round ended and a complete wall row finished the game.
    GameOver(GameResult),
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Scores and row counts both tied at the top.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// Check a proposed move against the current state without touching it.
pub fn validate_move(state: &GameState, mv: &DraftMove) -> Result<(), MoveError> {
    if !mv.colour.is_colour() {
        return Err(MoveError::MarkerNotDraftable);
    }

    match mv.source {
        MoveSource::Factory(index) => {
            let factory = state
                .factories()
                .get(index)
                .ok_or(MoveError::NoSuchFactory(index))?;
            if !factory.contains_colour(mv.colour) {
                return Err(MoveError::ColourNotInSource);
            }
        }
        MoveSource::Centre(index) => {
            let centre = state
                .centres()
                .get(index)
                .ok_or(MoveError::NoSuchCentre(index))?;
            if !centre.contains_colour(mv.colour) {
                return Err(MoveError::ColourNotInSource);
            }
        }
    }

    if let MoveTarget::PatternLine(row) = mv.target {
        if row >= crate::board::WALL_SIZE {
            return Err(MoveError::NoSuchRow(row));
        }
        let board = state.player(state.current_player()).board();
        if let Some(held) = board.line(row).colour() {
            if held != mv.colour {
                return Err(MoveError::LineHoldsOtherColour { row });
            }
        }
        if board.wall().has_colour_in_row(mv.colour, row) {
            return Err(MoveError::ColourAlreadyOnWall { row });
        }
    }

    Ok(())
}

/// Validate and execute one move for the current player.
///
/// On success the source is drained, tiles are routed, and the turn
/// advances; at round end, scoring and refilling run instead. On
/// error nothing changes.
pub fn apply_move(state: &mut GameState, mv: &DraftMove) -> Result<TurnOutcome, MoveError> {
    validate_move(state, mv)?;

    let mover = state.current_player();

    // Drain the source. A factory gives up everything; a centre gives
    // up only the chosen colour and the marker.
    let mut matching: SmallVec<[Tile; FACTORY_CAPACITY]> = SmallVec::new();
    let mut leftovers: SmallVec<[Tile; FACTORY_CAPACITY]> = SmallVec::new();
    let mut marker = None;

    match mv.source {
        MoveSource::Factory(index) => {
            for tile in state.factory_mut(index).drain_all() {
                if tile == mv.colour {
                    matching.push(tile);
                } else if tile.is_marker() {
                    marker = Some(tile);
                } else {
                    leftovers.push(tile);
                }
            }
        }
        MoveSource::Centre(index) => {
            matching.extend(state.centre_mut(index).drain_colour(mv.colour));
            marker = state.centre_mut(index).take_marker();
        }
    }

    // The marker lands on the mover's floor before anything else, so
    // it takes the earliest (cheapest) free penalty position.
    if let Some(tile) = marker {
        overflow_to_floor(state, mover, tile);
    }

    match mv.target {
        MoveTarget::PatternLine(row) => {
            for tile in matching {
                let rejected = state.player_mut(mover).board_mut().line_mut(row).try_push(tile);
                if let Err(tile) = rejected {
                    overflow_to_floor(state, mover, tile);
                }
            }
        }
        MoveTarget::FloorLine => {
            for tile in matching {
                overflow_to_floor(state, mover, tile);
            }
        }
    }

    if !leftovers.is_empty() {
        let centre = state.designated_centre();
        for tile in leftovers {
            state.centre_mut(centre).add(tile);
        }
    }

    let outcome = if state.drafting_done() {
        score_round(state);
        if game_over(state) {
            final_scoring(state);
            TurnOutcome::GameOver(determine_winner(state))
        } else {
            setup::fill_factories(state);
            TurnOutcome::RoundEnd
        }
    } else {
        state.advance_turn();
        TurnOutcome::NextPlayer(state.current_player())
    };

    debug_assert!(state.validate(), "tile census broken by move {mv:?}");

    Ok(outcome)
}

/// Put a tile on a player's floor line, diverting to the lid when the
/// floor is full. Nothing is ever dropped.
fn overflow_to_floor(state: &mut GameState, player: PlayerId, tile: Tile) {
    let rejected = state.player_mut(player).board_mut().floor_mut().try_push(tile);
    if let Err(tile) = rejected {
        state.lid_mut().add(tile);
    }
}

/// Run the end-of-round scoring pass for every player, in table order.
///
/// Full pattern lines move their front tile to the wall (scoring the
/// placement) and discard the rest to the lid. Floor tiles are charged
/// by position; the marker returns to the first centre and fixes its
/// holder as next round's starting player. Each player's round net is
/// applied with the at-zero clamp.
pub fn score_round(state: &mut GameState) {
    let mut next_starter = None;

    for id in PlayerId::all(state.player_count()) {
        let mut net: i32 = 0;

        for row in 0..crate::board::WALL_SIZE {
            let drained = state.player_mut(id).board_mut().line_mut(row).drain_for_scoring();
            if let Some((placed, excess)) = drained {
                let board = state.player_mut(id).board_mut();
                net += board.wall_mut().place(placed, row) as i32;
                for tile in excess {
                    state.lid_mut().add(tile);
                }
            }
        }

        let floor_tiles = state.player_mut(id).board_mut().floor_mut().take_all();
        for (position, tile) in floor_tiles.into_iter().enumerate() {
            net += FLOOR_PENALTY[position];
            if tile.is_marker() {
                state.centre_mut(0).add(tile);
                next_starter = Some(id);
            } else {
                state.lid_mut().add(tile);
            }
        }

        state.player_mut(id).apply_score(net);
    }

    if let Some(starter) = next_starter {
        state.set_current_player(starter);
    }
}

/// Whether any player's wall has a complete row. Checked after each
/// scoring pass; ends the game.
#[must_use]
pub fn game_over(state: &GameState) -> bool {
    state
        .players()
        .iter()
        .any(|player| player.board().wall().any_row_complete())
}

/// Apply the one-time end-of-game bonuses and record the tie-break
/// statistic: +2 per complete row, +7 per complete column, +10 per
/// colour fully placed.
pub fn final_scoring(state: &mut GameState) {
    for id in PlayerId::all(state.player_count()) {
        let wall = state.player(id).board().wall();
        let rows = wall.complete_rows();
        let columns = wall.complete_columns();
        let colours = wall.complete_colours();

        let bonus = 2 * i32::from(rows) + 7 * i32::from(columns) + 10 * i32::from(colours);

        let player = state.player_mut(id);
        player.apply_score(bonus);
        player.set_rows_completed(rows);
    }
}

/// Pick the winner: highest score, then most completed rows among the
/// tied, otherwise a draw.
#[must_use]
pub fn determine_winner(state: &GameState) -> GameResult {
    let top_score = state
        .players()
        .iter()
        .map(crate::core::player::Player::score)
        .max()
        .unwrap_or(0);

    let tied: Vec<PlayerId> = PlayerId::all(state.player_count())
        .filter(|id| state.player(*id).score() == top_score)
        .collect();

    if tied.len() == 1 {
        return GameResult::Winner(tied[0]);
    }

    let top_rows = tied
        .iter()
        .map(|id| state.player(*id).rows_completed())
        .max()
        .unwrap_or(0);

    let tie_broken: Vec<PlayerId> = tied
        .into_iter()
        .filter(|id| state.player(*id).rows_completed() == top_rows)
        .collect();

    if tie_broken.len() == 1 {
        GameResult::Winner(tie_broken[0])
    } else {
        GameResult::Draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tile::{ALL_COLOURS, TILES_PER_COLOUR};

    /// A valid 2-player state with a stacked (non-random) bag.
    fn stacked_state() -> GameState {
        let mut state = GameState::new(vec!["A".into(), "B".into()], 1);
        for colour in ALL_COLOURS {
            for _ in 0..TILES_PER_COLOUR {
                state.bag_mut().add(colour);
            }
        }
        state.centre_mut(0).add(Tile::First);
        state
    }

    /// Move `count` tiles of `colour` from the bag onto a factory.
    fn stack_factory(state: &mut GameState, index: usize, colour: Tile, count: usize) {
        for _ in 0..count {
            let tile = remove_from_bag(state, colour);
            state.factory_mut(index).add(tile);
        }
    }

    fn remove_from_bag(state: &mut GameState, colour: Tile) -> Tile {
        // Draw until the wanted colour comes up, put the rest back.
        loop {
            let tile = state.bag_mut().draw().expect("bag has the colour");
            if tile == colour {
                return tile;
            }
            state.bag_mut().add(tile);
        }
    }

    #[test]
    fn test_validate_rejects_marker_draft() {
        let state = stacked_state();
        let mv = DraftMove::new(MoveSource::Centre(0), MoveTarget::FloorLine, Tile::First);
        assert_eq!(validate_move(&state, &mv), Err(MoveError::MarkerNotDraftable));
    }

    #[test]
    fn test_validate_rejects_missing_colour() {
        let mut state = stacked_state();
        stack_factory(&mut state, 0, Tile::Red, 4);

        let mv = DraftMove::new(MoveSource::Factory(0), MoveTarget::FloorLine, Tile::Yellow);
        assert_eq!(validate_move(&state, &mv), Err(MoveError::ColourNotInSource));
    }

    #[test]
    fn test_validate_rejects_bad_indices() {
        let state = stacked_state();
        let mv = DraftMove::new(MoveSource::Factory(9), MoveTarget::FloorLine, Tile::Red);
        assert_eq!(validate_move(&state, &mv), Err(MoveError::NoSuchFactory(9)));

        let mv = DraftMove::new(MoveSource::Centre(1), MoveTarget::FloorLine, Tile::Red);
        assert_eq!(validate_move(&state, &mv), Err(MoveError::NoSuchCentre(1)));
    }

    #[test]
    fn test_validate_rejects_wall_conflict() {
        let mut state = stacked_state();
        stack_factory(&mut state, 0, Tile::Red, 2);
        state
            .player_mut(PlayerId::new(0))
            .board_mut()
            .wall_mut()
            .place(Tile::Red, 1);
        // Keep the census honest for the debug assertion elsewhere.
        let _ = remove_from_bag(&mut state, Tile::Red);

        let mv = DraftMove::new(
            MoveSource::Factory(0),
            MoveTarget::PatternLine(1),
            Tile::Red,
        );
        assert_eq!(
            validate_move(&state, &mv),
            Err(MoveError::ColourAlreadyOnWall { row: 1 })
        );
    }

    #[test]
    fn test_rejected_move_mutates_nothing() {
        let mut state = stacked_state();
        stack_factory(&mut state, 0, Tile::Red, 4);

        let mv = DraftMove::new(MoveSource::Factory(0), MoveTarget::FloorLine, Tile::Yellow);
        assert!(apply_move(&mut state, &mv).is_err());

        assert_eq!(state.factory(0).len(), 4);
        assert_eq!(state.current_player(), PlayerId::new(0));
    }

    #[test]
    fn test_factory_draft_routes_all_tiles() {
        let mut state = stacked_state();
        stack_factory(&mut state, 0, Tile::Red, 3);
        stack_factory(&mut state, 0, Tile::Yellow, 1);
        // Something else on the table so the round does not end.
        stack_factory(&mut state, 1, Tile::Black, 4);

        let mv = DraftMove::new(
            MoveSource::Factory(0),
            MoveTarget::PatternLine(3),
            Tile::Red,
        );
        let outcome = apply_move(&mut state, &mv).unwrap();

        assert_eq!(outcome, TurnOutcome::NextPlayer(PlayerId::new(1)));
        assert!(state.factory(0).is_empty());

        let board = state.player(PlayerId::new(0)).board();
        assert_eq!(board.line(3).len(), 3);
        assert_eq!(board.line(3).colour(), Some(Tile::Red));

        // The yellow leftover moved to the centre, joining the marker.
        assert!(state.centre(0).contains_colour(Tile::Yellow));
        assert!(state.centre(0).has_marker());
    }

    #[test]
    fn test_centre_draft_takes_marker_and_colour_only() {
        let mut state = stacked_state();
        let red = remove_from_bag(&mut state, Tile::Red);
        let yellow = remove_from_bag(&mut state, Tile::Yellow);
        state.centre_mut(0).add(red);
        state.centre_mut(0).add(yellow);
        stack_factory(&mut state, 0, Tile::Black, 4);

        let mv = DraftMove::new(
            MoveSource::Centre(0),
            MoveTarget::PatternLine(1),
            Tile::Red,
        );
        apply_move(&mut state, &mv).unwrap();

        let board = state.player(PlayerId::new(0)).board();
        assert_eq!(board.line(1).colour(), Some(Tile::Red));
        // Marker went to the floor, in front of everything else.
        assert_eq!(board.floor().iter().next(), Some(Tile::First));
        // Yellow stayed in the centre.
        assert!(state.centre(0).contains_colour(Tile::Yellow));
        assert!(!state.centre(0).has_marker());
    }

    #[test]
    fn test_line_overflow_goes_to_floor() {
        let mut state = stacked_state();
        stack_factory(&mut state, 0, Tile::Red, 4);
        stack_factory(&mut state, 1, Tile::Black, 4);

        // Row 1 holds two tiles; four reds overflow by two.
        let mv = DraftMove::new(
            MoveSource::Factory(0),
            MoveTarget::PatternLine(1),
            Tile::Red,
        );
        apply_move(&mut state, &mv).unwrap();

        let board = state.player(PlayerId::new(0)).board();
        assert!(board.line(1).is_full());
        assert_eq!(board.floor().len(), 2);
    }

    #[test]
    fn test_floor_overflow_goes_to_lid() {
        let mut state = stacked_state();
        // Fill the floor completely first.
        for _ in 0..7 {
            let tile = remove_from_bag(&mut state, Tile::Black);
            state
                .player_mut(PlayerId::new(0))
                .board_mut()
                .floor_mut()
                .try_push(tile)
                .unwrap();
        }
        stack_factory(&mut state, 0, Tile::Red, 2);
        stack_factory(&mut state, 1, Tile::Yellow, 4);

        let mv = DraftMove::new(MoveSource::Factory(0), MoveTarget::FloorLine, Tile::Red);
        apply_move(&mut state, &mv).unwrap();

        assert_eq!(state.lid().len(), 2);
        assert!(state.validate());
    }

    #[test]
    fn test_round_end_triggers_scoring_and_refill() {
        let mut state = stacked_state();
        // One lone factory tile; taking it ends the round. The centre
        // holds only the marker, which counts as drained.
        stack_factory(&mut state, 0, Tile::Red, 1);

        let mv = DraftMove::new(
            MoveSource::Factory(0),
            MoveTarget::PatternLine(0),
            Tile::Red,
        );
        let outcome = apply_move(&mut state, &mv).unwrap();
        assert_eq!(outcome, TurnOutcome::RoundEnd);

        // The single-tile line scored onto the wall.
        let board = state.player(PlayerId::new(0)).board();
        assert!(board.wall().has_colour_in_row(Tile::Red, 0));
        assert_eq!(state.player(PlayerId::new(0)).score(), 1);

        // Factories were refilled for the next round.
        let refilled: usize = state.factories().iter().map(crate::containers::Factory::len).sum();
        assert_eq!(refilled, 20);
        assert!(state.validate());
    }

    #[test]
    fn test_marker_holder_starts_next_round() {
        let mut state = stacked_state();
        let red = remove_from_bag(&mut state, Tile::Red);
        state.centre_mut(0).add(red);
        stack_factory(&mut state, 0, Tile::Yellow, 1);

        // Player 0 drafts from a factory; player 1 takes the centre
        // (and the marker), ending the round.
        let mv = DraftMove::new(
            MoveSource::Factory(0),
            MoveTarget::PatternLine(4),
            Tile::Yellow,
        );
        apply_move(&mut state, &mv).unwrap();

        let mv = DraftMove::new(
            MoveSource::Centre(0),
            MoveTarget::PatternLine(0),
            Tile::Red,
        );
        let outcome = apply_move(&mut state, &mv).unwrap();
        assert_eq!(outcome, TurnOutcome::RoundEnd);

        // Marker penalty applied; marker back in the centre; holder
        // starts the new round.
        assert_eq!(state.current_player(), PlayerId::new(1));
        assert!(state.centre(0).has_marker());
        // Player 1 scored 1 for the wall tile, -1 for the marker: net 0.
        assert_eq!(state.player(PlayerId::new(1)).score(), 0);
    }

    #[test]
    fn test_winner_by_score() {
        let mut state = stacked_state();
        state.player_mut(PlayerId::new(0)).apply_score(10);
        state.player_mut(PlayerId::new(1)).apply_score(20);

        assert_eq!(determine_winner(&state), GameResult::Winner(PlayerId::new(1)));
    }

    #[test]
    fn test_winner_by_rows_completed() {
        let mut state = stacked_state();
        state.player_mut(PlayerId::new(0)).apply_score(20);
        state.player_mut(PlayerId::new(1)).apply_score(20);
        state.player_mut(PlayerId::new(0)).set_rows_completed(2);
        state.player_mut(PlayerId::new(1)).set_rows_completed(1);

        assert_eq!(determine_winner(&state), GameResult::Winner(PlayerId::new(0)));
    }

    #[test]
    fn test_full_tie_is_a_draw() {
        let mut state = stacked_state();
        state.player_mut(PlayerId::new(0)).apply_score(20);
        state.player_mut(PlayerId::new(1)).apply_score(20);
        state.player_mut(PlayerId::new(0)).set_rows_completed(1);
        state.player_mut(PlayerId::new(1)).set_rows_completed(1);

        let result = determine_winner(&state);
        assert_eq!(result, GameResult::Draw);
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(!result.is_winner(PlayerId::new(1)));
    }

    #[test]
    fn test_four_player_winner_tie_break() {
        let mut state = GameState::new(
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            1,
        );
        for (index, score) in [30, 45, 45, 10].into_iter().enumerate() {
            state.player_mut(PlayerId::new(index as u8)).apply_score(score);
        }
        state.player_mut(PlayerId::new(1)).set_rows_completed(1);
        state.player_mut(PlayerId::new(2)).set_rows_completed(3);

        assert_eq!(determine_winner(&state), GameResult::Winner(PlayerId::new(2)));
    }
}
