//! Save-game persistence: a line-oriented `KEY=value` text format.
//!
//! Tile lists are one character per tile (`B R Y U L F`), with `-` as
//! the empty placeholder in pattern-line, floor, and wall values.
//! Lines starting with `#` and blank lines are ignored on load.
//!
//! Loading is staged: [`parse_save`] builds a fresh [`GameState`] and
//! verifies the tile census before returning it. The caller's live
//! state is only replaced on success, so a defective file can never
//! destroy a session in progress.

use std::fmt::Write as _;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::core::player::PlayerId;
use crate::core::tile::{cell_char, Tile};
use crate::state::{factory_count_for, GameState, MAX_CENTRES};

const KEY_BAG: &str = "BAG";
const KEY_LID: &str = "LID";
const KEY_CURRENT_PLAYER: &str = "CURRENT_PLAYER";

/// Why a save could not be written or read back.
#[derive(Debug)]
pub enum SaveError {
    /// Filesystem failure.
    Io(std::io::Error),
    /// A line or value that does not fit the format.
    Malformed {
        /// 1-based line number in the save text.
        line: usize,
        /// What was wrong.
        message: String,
    },
    /// A required key was absent.
    MissingKey(String),
    /// The file parsed but its tile census is not a legal game.
    Defective,
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "file error: {e}"),
            Self::Malformed { line, message } => {
                write!(f, "malformed save at line {line}: {message}")
            }
            Self::MissingKey(key) => write!(f, "save is missing {key}"),
            Self::Defective => write!(f, "save game is defective"),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

fn tiles_to_string(tiles: impl Iterator<Item = Tile>) -> String {
    tiles.map(Tile::to_char).collect()
}

/// Serialize a state to save-file text.
#[must_use]
pub fn to_save_string(state: &GameState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{KEY_BAG}={}", tiles_to_string(state.bag().iter()));
    let _ = writeln!(out, "{KEY_LID}={}", tiles_to_string(state.lid().iter()));

    for (index, centre) in state.centres().iter().enumerate() {
        let _ = writeln!(
            out,
            "FACTORY_CENTRE_{index}={}",
            tiles_to_string(centre.iter())
        );
    }

    for (index, factory) in state.factories().iter().enumerate() {
        let _ = writeln!(out, "FACTORY_{index}={}", tiles_to_string(factory.iter()));
    }

    for id in PlayerId::all(state.player_count()) {
        let player = state.player(id);
        let board = player.board();
        let n = id.index();

        let _ = writeln!(out, "PLAYER_{n}_NAME={}", player.name());
        let _ = writeln!(out, "PLAYER_{n}_SCORE={}", player.score());

        for row in 0..crate::board::WALL_SIZE {
            let line = board.line(row);
            let mut value = "-".repeat(line.capacity() - line.len());
            value.extend(line.iter().map(Tile::to_char));
            let _ = writeln!(out, "PLAYER_{n}_PATTERN_LINE_{row}={value}");
        }

        let floor = board.floor();
        let mut value = tiles_to_string(floor.iter());
        value.push_str(&"-".repeat(crate::board::FLOOR_CAPACITY - floor.len()));
        let _ = writeln!(out, "PLAYER_{n}_FLOOR_LINE={value}");

        for row in 0..crate::board::WALL_SIZE {
            let value: String = board.wall().row(row).iter().map(|c| cell_char(*c)).collect();
            let _ = writeln!(out, "PLAYER_{n}_MOSAIC_{row}={value}");
        }
    }

    let _ = writeln!(out, "{KEY_CURRENT_PLAYER}={}", state.current_player().index());

    out
}

/// One parsed `KEY=value` entry with its source line for diagnostics.
struct Entry {
    line: usize,
    value: String,
}

struct Entries {
    map: FxHashMap<String, Entry>,
}

impl Entries {
    fn parse(text: &str) -> Result<Self, SaveError> {
        let mut map: FxHashMap<String, Entry> = FxHashMap::default();

        for (number, raw) in text.lines().enumerate() {
            let line = number + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(SaveError::Malformed {
                    line,
                    message: "expected KEY=value".into(),
                });
            };

            let key = key.trim().to_string();
            if map.contains_key(&key) {
                return Err(SaveError::Malformed {
                    line,
                    message: format!("duplicate key {key}"),
                });
            }
            map.insert(
                key,
                Entry {
                    line,
                    value: value.to_string(),
                },
            );
        }

        Ok(Self { map })
    }

    fn take(&mut self, key: &str) -> Result<Entry, SaveError> {
        self.map
            .remove(key)
            .ok_or_else(|| SaveError::MissingKey(key.to_string()))
    }

    fn take_optional(&mut self, key: &str) -> Option<Entry> {
        self.map.remove(key)
    }
}

fn parse_tiles(entry: &Entry, marker_allowed: bool) -> Result<Vec<Tile>, SaveError> {
    let mut tiles = Vec::new();
    for code in entry.value.chars() {
        match Tile::from_char(code) {
            Ok(Some(tile)) => {
                if tile.is_marker() && !marker_allowed {
                    return Err(SaveError::Malformed {
                        line: entry.line,
                        message: "marker not allowed here".into(),
                    });
                }
                tiles.push(tile);
            }
            Ok(None) => {}
            Err(other) => {
                return Err(SaveError::Malformed {
                    line: entry.line,
                    message: format!("unknown tile code '{other}'"),
                });
            }
        }
    }
    Ok(tiles)
}

/// Parse save text into a staging state.
///
/// The returned state has already passed [`GameState::validate`];
/// every failure leaves the caller's current game untouched.
pub fn parse_save(text: &str) -> Result<GameState, SaveError> {
    let mut entries = Entries::parse(text)?;

    // Seated players: contiguous PLAYER_<n>_NAME keys.
    let mut names = Vec::new();
    while let Some(entry) = entries.take_optional(&format!("PLAYER_{}_NAME", names.len())) {
        names.push(entry.value);
    }
    if !(crate::core::MIN_PLAYERS..=crate::core::MAX_PLAYERS).contains(&names.len()) {
        return Err(SaveError::Defective);
    }
    let player_count = names.len();

    // Centres: FACTORY_CENTRE_<n>, with bare FACTORY_CENTRE accepted
    // as the first.
    let mut centre_entries = Vec::new();
    if let Some(entry) = entries.take_optional("FACTORY_CENTRE") {
        centre_entries.push(entry);
    }
    for index in centre_entries.len()..MAX_CENTRES {
        if let Some(entry) = entries.take_optional(&format!("FACTORY_CENTRE_{index}")) {
            centre_entries.push(entry);
        } else {
            break;
        }
    }
    if centre_entries.is_empty() {
        return Err(SaveError::MissingKey("FACTORY_CENTRE_0".into()));
    }

    let mut state = GameState::new(names, centre_entries.len());

    // The marker is accepted in any shared container: a full floor
    // diverts it to the lid, from where it can cycle through the bag.
    // The census check still caps it at exactly one.
    for tile in parse_tiles(&entries.take(KEY_BAG)?, true)? {
        state.bag_mut().add(tile);
    }
    for tile in parse_tiles(&entries.take(KEY_LID)?, true)? {
        state.lid_mut().add(tile);
    }

    for (index, entry) in centre_entries.iter().enumerate() {
        for tile in parse_tiles(entry, true)? {
            state.centre_mut(index).add(tile);
        }
    }

    for index in 0..factory_count_for(player_count) {
        let entry = entries.take(&format!("FACTORY_{index}"))?;
        let tiles = parse_tiles(&entry, true)?;
        if tiles.len() > crate::containers::FACTORY_CAPACITY {
            return Err(SaveError::Malformed {
                line: entry.line,
                message: "factory holds more than four tiles".into(),
            });
        }
        for tile in tiles {
            state.factory_mut(index).add(tile);
        }
    }

    for id in PlayerId::all(player_count) {
        load_player(&mut state, id, &mut entries)?;
    }

    let entry = entries.take(KEY_CURRENT_PLAYER)?;
    let current: usize = entry.value.trim().parse().map_err(|_| SaveError::Malformed {
        line: entry.line,
        message: "current player is not a number".into(),
    })?;
    if current >= player_count {
        return Err(SaveError::Malformed {
            line: entry.line,
            message: format!("current player {current} out of range"),
        });
    }
    state.set_current_player(PlayerId::new(current as u8));

    if state.validate() {
        Ok(state)
    } else {
        Err(SaveError::Defective)
    }
}

fn load_player(
    state: &mut GameState,
    id: PlayerId,
    entries: &mut Entries,
) -> Result<(), SaveError> {
    let n = id.index();

    let entry = entries.take(&format!("PLAYER_{n}_SCORE"))?;
    let score: u32 = entry.value.trim().parse().map_err(|_| SaveError::Malformed {
        line: entry.line,
        message: "score is not a non-negative number".into(),
    })?;
    state.player_mut(id).set_score(score);

    for row in 0..crate::board::WALL_SIZE {
        let entry = entries.take(&format!("PLAYER_{n}_PATTERN_LINE_{row}"))?;
        for tile in parse_tiles(&entry, false)? {
            state
                .player_mut(id)
                .board_mut()
                .line_mut(row)
                .try_push(tile)
                .map_err(|_| SaveError::Malformed {
                    line: entry.line,
                    message: format!("pattern line {row} overfull or mixed"),
                })?;
        }
    }

    let entry = entries.take(&format!("PLAYER_{n}_FLOOR_LINE"))?;
    for tile in parse_tiles(&entry, true)? {
        state
            .player_mut(id)
            .board_mut()
            .floor_mut()
            .try_push(tile)
            .map_err(|_| SaveError::Malformed {
                line: entry.line,
                message: "floor line overfull".into(),
            })?;
    }

    for row in 0..crate::board::WALL_SIZE {
        let entry = entries.take(&format!("PLAYER_{n}_MOSAIC_{row}"))?;
        let cells: Vec<char> = entry.value.chars().collect();
        if cells.len() != crate::board::WALL_SIZE {
            return Err(SaveError::Malformed {
                line: entry.line,
                message: format!("wall row {row} must have five cells"),
            });
        }
        for (col, code) in cells.into_iter().enumerate() {
            match Tile::from_char(code) {
                Ok(None) => {}
                Ok(Some(tile)) if tile.is_colour() => {
                    // The template fixes which colour a cell may hold;
                    // anything else cannot have come from a real game.
                    if crate::board::Wall::template_colour(row, col) != tile {
                        return Err(SaveError::Malformed {
                            line: entry.line,
                            message: format!("wall cell ({row}, {col}) contradicts the template"),
                        });
                    }
                    state.player_mut(id).board_mut().wall_mut().restore(row, col, tile);
                }
                _ => {
                    return Err(SaveError::Malformed {
                        line: entry.line,
                        message: format!("bad wall cell code '{code}'"),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Write a save file.
pub fn save_to_file(state: &GameState, path: impl AsRef<Path>) -> Result<(), SaveError> {
    std::fs::write(path, to_save_string(state))?;
    Ok(())
}

/// Read and parse a save file into a staging state.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<GameState, SaveError> {
    let text = std::fs::read_to_string(path)?;
    parse_save(&text)
}
