//! tessera CLI - the interactive text-mode table.
//!
//! The binary owns everything the engine treats as a collaborator:
//! reading raw input, parsing it into structured actions, rendering
//! state between turns, and the save/load prompts. The engine itself
//! never sees a string of user text.

use std::io::{self, BufRead, Write};

use clap::Parser;

use tessera::engine::setup::GameBuilder;
use tessera::engine::{apply_move, GameResult, TurnOutcome};
use tessera::save::{load_from_file, save_to_file};
use tessera::state::GameState;
use tessera::view::{render_player, render_scores, render_table};
use tessera::{DraftMove, MoveSource, MoveTarget, PlayerId, Tile, MAX_PLAYERS, MIN_PLAYERS};

const BANNER: &str = "\
=====================\n\
      TESSERA\n\
=====================";

const CREDITS: &str = "\
-------------------\n\
tessera - a tile-drafting table for 2-4 players\n\
-------------------";

const MENU: &str = "\
Menu\n\
----\n\
1. New Game\n\
2. Load Game\n\
3. Credits\n\
4. Quit\n\
\n\
In a game: '<source> <colour> <dest>' drafts tiles\n\
  source: factory number, or 'c'/'d' for a table centre\n\
  colour: R Y B L U\n\
  dest:   pattern line 1-5, or 'f' for the floor\n\
Other commands: 'board [n]', 'save', 'menu', 'quit'";

/// A tile-drafting board game for 2-4 players.
#[derive(Parser, Debug)]
#[command(name = "tessera", version, about)]
struct Args {
    /// Seed for reproducible tile bags
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Everything one line of input can ask for.
enum Action {
    /// Draft tiles.
    Turn(DraftMove),
    /// Print a player's board (0-based index).
    ShowPlayer(usize),
    /// Return to the menu for one prompt.
    ShowMenu,
    /// Start a new game.
    New,
    /// Load a saved game.
    Load,
    /// Save the current game.
    Save,
    /// Print the credits.
    Credits,
    /// Leave the program.
    Exit,
    /// Anything unparseable; reprompts.
    Unknown,
}

fn main() {
    let args = Args::parse();

    println!("{BANNER}");

    let mut game: Option<GameState> = None;
    let mut in_menu = true;

    loop {
        let action = if in_menu {
            println!("\n{MENU}");
            match read_line("> ") {
                Some(line) => parse_menu_input(&line),
                None => Action::Exit,
            }
        } else if let Some(state) = game.as_ref() {
            print_pre_turn(state);
            match read_line("> ") {
                Some(line) => parse_game_input(&line),
                None => Action::Exit,
            }
        } else {
            Action::ShowMenu
        };

        in_menu = false;

        match action {
            Action::Turn(mv) => {
                if let Some(state) = game.as_mut() {
                    match apply_move(state, &mv) {
                        Ok(TurnOutcome::NextPlayer(_)) => {}
                        Ok(TurnOutcome::RoundEnd) => {
                            println!("\n=== End of round: boards scored, factories refilled ===");
                        }
                        Ok(TurnOutcome::GameOver(result)) => {
                            announce_result(state, result);
                            game = None;
                        }
                        Err(error) => println!("Invalid move: {error}."),
                    }
                }
            }
            Action::ShowPlayer(index) => {
                if let Some(state) = game.as_ref() {
                    if index < state.player_count() {
                        println!("\n{}", render_player(state, PlayerId::new(index as u8)));
                    } else {
                        println!("No such player.");
                    }
                }
            }
            Action::ShowMenu => in_menu = true,
            Action::New => match new_game(args.seed) {
                Some(state) => {
                    println!("Game successfully created.");
                    game = Some(state);
                }
                None => println!("Game not created."),
            },
            Action::Load => match prompt_filename() {
                Some(path) => match load_from_file(&path) {
                    Ok(state) => {
                        println!("Game successfully loaded.");
                        game = Some(state);
                    }
                    // The previous game, if any, is untouched.
                    Err(error) => println!("Error: {error}."),
                },
                None => println!("Error: Invalid filename."),
            },
            Action::Save => {
                if let Some(state) = game.as_ref() {
                    match prompt_filename() {
                        Some(path) => match save_to_file(state, &path) {
                            Ok(()) => println!("Game saved to {path}."),
                            Err(error) => println!("Error: {error}."),
                        },
                        None => println!("Error: Invalid filename."),
                    }
                } else {
                    println!("No game in progress.");
                }
            }
            Action::Credits => println!("\n{CREDITS}"),
            Action::Exit => break,
            Action::Unknown => println!("Invalid option."),
        }

        if game.is_none() {
            in_menu = true;
        }
    }

    println!("\n{CREDITS}");
}

/// Print a prompt and read one line. `None` on EOF (ctrl-d).
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt_filename() -> Option<String> {
    let name = read_line("Enter filename: ")?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn print_pre_turn(state: &GameState) {
    println!("\n{}", render_table(state));
    println!("Current Player");
    println!("{}", render_player(state, state.current_player()));
}

fn announce_result(state: &GameState, result: GameResult) {
    println!("\n=== Game over ===");
    println!("{}", render_scores(state));
    match result {
        GameResult::Winner(id) => println!("{} is the winner!", state.player(id).name()),
        GameResult::Draw => println!("It's a draw!"),
    }
}

fn parse_menu_input(input: &str) -> Action {
    match input {
        "1" => Action::New,
        "2" => Action::Load,
        "3" => Action::Credits,
        "4" => Action::Exit,
        _ => Action::Unknown,
    }
}

fn parse_game_input(input: &str) -> Action {
    let tokens: Vec<&str> = input.split_whitespace().collect();

    if tokens.len() == 3 {
        return parse_turn(&tokens).map_or(Action::Unknown, Action::Turn);
    }

    match tokens.as_slice() {
        ["board" | "b", index] => index
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map_or(Action::Unknown, Action::ShowPlayer),
        ["save" | "s"] => Action::Save,
        ["menu" | "m"] => Action::ShowMenu,
        ["help" | "h" | "?"] => Action::ShowMenu,
        ["credits"] => Action::Credits,
        ["quit" | "q" | "exit" | "x"] => Action::Exit,
        _ => Action::Unknown,
    }
}

/// Parse `<source> <colour> <dest>` into a move.
///
/// Sources: `1`-`9` for factories, `c`/`c1` and `d`/`c2` for centres.
/// Destinations: `1`-`5` for pattern lines, `f` for the floor.
fn parse_turn(tokens: &[&str]) -> Option<DraftMove> {
    let source = parse_source(tokens[0])?;
    let colour = parse_colour(tokens[1])?;
    let target = parse_target(tokens[2])?;
    Some(DraftMove::new(source, target, colour))
}

fn parse_source(token: &str) -> Option<MoveSource> {
    match token.to_ascii_lowercase().as_str() {
        "c" | "c1" => Some(MoveSource::Centre(0)),
        "d" | "c2" => Some(MoveSource::Centre(1)),
        other => {
            let number: usize = other.parse().ok()?;
            (1..=9).contains(&number).then(|| MoveSource::Factory(number - 1))
        }
    }
}

fn parse_colour(token: &str) -> Option<Tile> {
    let mut chars = token.chars();
    let code = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Tile::colour_from_char(code)
}

fn parse_target(token: &str) -> Option<MoveTarget> {
    match token.to_ascii_lowercase().as_str() {
        "f" => Some(MoveTarget::FloorLine),
        other => {
            let number: usize = other.parse().ok()?;
            (1..=5).contains(&number).then(|| MoveTarget::PatternLine(number - 1))
        }
    }
}

/// Interactive new-game setup: player count, names, centre count.
fn new_game(seed: Option<u64>) -> Option<GameState> {
    let count = loop {
        let line = read_line(&format!("How many players? ({MIN_PLAYERS}-{MAX_PLAYERS}): "))?;
        match line.parse::<usize>() {
            Ok(n) if (MIN_PLAYERS..=MAX_PLAYERS).contains(&n) => break n,
            _ => println!("Invalid option."),
        }
    };

    let mut names = Vec::with_capacity(count);
    for index in 1..=count {
        let name = loop {
            let line = read_line(&format!("Enter Player {index} Name: "))?;
            if line.is_empty() {
                println!("Invalid option.");
            } else {
                break line;
            }
        };
        names.push(name);
    }

    let centres = loop {
        let line = read_line("How many table centres? (1-2): ")?;
        match line.parse::<usize>() {
            Ok(n) if (1..=2).contains(&n) => break n,
            _ => println!("Invalid option."),
        }
    };

    let mut builder = GameBuilder::new().player_names(names).centres(centres);
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }

    Some(builder.build())
}
