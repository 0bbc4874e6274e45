//! Interactive play loop.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Args;
use geocoin::{CellId, Direction, GameConfig, GameRng, GameSession};

use crate::store::JsonFileStore;
use crate::view::ConsoleView;

/// Arguments for the `play` command.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Seed for world generation (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Run the interactive loop until the player quits.
pub fn run(data_dir: &Path, args: &PlayArgs) -> Result<(), Box<dyn Error>> {
    let store = JsonFileStore::open(super::save_path(data_dir))?;
    let rng = match args.seed {
        Some(seed) => GameRng::from_seed_u64(seed),
        None => GameRng::from_entropy(),
    };

    let mut view = ConsoleView::new();
    view.quiet = true; // don't narrate the initial window
    let mut session = GameSession::new(GameConfig::default(), view, Box::new(store), rng)?;
    session.view_mut().quiet = false;

    println!(
        "geocoin: n/s/e/w move, look, collect <i,j>, deposit <i,j>, geo, fix <lat> <lng>, reset, quit"
    );
    print_status(&session);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match dispatch(&mut session, line.trim())? {
            Outcome::Continue => print_status(&session),
            Outcome::Quit => break,
        }
    }

    Ok(())
}

enum Outcome {
    Continue,
    Quit,
}

fn dispatch(
    session: &mut GameSession<ConsoleView>,
    line: &str,
) -> Result<Outcome, Box<dyn Error>> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "n" | "north" => session.move_by(Direction::North)?,
        "s" | "south" => session.move_by(Direction::South)?,
        "e" | "east" => session.move_by(Direction::East)?,
        "w" | "west" => session.move_by(Direction::West)?,
        "look" => print_caches(session),
        "collect" => match parse_cell(rest) {
            Some(cell) => {
                let moved = session.collect(cell);
                println!("collected {moved} coin(s) from {cell}");
            }
            None => println!("usage: collect <i,j>"),
        },
        "deposit" => match parse_cell(rest) {
            Some(cell) => {
                let moved = session.deposit(cell);
                println!("deposited {moved} coin(s) into {cell}");
            }
            None => println!("usage: deposit <i,j>"),
        },
        "geo" => {
            let watching = session.toggle_geolocation();
            println!(
                "geolocation following {}",
                if watching { "on" } else { "off" }
            );
        }
        "fix" => match parse_fix(rest) {
            Some((lat, lng)) => {
                if !session.geolocation_update(lat, lng)? {
                    println!("geolocation is off (toggle with `geo`)");
                }
            }
            None => println!("usage: fix <lat> <lng>"),
        },
        "reset" => {
            if confirm("Erase all saved progress?")? {
                session.reset()?;
                println!("game reset");
            }
        }
        "q" | "quit" | "exit" => return Ok(Outcome::Quit),
        other => println!("unknown command: {other}"),
    }

    Ok(Outcome::Continue)
}

fn parse_cell(raw: &str) -> Option<CellId> {
    raw.parse::<CellId>().ok()
}

fn parse_fix(raw: &str) -> Option<(f64, f64)> {
    let mut parts = raw.split_whitespace();
    let lat = parts.next()?.parse().ok()?;
    let lng = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((lat, lng))
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn print_status(session: &GameSession<ConsoleView>) {
    println!(
        "at {} | coins: {} | caches in view: {}",
        session.position(),
        session.collected_coins(),
        session.visible_caches().len()
    );
}

fn print_caches(session: &GameSession<ConsoleView>) {
    let caches = session.visible_caches();
    if caches.is_empty() {
        println!("no caches in view");
        return;
    }
    for cache in caches {
        println!("  {} at {}: {} coin(s)", cache.cell, cache.position, cache.coins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3,-4"), Some(CellId::new(3, -4)));
        assert_eq!(parse_cell("nonsense"), None);
        assert_eq!(parse_cell(""), None);
    }

    #[test]
    fn test_parse_fix() {
        assert_eq!(parse_fix("36.9 -122.1"), Some((36.9, -122.1)));
        assert_eq!(parse_fix("36.9"), None);
        assert_eq!(parse_fix("a b"), None);
        assert_eq!(parse_fix("1 2 3"), None);
    }
}
