#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that hosts an interactive Maze Explorer session.
//!
//! Stands in for the conversational runtime: after every narrated response it
//! advances the turn machine one step and lets a co-located NPC speak.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use maze_explorer_core::{Actor, CellCoord};
use maze_explorer_session::Session;
use maze_explorer_world::{query, Config, NpcSeed, StartRule};

/// Arguments controlling world generation for the session.
#[derive(Debug, Parser)]
#[command(name = "maze-explorer", about = "Explore a procedurally generated maze")]
struct Args {
    /// Maze width in cells.
    #[arg(long, default_value_t = 10)]
    width: u32,

    /// Maze height in cells.
    #[arg(long, default_value_t = 10)]
    height: u32,

    /// Seed for deterministic world generation.
    #[arg(long, default_value_t = 0x5a7_u64)]
    seed: u64,

    /// Fixed start column; the start is random unless both coordinates are
    /// given.
    #[arg(long)]
    start_x: Option<u32>,

    /// Fixed start row; the start is random unless both coordinates are
    /// given.
    #[arg(long)]
    start_y: Option<u32>,
}

impl Args {
    fn start_rule(&self) -> StartRule {
        match (self.start_x, self.start_y) {
            (Some(x), Some(y)) => StartRule::Fixed(CellCoord::new(x, y)),
            _ => StartRule::Random,
        }
    }
}

/// Entry point for the Maze Explorer command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::new(args.width, args.height, args.start_rule(), args.seed);
    let mut session = Session::new(config, roster())?;

    println!("{}", session.intro_text());
    println!("Commands: move <direction>, look, map, inspect, use, interact, quit");

    let stdin = io::stdin();
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            prompt()?;
            continue;
        }
        if matches!(input, "quit" | "exit") {
            break;
        }

        println!("{}", dispatch(&mut session, input));
        let_npc_speak(&mut session);
        prompt()?;
    }

    Ok(())
}

fn dispatch(session: &mut Session, input: &str) -> String {
    match input {
        "look" | "describe" => session.describe(),
        "map" => session.render_map(),
        "inspect" => session.inspect_item(),
        "use" => session.use_item(),
        "interact" => session.interact_with_activity(),
        _ => {
            let token = input.strip_prefix("move ").unwrap_or(input).trim();
            session.move_player(token)
        }
    }
}

fn let_npc_speak(session: &mut Session) {
    if let Actor::Npc(id) = session.next_actor(Actor::Bot) {
        let name = query::npc(session.world(), id)
            .map(|npc| npc.name().to_owned())
            .unwrap_or_default();
        if let Some(line) = session.npc_line(id) {
            println!("{name}: {line}");
        }
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn roster() -> Vec<NpcSeed> {
    vec![
        NpcSeed::new(
            "Saturn Bot",
            "A patient guide hums beside you, ready to narrate the maze.",
            vec![
                String::from("Saturn's rings are younger than the dinosaurs, you know."),
                String::from("Follow the open paths; every cell connects to the exit."),
            ],
        ),
        NpcSeed::new(
            "Oberon",
            "A legend with a Sagittarius solar sign eyes the walls warily.",
            vec![
                String::from("I have wandered these halls longer than I can say."),
                String::from("The exit lies near the far corner. Take me with you."),
            ],
        ),
    ]
}
