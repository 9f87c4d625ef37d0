use anyhow::{anyhow, Result};
use clap::Parser;
use log::LevelFilter;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_minimax::{
    config::DEFAULT_DEPTH, Game, GameConfig, ParticipantKind, Player, PlayerConfig, SearchMode,
    WIDTH,
};

mod display;
use display::TerminalObserver;

mod logger;

/// Play Connect 4 against a minimax engine, or watch two engines play
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax engine")]
struct Cli {
    /// Who controls player 1: human or ai (asked for when omitted)
    #[arg(long)]
    p1: Option<ParticipantKind>,

    /// Who controls player 2: human or ai (asked for when omitted)
    #[arg(long)]
    p2: Option<ParticipantKind>,

    /// Search depth of player 1 when ai controlled
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth1: usize,

    /// Search depth of player 2 when ai controlled
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth2: usize,

    /// Which player moves first: 1 or 2
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    start: u8,

    /// Search each root move on its own worker thread
    #[arg(long)]
    parallel: bool,

    /// Log search diagnostics to stderr
    #[arg(long, short)]
    verbose: bool,
}

/// Asks a y/n question until a valid answer is given
fn ask(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            return Err(anyhow!("stdin closed"));
        }
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn player_config(
    stdin: &Stdin,
    player: Player,
    kind: Option<ParticipantKind>,
    depth: usize,
) -> Result<PlayerConfig> {
    let kind = match kind {
        Some(kind) => kind,
        None => {
            if ask(stdin, &format!("Is player {} AI controlled?", player.number()))? {
                ParticipantKind::Computer
            } else {
                ParticipantKind::Human
            }
        }
    };
    Ok(match kind {
        ParticipantKind::Human => PlayerConfig::human(),
        ParticipantKind::Computer => PlayerConfig::computer(depth),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init(if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    })?;

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let config = GameConfig {
        player_one: player_config(&stdin, Player::One, cli.p1, cli.depth1)?,
        player_two: player_config(&stdin, Player::Two, cli.p2, cli.depth2)?,
        starting_player: if cli.start == 2 { Player::Two } else { Player::One },
        search_mode: if cli.parallel {
            SearchMode::RootParallel
        } else {
            SearchMode::Sequential
        },
    };

    let mut game = Game::new(&config, TerminalObserver::default())?;
    game.start()?;

    loop {
        // human turns, computer replies are played inside the game
        while !game.is_over() {
            print!("Player {} move input (1-7, q to quit) > ", game.current_player().number());
            stdout().flush()?;

            let mut input_str = String::new();
            if stdin.read_line(&mut input_str)? == 0 {
                return Ok(());
            }
            let input = input_str.trim();
            if input.eq_ignore_ascii_case("q") {
                println!("Game abandoned");
                return Ok(());
            }

            match input.parse::<usize>() {
                Ok(column @ 1..=WIDTH) => {
                    game.human_move(column - 1)?;
                }
                _ => println!("Invalid number: {}", input),
            }
        }

        if !ask(&stdin, "Play again?")? {
            break;
        }
        game.restart()?;
    }
    Ok(())
}
