use anyhow::{Context, Result};
use clap::Parser;

use std::io::{stdin, stdout, Write};

use connect4_ai::{
    arena,
    config::GameConfig,
    game::{Game, GameState},
    HEIGHT, MAX_COMPUTE_DEPTH, WIDTH,
};

mod display;

/// Play Connect 4 against the computer, or against another human.
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax opponent")]
struct Cli {
    /// Number of human players: 1 plays the computer, 2 play each other, 0 watches the computer play itself
    #[arg(long, default_value_t = 1)]
    players: usize,

    /// Width of the grid
    #[arg(long, default_value_t = WIDTH)]
    columns: usize,

    /// Height of the grid
    #[arg(long, default_value_t = HEIGHT)]
    rows: usize,

    /// How many moves ahead the computer looks
    #[arg(long, default_value_t = MAX_COMPUTE_DEPTH)]
    depth: usize,

    /// Log the columns played each game (visible with RUST_LOG=debug)
    #[arg(long)]
    debug: bool,

    /// Instead of playing, pit --depth against this depth over every opening
    #[arg(long, value_name = "DEPTH")]
    arena: Option<usize>,
}

/// Reads a line from stdin, `None` once input is closed
fn read_line() -> Result<Option<String>> {
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer))
}

fn ask_yes_no(question: &str) -> Result<bool> {
    loop {
        print!("{} y/n: ", question);
        stdout().flush().context("failed to flush to stdout")?;
        let buffer = match read_line()? {
            Some(buffer) => buffer,
            None => return Ok(false),
        };
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Plays one game to the end, `None` if input was closed midway
fn play_game(game: &mut Game) -> Result<Option<GameState>> {
    game.start_game(None)?;
    let all_computers = game.players().iter().all(|p| p.is_computer());

    loop {
        display::draw(game)?;

        let (name, is_computer) = match game.current_player() {
            Some(player) => (player.name.clone(), player.is_computer()),
            None => return Ok(Some(game.state())),
        };

        let column = if is_computer {
            println!("{} is thinking...", name);
            stdout().flush().context("failed to flush to stdout")?;

            // slow down play if both players are AI
            if all_computers {
                std::thread::sleep(std::time::Duration::from_secs(1));
            }
            let column = game.compute_ai_move()?;
            println!("{} plays column {}", name, column + 1);
            column
        } else {
            print!("{}, move input > ", name);
            stdout().flush().context("failed to flush to stdout")?;
            let input = match read_line()? {
                Some(input) => input,
                None => return Ok(None),
            };
            let column_count = game.grid().column_count();
            match input.trim().parse::<usize>() {
                Ok(column) if column >= 1 && column <= column_count => column - 1,
                Ok(column) => {
                    println!(
                        "Invalid move, column {} out of range. Columns must be between 1 and {}",
                        column, column_count
                    );
                    continue;
                }
                Err(_) => {
                    println!("Invalid number: {}", input.trim());
                    continue;
                }
            }
        };

        if !game.grid().playable(column) {
            println!("Invalid move, column {} full", column + 1);
            continue;
        }

        match game.place_chip(column)? {
            GameState::Playing => {}
            state => {
                display::draw(game)?;
                return Ok(Some(state));
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = GameConfig {
        column_count: cli.columns,
        row_count: cli.rows,
        max_depth: cli.depth,
        debug: cli.debug,
    };
    config.validate().context("invalid configuration")?;

    if let Some(challenger_depth) = cli.arena {
        let report = arena::run(config, challenger_depth, true)?;
        println!(
            "Depth {} against depth {}: {} games, {} won, {} drawn, {} lost",
            config.max_depth,
            challenger_depth,
            report.games,
            report.wins,
            report.draws,
            report.losses
        );
        return Ok(());
    }

    let mut game = Game::new(config)?;
    game.set_players(cli.players)?;

    println!("Welcome to Connect 4\n");

    loop {
        match play_game(&mut game)? {
            Some(GameState::Won(_)) => {
                if let Some(winner) = game.winner() {
                    println!("{} wins!", winner.name);
                }
            }
            Some(_) => println!("Draw!"),
            None => return Ok(()),
        }

        let scores: Vec<String> = game
            .players()
            .iter()
            .map(|p| format!("{} {}", p.name, p.score))
            .collect();
        println!("Score: {}", scores.join(", "));

        if !ask_yes_no("Play again?")? {
            break;
        }
        game.reset_game();
    }
    Ok(())
}
