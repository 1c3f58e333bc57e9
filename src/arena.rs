//! Self-play between computer players searching to different depths

use anyhow::{anyhow, Result};
use indicatif::*;
use log::info;
use rayon::prelude::*;

use std::sync::mpsc::*;
use std::thread;
use std::time::*;

use crate::{config::GameConfig, grid::Grid, player::PlayerId, solver::Solver, WINNING_LENGTH};

/// Number of chips placed before the computer players take over
pub const OPENING_LENGTH: usize = 2;

const CHAMPION: PlayerId = PlayerId::new(0);
const CHALLENGER: PlayerId = PlayerId::new(1);

/// The result of a single game, from the configured player's point of view
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// Tally of an arena run, from the configured player's point of view
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct ArenaReport {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl ArenaReport {
    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

/// Plays a game between a player searching `config.max_depth` moves ahead and
/// one searching `challenger_depth` moves ahead, starting from `opening`
pub fn play_out(
    config: &GameConfig,
    challenger_depth: usize,
    opening: &[usize],
    champion_first: bool,
) -> Result<Outcome> {
    let mut grid = Grid::new(config.column_count, config.row_count);
    let mut champion = Solver::new(CHAMPION, CHALLENGER, config.max_depth);
    let mut challenger = Solver::new(CHALLENGER, CHAMPION, challenger_depth);

    let mut mover = if champion_first { CHAMPION } else { CHALLENGER };
    let mut opening = opening.iter();

    loop {
        if grid.is_full() {
            return Ok(Outcome::Draw);
        }
        let column = match opening.next() {
            Some(&column) => column,
            None => {
                let solver = if mover == CHAMPION {
                    &mut champion
                } else {
                    &mut challenger
                };
                solver
                    .compute_next_move(&grid)
                    .ok_or_else(|| anyhow!("no move found on a grid with free columns"))?
            }
        };

        let chip = grid.place_chip(column, mover)?;
        if !grid.find_connections(&chip, WINNING_LENGTH).is_empty() {
            return Ok(if mover == CHAMPION {
                Outcome::Win
            } else {
                Outcome::Loss
            });
        }
        mover = if mover == CHAMPION { CHALLENGER } else { CHAMPION };
    }
}

/// Every opening of [`OPENING_LENGTH`] chips on a grid `column_count` wide
pub fn openings(column_count: usize) -> Vec<[usize; OPENING_LENGTH]> {
    (0..column_count)
        .flat_map(|first| (0..column_count).map(move |second| [first, second]))
        .collect()
}

/// Plays every opening twice, once with each side moving first, spread over
/// the rayon thread pool
pub fn run(config: GameConfig, challenger_depth: usize, show_progress: bool) -> Result<ArenaReport> {
    config.validate()?;
    let start = Instant::now();

    let games: Vec<_> = openings(config.column_count)
        .into_iter()
        .flat_map(|opening| vec![(opening, true), (opening, false)])
        .collect();

    let progress = if show_progress {
        ProgressBar::new(games.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {msg} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    enum Message {
        Finished(Result<Outcome>),
        Done,
    }
    let (tx, rx) = channel();

    thread::spawn(move || {
        games.par_iter().for_each_with(tx.clone(), |tx, (opening, champion_first)| {
            let outcome = play_out(&config, challenger_depth, opening, *champion_first);
            // the receiver only hangs up after an error, nothing left to report then
            let _ = tx.send(Message::Finished(outcome));
        });
        let _ = tx.send(Message::Done);
    });

    let mut report = ArenaReport::default();
    loop {
        match rx.recv()? {
            Message::Done => break,
            Message::Finished(outcome) => {
                report.record(outcome?);
                progress.inc(1);
                progress.set_message(&format!(
                    "(+{} ={} -{})",
                    report.wins, report.draws, report.losses
                ));
            }
        }
    }
    progress.finish();

    info!(
        "arena depth {} vs {}: {:?} in {}",
        config.max_depth,
        challenger_depth,
        report,
        HumanDuration(Instant::now() - start)
    );
    Ok(report)
}
