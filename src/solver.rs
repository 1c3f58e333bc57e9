//! An agent to choose moves in Connect 4 by looking a fixed number of moves ahead

use log::debug;

use crate::{
    grid::Grid,
    heuristic::{MAX_SCORE, MIN_SCORE},
    player::PlayerId,
};

/// A candidate move: the column to play and the score the search expects it
/// to lead to
///
/// `column` is `None` for positions the search did not expand, i.e. leaves
/// and decided positions.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub column: Option<usize>,
    pub score: i32,
}

/// A minimax agent playing as `player` against `opponent`
///
/// # Notes
/// The search alternates between the agent's own moves, which maximize the
/// heuristic score, and the opponent's replies, which minimize it. Every
/// explored branch works on its own clone of the grid, so the grid passed in
/// is never modified.
///
/// Columns are tried left to right and a later column only replaces the
/// current best when it is strictly better, so among equally scored moves the
/// leftmost one is played.
#[derive(Clone, Debug)]
pub struct Solver {
    player: PlayerId,
    opponent: PlayerId,
    max_depth: usize,

    /// The number of positions evaluated by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    pub fn new(player: PlayerId, opponent: PlayerId, max_depth: usize) -> Self {
        Self {
            player,
            opponent,
            max_depth,
            node_count: 0,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Chooses the agent's move, maximizing the score
    pub fn maximize(&mut self, grid: &Grid, depth: usize, mut alpha: i32, beta: i32) -> Move {
        self.node_count += 1;

        let score = grid.score_position(self.player, true);
        if depth == 0 || score.abs() == MAX_SCORE {
            return Move {
                column: None,
                score,
            };
        }

        let mut best = Move {
            column: None,
            score: MIN_SCORE,
        };
        for column in 0..grid.column_count() {
            if !grid.playable(column) {
                continue;
            }
            let mut next = grid.clone();
            next.drop_chip(column, self.player);

            let reply = self.minimize(&next, depth - 1, alpha, beta);
            // the first legal move is kept even when it is no better than a
            // certain loss, so a column is always returned
            if reply.score > best.score || best.column.is_none() {
                best = Move {
                    column: Some(column),
                    score: reply.score,
                };
                alpha = reply.score;
            }
            // the opponent already has a better option elsewhere
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Chooses the opponent's reply, minimizing the score
    pub fn minimize(&mut self, grid: &Grid, depth: usize, alpha: i32, mut beta: i32) -> Move {
        self.node_count += 1;

        let score = grid.score_position(self.opponent, false);
        if depth == 0 || score.abs() == MAX_SCORE {
            return Move {
                column: None,
                score,
            };
        }

        let mut best = Move {
            column: None,
            score: MAX_SCORE,
        };
        for column in 0..grid.column_count() {
            if !grid.playable(column) {
                continue;
            }
            let mut next = grid.clone();
            next.drop_chip(column, self.opponent);

            let reply = self.maximize(&next, depth - 1, alpha, beta);
            if reply.score < best.score || best.column.is_none() {
                best = Move {
                    column: Some(column),
                    score: reply.score,
                };
                beta = reply.score;
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Searches `max_depth` moves ahead and returns the best move with its score
    pub fn solve(&mut self, grid: &Grid) -> Move {
        let best = self.maximize(grid, self.max_depth, MIN_SCORE, MAX_SCORE);
        debug!(
            "search depth {}: column {:?}, score {}, {} positions",
            self.max_depth, best.column, best.score, self.node_count
        );
        best
    }

    /// The column the agent should play next
    ///
    /// Returns `None` only if there is no legal move, or if the agent has
    /// already won on `grid`.
    pub fn compute_next_move(&mut self, grid: &Grid) -> Option<usize> {
        self.solve(grid).column
    }
}

/// Computes the column `player` should play next against `opponent`,
/// looking `max_depth` moves ahead
pub fn compute_next_move(
    grid: &Grid,
    player: PlayerId,
    opponent: PlayerId,
    max_depth: usize,
) -> Option<usize> {
    Solver::new(player, opponent, max_depth).compute_next_move(grid)
}
