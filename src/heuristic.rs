//! Position scoring used by the search

use crate::{
    grid::{Chip, Grid, AXES},
    player::PlayerId,
    WINNING_LENGTH,
};

/// The score of a position won by the maximizing player
pub const MAX_SCORE: i32 = i32::MAX;
/// The score of a position won by the minimizing player
pub const MIN_SCORE: i32 = -MAX_SCORE;

/// Shortest potential connection an empty cell is credited for
const POTENTIAL_LENGTH: usize = 2;

impl Grid {
    /// Scores the grid from the point of view of `current_player`
    ///
    /// Returns [`MAX_SCORE`] or [`MIN_SCORE`] as soon as a connection of four
    /// owned by `current_player` is found, depending on whether they are the
    /// maximizing player. Otherwise every empty cell is treated as if
    /// `current_player` had dropped a chip there, and each connection of two or
    /// more it would join adds its squared length. The sum is negated for the
    /// minimizing player.
    pub fn score_position(&self, current_player: PlayerId, maximizing: bool) -> i32 {
        let mut score = 0;

        for column in 0..self.column_count() {
            for row in 0..self.row_count() {
                match self.chip(column, row) {
                    Some(chip) if chip.player() == current_player => {
                        if self.has_connection(chip, WINNING_LENGTH) {
                            return if maximizing { MAX_SCORE } else { MIN_SCORE };
                        }
                    }
                    Some(_) => {}
                    None => {
                        let potential = self.potential(&Chip::probe(current_player, column, row));
                        score += if maximizing { potential } else { -potential };
                    }
                }
            }
        }
        score
    }

    fn has_connection(&self, anchor: &Chip, minimum_length: usize) -> bool {
        AXES.iter()
            .any(|&axis| self.connection_length(anchor, axis) >= minimum_length)
    }

    // sum of squared lengths of the connections a chip at `probe` would join
    fn potential(&self, probe: &Chip) -> i32 {
        AXES.iter()
            .map(|&axis| self.connection_length(probe, axis))
            .filter(|&length| length >= POTENTIAL_LENGTH)
            .map(|length| (length * length) as i32)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HEIGHT, WIDTH};

    const P1: PlayerId = PlayerId::new(0);
    const P2: PlayerId = PlayerId::new(1);

    #[test]
    fn empty_grid_scores_zero() {
        let grid = Grid::new(WIDTH, HEIGHT);
        assert_eq!(grid.score_position(P1, true), 0);
        assert_eq!(grid.score_position(P2, false), 0);
    }

    #[test]
    fn single_chip_potential() {
        let mut grid = Grid::new(WIDTH, HEIGHT);
        grid.place_chip(0, P1).unwrap();

        // neighbours of (0,0): above, right and diagonally up-right, each
        // joining a connection of two
        assert_eq!(grid.score_position(P1, true), 12);
        assert_eq!(grid.score_position(P1, false), -12);
        // the opponent has nothing to connect to
        assert_eq!(grid.score_position(P2, true), 0);
    }

    #[test]
    fn potential_rewards_longer_connections() {
        let mut grid = Grid::new(WIDTH, HEIGHT);
        grid.place_chip(0, P1).unwrap();
        grid.place_chip(1, P1).unwrap();
        let pair = grid.score_position(P1, true);

        grid.place_chip(2, P1).unwrap();
        let triple = grid.score_position(P1, true);
        assert!(triple > pair);
    }

    #[test]
    fn win_is_exactly_the_sentinel() {
        for moves in ["1213141", "1122334", "12332444374", "76556444514"].iter() {
            let grid = Grid::from_moves(WIDTH, HEIGHT, moves, P1, P2).unwrap();
            assert_eq!(grid.score_position(P1, true), MAX_SCORE, "{}", moves);
            assert_eq!(grid.score_position(P1, false), MIN_SCORE, "{}", moves);
            assert_ne!(grid.score_position(P2, true).abs(), MAX_SCORE, "{}", moves);
        }
    }

    #[test]
    fn reset_scores_like_a_new_grid() {
        let mut grid = Grid::from_moves(WIDTH, HEIGHT, "4453", P1, P2).unwrap();
        grid.reset();
        for &column in [3, 3, 4, 2, 5].iter() {
            grid.place_chip(column, P1).unwrap();
        }

        let mut fresh = Grid::new(WIDTH, HEIGHT);
        for &column in [3, 3, 4, 2, 5].iter() {
            fresh.place_chip(column, P1).unwrap();
        }
        assert_eq!(grid.score_position(P1, true), fresh.score_position(P1, true));
        assert_eq!(grid.score_position(P2, false), fresh.score_position(P2, false));
    }
}
