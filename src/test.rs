#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};

    use crate::{
        grid::Grid,
        heuristic::{MAX_SCORE, MIN_SCORE},
        player::PlayerId,
        solver::{compute_next_move, Move, Solver},
        HEIGHT, WIDTH,
    };

    const HUMAN: PlayerId = PlayerId::new(0);
    const AI: PlayerId = PlayerId::new(1);

    /// Plain minimax over every branch, sharing the solver's evaluation and
    /// tie-breaking but never pruning
    fn exhaustive(
        grid: &Grid,
        player: PlayerId,
        opponent: PlayerId,
        depth: usize,
        maximizing: bool,
    ) -> Move {
        let (mover, score) = if maximizing {
            (player, grid.score_position(player, true))
        } else {
            (opponent, grid.score_position(opponent, false))
        };
        if depth == 0 || score.abs() == MAX_SCORE {
            return Move { column: None, score };
        }

        let mut best = Move {
            column: None,
            score: if maximizing { MIN_SCORE } else { MAX_SCORE },
        };
        for column in grid.playable_columns() {
            let mut next = grid.clone();
            next.place_chip(column, mover).unwrap();
            let reply = exhaustive(&next, player, opponent, depth - 1, !maximizing);
            let better = if maximizing {
                reply.score > best.score
            } else {
                reply.score < best.score
            };
            if better || best.column.is_none() {
                best = Move {
                    column: Some(column),
                    score: reply.score,
                };
            }
        }
        best
    }

    // a fixed pseudo-random game, so positions are reproducible
    fn scrambled_grid(seed: u64, moves: usize) -> Grid {
        let mut grid = Grid::new(WIDTH, HEIGHT);
        let mut state = seed;
        let mut player = HUMAN;
        for _ in 0..moves {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let playable: Vec<_> = grid.playable_columns().collect();
            let column = playable[(state >> 33) as usize % playable.len()];
            grid.place_chip(column, player).unwrap();
            player = if player == HUMAN { AI } else { HUMAN };
        }
        grid
    }

    #[test]
    pub fn blocks_open_three() -> Result<()> {
        // human on the bottom row in columns 2-4, open at both ends
        let grid = Grid::from_moves(WIDTH, HEIGHT, "27374", HUMAN, AI)?;
        for &depth in [1, 3].iter() {
            let column = compute_next_move(&grid, AI, HUMAN, depth)
                .ok_or(anyhow!("no move at depth {}", depth))?;
            assert!(column == 0 || column == 4, "depth {} chose {}", depth, column);
        }
        Ok(())
    }

    #[test]
    pub fn blocks_single_threat() -> Result<()> {
        let grid = Grid::from_moves(WIDTH, HEIGHT, "17273", HUMAN, AI)?;
        assert_eq!(compute_next_move(&grid, AI, HUMAN, 1), Some(3));
        assert_eq!(compute_next_move(&grid, AI, HUMAN, 3), Some(3));
        Ok(())
    }

    #[test]
    pub fn takes_win_over_block() -> Result<()> {
        // the AI has three stacked in column 7 while the human threatens the
        // bottom row at both ends
        let grid = Grid::from_moves(WIDTH, HEIGHT, "2737472", HUMAN, AI)?;
        for &depth in [2, 3, 4].iter() {
            let mut solver = Solver::new(AI, HUMAN, depth);
            let best = solver.solve(&grid);
            assert_eq!(best.column, Some(6), "depth {}", depth);
            assert_eq!(best.score, MAX_SCORE, "depth {}", depth);
        }
        Ok(())
    }

    #[test]
    pub fn lost_position_still_returns_a_move() -> Result<()> {
        // every move loses to the double threat, the first column is kept
        let grid = Grid::from_moves(WIDTH, HEIGHT, "27374", HUMAN, AI)?;
        let best = Solver::new(AI, HUMAN, 3).solve(&grid);
        assert_eq!(best, Move { column: Some(0), score: MIN_SCORE });
        Ok(())
    }

    #[test]
    pub fn ties_go_to_the_lowest_column() {
        // no opponent chips, so every reply scores zero
        let grid = Grid::new(WIDTH, HEIGHT);
        let best = Solver::new(AI, HUMAN, 1).solve(&grid);
        assert_eq!(best, Move { column: Some(0), score: 0 });
    }

    #[test]
    pub fn empty_grid_opening() {
        let grid = Grid::new(WIDTH, HEIGHT);

        let mut solver = Solver::new(AI, HUMAN, 3);
        let best = solver.solve(&grid);
        assert_eq!(best, Move { column: Some(0), score: -16 });
        assert_eq!(solver.node_count, 147);

        assert_eq!(compute_next_move(&grid, AI, HUMAN, 2), Some(1));
        assert_eq!(compute_next_move(&grid, AI, HUMAN, 4), Some(2));

        // repeated searches agree
        for _ in 0..3 {
            assert_eq!(compute_next_move(&grid, AI, HUMAN, 3), Some(0));
        }
    }

    #[test]
    pub fn pruning_matches_exhaustive_search() {
        for seed in 0..40u64 {
            let grid = scrambled_grid(seed, (seed % 19) as usize);
            let mover = if grid.chip_count() % 2 == 0 { HUMAN } else { AI };
            let opponent = if mover == HUMAN { AI } else { HUMAN };
            if grid.score_position(opponent, true) == MAX_SCORE {
                continue;
            }

            for depth in 1..=3 {
                let mut solver = Solver::new(mover, opponent, depth);
                let pruned = solver.solve(&grid);
                let full = exhaustive(&grid, mover, opponent, depth, true);
                assert_eq!(pruned.column, full.column, "seed {} depth {}\n{}", seed, depth, grid);
            }
        }
    }

    #[test]
    pub fn pruning_saves_work() {
        let grid = Grid::new(WIDTH, HEIGHT);
        let mut solver = Solver::new(AI, HUMAN, 3);
        solver.solve(&grid);

        // 1 + 7 + 49 + 343 positions without pruning
        assert!(solver.node_count < 400);
    }

    #[test]
    pub fn search_leaves_grid_untouched() -> Result<()> {
        let grid = Grid::from_moves(WIDTH, HEIGHT, "4455", HUMAN, AI)?;
        let before = grid.to_string();
        compute_next_move(&grid, HUMAN, AI, 3);
        assert_eq!(grid.to_string(), before);
        assert_eq!(grid.chip_count(), 4);
        Ok(())
    }

    #[test]
    pub fn full_grid_has_no_move() -> Result<()> {
        let grid = Grid::from_moves(4, 4, "1111222233344434", HUMAN, AI)?;
        assert!(grid.is_full());
        assert_eq!(grid.chip_count(), 4 * 4);
        assert_eq!(compute_next_move(&grid, AI, HUMAN, 3), None);
        Ok(())
    }

    #[test]
    pub fn connection_symmetry() -> Result<()> {
        // every chip of a horizontal four sees the same connection
        let grid = Grid::from_moves(WIDTH, HEIGHT, "3343536", HUMAN, AI)?;
        for column in 2..6 {
            let chip = *grid.chip(column, 0).ok_or(anyhow!("empty cell"))?;
            let connections = grid.find_connections(&chip, 4);
            assert_eq!(connections.len(), 1);
            let columns: Vec<_> = connections[0].iter().map(|c| c.column()).collect();
            assert_eq!(columns, vec![2, 3, 4, 5]);

            // and nothing longer
            assert!(grid.find_connections(&chip, 5).is_empty());
        }
        Ok(())
    }
}
