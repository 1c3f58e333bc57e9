//! A session of successive games between two players

use anyhow::{anyhow, bail, Result};
use log::{debug, info};

use crate::{
    config::GameConfig,
    grid::Grid,
    player::{Player, PlayerColor, PlayerId},
    solver::Solver,
    WINNING_LENGTH,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(PlayerId),
    Draw,
}

/// The state of a session. The same `Game` is reused for successive games;
/// player scores carry over until the players are replaced.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    players: Vec<Player>,
    // `None` when no game is in progress
    current: Option<PlayerId>,
    winner: Option<PlayerId>,
    state: GameState,
    column_history: Vec<usize>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            grid: Grid::new(config.column_count, config.row_count),
            players: Vec::new(),
            current: None,
            winner: None,
            state: GameState::Playing,
            column_history: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current.and_then(|id| self.player(id))
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn in_progress(&self) -> bool {
        self.current.is_some()
    }

    /// Columns played this game, only recorded in debug mode
    pub fn column_history(&self) -> &[usize] {
        &self.column_history
    }

    /// Chooses who is playing: one human against the computer, two humans,
    /// or, with no humans, the computer against itself
    ///
    /// The current players are kept, scores included, unless the number of
    /// humans changes.
    pub fn set_players(&mut self, human_count: usize) -> Result<()> {
        let current_humans = self.players.iter().filter(|p| !p.is_computer()).count();
        if !self.players.is_empty() && current_humans == human_count {
            return Ok(());
        }

        let depth = self.config.max_depth;
        let (first, second) = (PlayerId::new(0), PlayerId::new(1));
        self.players = match human_count {
            0 => vec![
                Player::computer(first, "AI 1", PlayerColor::Red, depth),
                Player::computer(second, "AI 2", PlayerColor::Yellow, depth),
            ],
            1 => vec![
                Player::human(first, "Human", PlayerColor::Red),
                Player::computer(second, "Mr. AI", PlayerColor::Black, depth),
            ],
            2 => vec![
                Player::human(first, "Human 1", PlayerColor::Red),
                Player::human(second, "Human 2", PlayerColor::Blue),
            ],
            _ => bail!("a game has at most 2 human players, got {}", human_count),
        };
        Ok(())
    }

    /// The player that isn't `player`
    pub fn other_player(&self, player: PlayerId) -> Result<PlayerId> {
        match self.players.as_slice() {
            [first, second] => Ok(if player == first.id() {
                second.id()
            } else {
                first.id()
            }),
            _ => Err(anyhow!("players have not been chosen")),
        }
    }

    /// Starts a game, with the first player moving first unless another is given
    pub fn start_game(&mut self, starting_player: Option<PlayerId>) -> Result<()> {
        if self.players.len() != 2 {
            bail!("players have not been chosen");
        }
        let starting_player = starting_player.unwrap_or_else(|| self.players[0].id());
        if self.player(starting_player).is_none() {
            bail!("player {} is not part of this game", starting_player);
        }
        self.current = Some(starting_player);
        self.winner = None;
        self.state = GameState::Playing;

        info!(
            "game started on a {}x{} grid, {} moves first",
            self.grid.column_count(),
            self.grid.row_count(),
            starting_player
        );
        Ok(())
    }

    /// Drops the current player's chip into `column`, then checks for a win
    /// or a full grid before passing the turn on
    pub fn place_chip(&mut self, column: usize) -> Result<GameState> {
        let player = self
            .current
            .ok_or_else(|| anyhow!("no game is in progress"))?;
        self.grid.place_chip(column, player)?;

        if self.config.debug {
            self.column_history.push(column);
            debug!("column history: {:?}", self.column_history);
        }

        if self.check_for_win() {
            self.state = GameState::Won(player);
            self.winner = Some(player);
            self.end_game();
        } else if self.grid.is_full() {
            self.state = GameState::Draw;
            self.end_game();
        } else {
            self.current = Some(self.other_player(player)?);
        }
        Ok(self.state)
    }

    /// Asks the current player, which must be a computer, for its next column
    pub fn compute_ai_move(&self) -> Result<usize> {
        let player = self
            .current_player()
            .ok_or_else(|| anyhow!("no game is in progress"))?;
        let max_depth = player
            .max_depth()
            .ok_or_else(|| anyhow!("{} is not a computer player", player.name))?;

        let mut solver = Solver::new(player.id(), self.other_player(player.id())?, max_depth);
        solver
            .compute_next_move(&self.grid)
            .ok_or_else(|| anyhow!("no legal move left for {}", player.name))
    }

    // marks four chips of every connection through the last placed chip
    fn check_for_win(&mut self) -> bool {
        let anchor = match self.grid.last_placed_chip() {
            Some(chip) => *chip,
            None => return false,
        };
        let connections = self.grid.find_connections(&anchor, WINNING_LENGTH);
        for connection in connections.iter() {
            // only four are needed to win, take the first four that include
            // the chip just placed
            let anchor_index = connection
                .iter()
                .position(|chip| chip.column() == anchor.column() && chip.row() == anchor.row())
                .unwrap_or(0);
            let start = anchor_index.saturating_sub(WINNING_LENGTH - 1);
            self.grid
                .mark_winning(&connection[start..start + WINNING_LENGTH]);
        }
        !connections.is_empty()
    }

    /// Ends the game without clearing the grid, crediting the winner if any
    pub fn end_game(&mut self) {
        if let Some(winner) = self.winner {
            if let Some(player) = self.players.iter_mut().find(|p| p.id() == winner) {
                player.score += 1;
                info!("game over, {} wins ({} total)", player.name, player.score);
            }
        } else {
            info!("game over, draw");
        }
        self.current = None;
        self.column_history.clear();
    }

    /// Clears the grid and the winner, ready for the next game
    pub fn reset_game(&mut self) {
        self.winner = None;
        self.state = GameState::Playing;
        self.grid.reset();
    }
}
