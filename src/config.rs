//! Game configuration

use anyhow::{bail, Result};

use crate::{HEIGHT, MAX_COLUMNS, MAX_COMPUTE_DEPTH, MAX_ROWS, WIDTH, WINNING_LENGTH};

/// Grid dimensions and computer player settings for a session
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameConfig {
    pub column_count: usize,
    pub row_count: usize,
    /// How many moves ahead computer players look
    pub max_depth: usize,
    /// Keep and log the history of played columns
    pub debug: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            column_count: WIDTH,
            row_count: HEIGHT,
            max_depth: MAX_COMPUTE_DEPTH,
            debug: false,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.column_count < WINNING_LENGTH || self.column_count > MAX_COLUMNS {
            bail!(
                "column count must be between {} and {}, got {}",
                WINNING_LENGTH,
                MAX_COLUMNS,
                self.column_count
            );
        }
        if self.row_count < WINNING_LENGTH || self.row_count > MAX_ROWS {
            bail!(
                "row count must be between {} and {}, got {}",
                WINNING_LENGTH,
                MAX_ROWS,
                self.row_count
            );
        }
        if self.max_depth == 0 {
            bail!("search depth must be at least 1");
        }
        Ok(())
    }
}
