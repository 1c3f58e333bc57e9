use anyhow::{anyhow, Result};

use std::fmt;

use crate::{player::PlayerId, MAX_COLUMNS, MAX_ROWS};

/// A chip dropped into the grid by a player
///
/// Location and owner are fixed once placed; only the `winning` flag changes,
/// after a game has been decided.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Chip {
    player: PlayerId,
    column: usize,
    row: usize,
    winning: bool,
}

impl Chip {
    /// A virtual chip standing in an empty cell, used to probe the connections
    /// `player` could make there
    pub fn probe(player: PlayerId, column: usize, row: usize) -> Self {
        Self {
            player,
            column,
            row,
            winning: false,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Whether this chip is part of a connection that won the game
    pub fn is_winning(&self) -> bool {
        self.winning
    }
}

/// One column of the grid, filled bottom to top
#[derive(Copy, Clone, Debug)]
struct Column {
    chips: [Option<Chip>; MAX_ROWS],
    len: usize,
}

impl Column {
    const EMPTY: Column = Column {
        chips: [None; MAX_ROWS],
        len: 0,
    };

    #[inline]
    fn get(&self, row: usize) -> Option<&Chip> {
        self.chips.get(row).and_then(Option::as_ref)
    }

    fn clear(&mut self) {
        self.chips = [None; MAX_ROWS];
        self.len = 0;
    }
}

/// A unit step across the grid, `dx` in columns and `dy` in rows
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Direction {
    pub dx: isize,
    pub dy: isize,
}

impl Direction {
    pub const fn reverse(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

/// The four axes a connection can run along: vertical, horizontal and both
/// diagonals. Each is walked both ways, so only one direction per axis is listed.
pub const AXES: [Direction; 4] = [
    Direction { dx: 0, dy: 1 },
    Direction { dx: 1, dy: 0 },
    Direction { dx: 1, dy: 1 },
    Direction { dx: 1, dy: -1 },
];

/// Contiguous same-owner chips along one axis, ordered by position on the axis
pub type Connection = Vec<Chip>;

/// The game grid
///
/// Columns are stored inline with a fixed capacity of [`MAX_ROWS`] so cloning
/// a grid for search is a single allocation and a plain copy.
#[derive(Clone, Debug)]
pub struct Grid {
    column_count: usize,
    row_count: usize,
    columns: Vec<Column>,
    // (column, row) of the most recently placed chip
    last_placed: Option<(usize, usize)>,
}

impl Grid {
    /// Creates an empty grid
    ///
    /// # Panics
    /// If either dimension is zero or exceeds [`MAX_COLUMNS`]/[`MAX_ROWS`]
    pub fn new(column_count: usize, row_count: usize) -> Self {
        assert!(column_count > 0 && column_count <= MAX_COLUMNS);
        assert!(row_count > 0 && row_count <= MAX_ROWS);

        Self {
            column_count,
            row_count,
            columns: vec![Column::EMPTY; column_count],
            last_placed: None,
        }
    }

    /// Replays a string of 1-indexed column digits, alternating between
    /// `first` and `second`
    pub fn from_moves<S: AsRef<str>>(
        column_count: usize,
        row_count: usize,
        moves: S,
        first: PlayerId,
        second: PlayerId,
    ) -> Result<Self> {
        let mut grid = Self::new(column_count, row_count);
        let mut player = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 && column <= column_count => {
                    grid.place_chip(column - 1, player)?;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
            player = if player == first { second } else { first };
        }
        Ok(grid)
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns true if every column is filled to the top
    pub fn is_full(&self) -> bool {
        self.columns.iter().all(|column| column.len == self.row_count)
    }

    /// The total number of chips currently placed
    pub fn chip_count(&self) -> usize {
        self.columns.iter().map(|column| column.len).sum()
    }

    /// Returns the row the next chip dropped into `column` would land in, or
    /// `None` if the column is full
    ///
    /// # Panics
    /// If `column` is out of range
    pub fn next_available_row(&self, column: usize) -> Option<usize> {
        let next_row = self.columns[column].len;
        if next_row < self.row_count {
            Some(next_row)
        } else {
            None
        }
    }

    pub fn playable(&self, column: usize) -> bool {
        self.columns[column].len < self.row_count
    }

    /// Emits the column indices where moves are legal, in ascending order
    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.column_count).filter(move |&column| self.playable(column))
    }

    /// The chip at the given cell, if any
    pub fn chip(&self, column: usize, row: usize) -> Option<&Chip> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    pub fn last_placed_chip(&self) -> Option<&Chip> {
        self.last_placed
            .and_then(|(column, row)| self.chip(column, row))
    }

    /// Drops a chip for `player` into `column`, returning the placed chip
    pub fn place_chip(&mut self, column: usize, player: PlayerId) -> Result<Chip> {
        if column >= self.column_count {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 0 and {}",
                column,
                self.column_count - 1
            ));
        }
        if !self.playable(column) {
            return Err(anyhow!("Invalid move, column {} full", column));
        }
        Ok(self.drop_chip(column, player))
    }

    /// Drops a chip without checking the column has room, callers must have
    /// checked [`Grid::playable`]
    pub(crate) fn drop_chip(&mut self, column: usize, player: PlayerId) -> Chip {
        let slot = &mut self.columns[column];
        debug_assert!(slot.len < self.row_count);

        let chip = Chip {
            player,
            column,
            row: slot.len,
            winning: false,
        };
        slot.chips[slot.len] = Some(chip);
        slot.len += 1;
        self.last_placed = Some((column, chip.row));
        chip
    }

    /// Removes every chip, keeping the dimensions
    pub fn reset(&mut self) {
        for column in self.columns.iter_mut() {
            column.clear();
        }
        self.last_placed = None;
    }

    /// Flags the placed chips at the positions of `chips` as winning
    pub fn mark_winning(&mut self, chips: &[Chip]) {
        for chip in chips {
            if let Some(Some(placed)) = self
                .columns
                .get_mut(chip.column)
                .and_then(|column| column.chips.get_mut(chip.row))
            {
                placed.winning = true;
            }
        }
    }

    /// Walks from `anchor` in `direction`, yielding the chips owned by the
    /// anchor's player until the edge of the grid, an empty cell or an
    /// opponent's chip is reached. The anchor itself is not yielded.
    pub fn find_run(&self, anchor: &Chip, direction: Direction) -> Run<'_> {
        Run {
            grid: self,
            player: anchor.player,
            column: anchor.column as isize,
            row: anchor.row as isize,
            direction,
        }
    }

    /// Length of the connection through `anchor` along `axis`, anchor included
    #[inline]
    pub(crate) fn connection_length(&self, anchor: &Chip, axis: Direction) -> usize {
        1 + self.find_run(anchor, axis).count() + self.find_run(anchor, axis.reverse()).count()
    }

    /// Finds the connections through `anchor` at least `minimum_length` long,
    /// at most one per axis
    ///
    /// `anchor` may be a placed chip or a [`Chip::probe`] in an empty cell.
    pub fn find_connections(&self, anchor: &Chip, minimum_length: usize) -> Vec<Connection> {
        let mut connections = Vec::new();
        for &axis in AXES.iter() {
            // count first so that short connections never allocate
            if self.connection_length(anchor, axis) < minimum_length {
                continue;
            }
            let mut connection: Connection = self.find_run(anchor, axis.reverse()).collect();
            connection.reverse();
            connection.push(*anchor);
            connection.extend(self.find_run(anchor, axis));
            connections.push(connection);
        }
        connections
    }
}

/// Iterator over a run of same-owner chips, see [`Grid::find_run`]
pub struct Run<'a> {
    grid: &'a Grid,
    player: PlayerId,
    column: isize,
    row: isize,
    direction: Direction,
}

impl<'a> Iterator for Run<'a> {
    type Item = Chip;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let column = self.column + self.direction.dx;
        let row = self.row + self.direction.dy;
        if column < 0 || column >= self.grid.column_count as isize || row < 0 {
            return None;
        }
        let chip = self.grid.columns[column as usize].get(row as usize)?;
        if chip.player != self.player {
            return None;
        }
        self.column = column;
        self.row = row;
        Some(*chip)
    }
}

impl fmt::Display for Grid {
    // top row first so the grid reads the way it is played
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.row_count).rev() {
            for column in 0..self.column_count {
                let symbol = match self.chip(column, row) {
                    None => '.',
                    Some(chip) => match chip.player.index() {
                        0 => 'X',
                        1 => 'O',
                        _ => '?',
                    },
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
