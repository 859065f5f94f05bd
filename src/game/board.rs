use super::player::Seat;

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;

/// Number of same-owner cells in a line needed to win.
pub const CONNECT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Seat),
}

impl Cell {
    /// The seat owning this cell, if any.
    pub fn owner(self) -> Option<Seat> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(seat) => Some(seat),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// A 6x7 Connect Four grid. Row 0 is the bottom row, column 0 the leftmost.
///
/// `Board` is `Copy`, so every board handed out by the engine is an
/// independent snapshot of its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLUMNS]; ROWS],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLUMNS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Seat owning the cell at `(row, col)`, `None` when empty.
    pub fn owner(&self, row: usize, col: usize) -> Option<Seat> {
        self.get(row, col).owner()
    }

    /// Number of tokens stacked in a column.
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS)
            .take_while(|&row| !self.cells[row][col].is_empty())
            .count()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLUMNS {
            return true;
        }
        !self.cells[ROWS - 1][col].is_empty()
    }

    /// Columns that can still take a token, left to right.
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..COLUMNS)
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Drop a token in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, seat: Seat) -> Result<usize, MoveError> {
        if col >= COLUMNS {
            return Err(MoveError::InvalidColumn);
        }

        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        let row = self.column_height(col);
        self.cells[row][col] = Cell::Occupied(seat);
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLUMNS).all(|col| self.is_column_full(col))
    }

    /// Check if the token at (row, col) is part of a run of at least four.
    pub fn check_win(&self, row: usize, col: usize) -> bool {
        if self.get(row, col).is_empty() {
            return false;
        }

        self.check_vertical(row, col)
            || self.check_horizontal(row, col)
            || self.check_diagonal_up(row, col)
            || self.check_diagonal_down(row, col)
    }

    fn check_vertical(&self, row: usize, col: usize) -> bool {
        self.run_length(row, col, (1, 0)) >= CONNECT
    }

    fn check_horizontal(&self, row: usize, col: usize) -> bool {
        self.run_length(row, col, (0, 1)) >= CONNECT
    }

    /// Bottom-left to top-right, /
    fn check_diagonal_up(&self, row: usize, col: usize) -> bool {
        self.run_length(row, col, (1, 1)) >= CONNECT
    }

    /// Top-left to bottom-right, \
    fn check_diagonal_down(&self, row: usize, col: usize) -> bool {
        self.run_length(row, col, (1, -1)) >= CONNECT
    }

    /// Length of the contiguous run through (row, col) along `step`,
    /// scanning both ways until an edge or a cell with another owner.
    fn run_length(&self, row: usize, col: usize, step: (isize, isize)) -> usize {
        let cell = self.get(row, col);
        let (dr, dc) = step;
        let mut count = 1;

        for sign in [1, -1] {
            let mut r = row as isize + dr * sign;
            let mut c = col as isize + dc * sign;
            while (0..ROWS as isize).contains(&r)
                && (0..COLUMNS as isize).contains(&c)
                && self.cells[r as usize][c as usize] == cell
            {
                count += 1;
                r += dr * sign;
                c += dc * sign;
            }
        }

        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
