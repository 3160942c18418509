//! Board state.
//!
//! A fixed 5x7 grid. Row 0 is the bottom row where tokens settle; every
//! column fills upward without gaps.

/// Number of rows.
pub const ROWS: usize = 5;

/// Number of columns.
pub const COLS: usize = 7;

/// Consecutive tokens needed to win.
pub const WIN_LENGTH: usize = 4;

/// Walk directions, one pair per axis: horizontal, vertical, rising, falling.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Cell occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Opponent,
}

impl Cell {
    /// Marker used when the grid is sent to clients.
    pub fn symbol(&self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Player => 'X',
            Self::Opponent => 'O',
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Move errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is outside the board")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// 5x7 game board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get cell at position, `None` when out of bounds.
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Smallest empty row index in `column`.
    pub fn lowest_open_row(&self, column: usize) -> Result<usize, MoveError> {
        if column >= COLS {
            return Err(MoveError::InvalidColumn(column));
        }

        (0..ROWS)
            .find(|&row| self.cells[row][column].is_empty())
            .ok_or(MoveError::ColumnFull(column))
    }

    /// Set a cell.
    ///
    /// `row` must come from [`Board::lowest_open_row`] for the same column;
    /// gravity is only checked in debug builds.
    pub fn place(&mut self, row: usize, column: usize, token: Cell) {
        debug_assert!(
            self.lowest_open_row(column) == Ok(row),
            "placement at ({}, {}) breaks gravity",
            row,
            column
        );
        self.cells[row][column] = token;
    }

    /// Number of tokens stacked in a column.
    pub fn column_height(&self, column: usize) -> usize {
        match self.lowest_open_row(column) {
            Ok(row) => row,
            Err(MoveError::ColumnFull(_)) => ROWS,
            Err(MoveError::InvalidColumn(_)) => 0,
        }
    }

    /// Columns that still have an open row, in ascending order.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..COLS)
            .filter(|&column| self.lowest_open_row(column).is_ok())
            .collect()
    }

    /// Count occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Check if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Check whether the token just placed at (row, column) completes a line.
    ///
    /// Only looks at lines through the given cell, so it must be called right
    /// after the placement it is checking.
    pub fn detect_win(&self, row: usize, column: usize, token: Cell) -> bool {
        if token.is_empty() || self.get(row, column) != Some(token) {
            return false;
        }

        AXES.iter().any(|&(dr, dc)| {
            let count = 1
                + self.run_length(row, column, dr, dc, token)
                + self.run_length(row, column, -dr, -dc, token);
            count >= WIN_LENGTH
        })
    }

    /// Count matching cells walking away from (row, column), excluding it.
    fn run_length(&self, row: usize, column: usize, dr: isize, dc: isize, token: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = column as isize + dc;

        while r >= 0 && c >= 0 && self.get(r as usize, c as usize) == Some(token) {
            count += 1;
            r += dr;
            c += dc;
        }

        count
    }

    /// Grid as rows of cells, bottom row first.
    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    /// Grid as rows of single-character strings.
    pub fn to_json(&self) -> serde_json::Value {
        let rows: Vec<serde_json::Value> = self
            .cells
            .iter()
            .map(|row| {
                let cells: Vec<serde_json::Value> = row
                    .iter()
                    .map(|c| serde_json::json!(c.symbol().to_string()))
                    .collect();
                serde_json::Value::Array(cells)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}
