use std::fmt;

use arrayvec::ArrayVec;

use crate::{
    PlaceError,
    core::mark::{Mark, Outcome},
};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Index of the center cell.
pub const CENTER: usize = 4;

/// Indices of the four corner cells.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Indices of the four side (edge) cells.
pub const SIDES: [usize; 4] = [1, 3, 5, 7];

/// The 8 winning lines as cell index triples.
///
/// Order is fixed: rows top to bottom, columns left to right, then the main and
/// anti diagonal. [`Board::winner`] scans in this order.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The 3×3 Triqui board.
///
/// Cells are indexed 0–8 in row-major order:
///
/// ```text
///  0 | 1 | 2
/// ---+---+---
///  3 | 4 | 5
/// ---+---+---
///  6 | 7 | 8
/// ```
///
/// The board is a plain value (`Copy`), so look-ahead simulations work on a copy and
/// never touch the board the game is played on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    /// Board with every cell empty.
    pub const EMPTY: Self = Self {
        cells: [Mark::Empty; CELL_COUNT],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a board with the given cell contents.
    ///
    /// No consistency check is done on the mark counts; this is meant for setting up
    /// positions in tests and tools.
    #[must_use]
    pub const fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }

    #[must_use]
    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    /// Returns the content of the cell at `index`, or `None` if out of range.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// Returns the empty cell indices in ascending order.
    #[must_use]
    pub fn legal_moves(&self) -> ArrayVec<usize, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| mark.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Places `mark` at `index`.
    ///
    /// Fails without touching the board if the index is out of range, the cell is
    /// already occupied or `mark` is [`Mark::Empty`].
    pub fn place(&mut self, mark: Mark, index: usize) -> Result<(), PlaceError> {
        if mark.is_empty() {
            return Err(PlaceError::EmptyMark);
        }
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(PlaceError::OutOfRange { index })?;
        if !cell.is_empty() {
            return Err(PlaceError::Occupied { index });
        }
        *cell = mark;
        Ok(())
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    pub fn with_placed(&self, mark: Mark, index: usize) -> Result<Self, PlaceError> {
        let mut board = *self;
        board.place(mark, index)?;
        Ok(board)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|mark| !mark.is_empty())
    }

    /// Iterates over the contents of the 8 win lines, in [`WIN_LINES`] order.
    pub fn lines(&self) -> impl Iterator<Item = [Mark; 3]> + '_ {
        WIN_LINES
            .iter()
            .map(|&line| line.map(|index| self.cells[index]))
    }

    /// Returns the game result, or `None` while the game is still running.
    ///
    /// The first completed line in [`WIN_LINES`] order decides the winner. A full board
    /// without a completed line is a draw.
    #[must_use]
    pub fn winner(&self) -> Option<Outcome> {
        let winning_line = self
            .lines()
            .find(|[a, b, c]| !a.is_empty() && a == b && b == c);
        if let Some([mark, _, _]) = winning_line {
            return Some(Outcome::Win(mark));
        }
        self.is_full().then_some(Outcome::Draw)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(f, " {} | {} | {}", cells[0], cells[1], cells[2])?;
        }
        Ok(())
    }
}
