//! Board mechanics for Triqui (tic-tac-toe).
//!
//! This crate is the leaf of the workspace: it knows how cells are laid out, which
//! moves are legal and when a game is over. It knows nothing about agents, fitness or
//! training.
//!
//! - [`Mark`] - Content of a single cell (`Empty`, `X`, `O`)
//! - [`Board`] - The 3×3 grid with legal-move enumeration and win/draw detection
//! - [`Outcome`] - Final result of a game (a winning mark or a draw)
//! - [`WIN_LINES`] - The 8 fixed index triples that win a game
//!
//! # Example
//!
//! ```
//! use triqui_engine::{Board, Mark, Outcome};
//!
//! let mut board = Board::new();
//! for index in [0, 1, 2] {
//!     board.place(Mark::X, index).unwrap();
//! }
//! assert_eq!(board.winner(), Some(Outcome::Win(Mark::X)));
//! ```

pub use self::core::*;

pub mod core;

/// Reasons a mark cannot be placed on the board.
///
/// A failed placement never mutates the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    #[display("cell index {index} is outside the board")]
    OutOfRange { index: usize },
    #[display("cell {index} is already occupied")]
    Occupied { index: usize },
    #[display("an empty mark cannot be placed")]
    EmptyMark,
}
