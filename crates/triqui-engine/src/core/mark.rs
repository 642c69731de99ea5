/// Content of a single board cell.
///
/// `X` and `O` are the two players; `Empty` marks a cell nobody has claimed yet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Mark {
    #[default]
    #[display(".")]
    Empty,
    #[display("X")]
    X,
    #[display("O")]
    O,
}

impl Mark {
    /// Both player marks, in turn order.
    pub const PLAYERS: [Self; 2] = [Self::X, Self::O];

    /// Returns the mark of the other player.
    ///
    /// `Empty` has no opponent and maps to itself.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
            Self::Empty => Self::Empty,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Outcome {
    #[display("{_0} wins")]
    Win(Mark),
    #[display("draw")]
    Draw,
}

impl Outcome {
    /// Returns the winning mark, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Mark> {
        match self {
            Self::Win(mark) => Some(mark),
            Self::Draw => None,
        }
    }
}
