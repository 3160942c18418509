//! Game status state machine.
//!
//! A game starts `Unfinished` and is resolved once per turn (player move
//! followed by opponent move). The first terminal status sticks.
//!
//! # State Diagram
//!
//! ```text
//!                       player wins only
//!                  ┌───────────────────────▶ Victory
//!                  │
//! ┌────────────┐   │    opponent wins only
//! │ Unfinished │───┼───────────────────────▶ Loss
//! └────────────┘   │
//!       ▲    │     │    both win, or board full
//!       └────┘     └───────────────────────▶ Tie
//!   no win, room left
//! ```

use std::fmt;

/// Game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    /// Game still accepts moves
    #[default]
    Unfinished,
    /// Player made four in a row
    Victory,
    /// Opponent made four in a row
    Loss,
    /// Both won on the same turn, or the board filled up
    Tie,
}

impl GameStatus {
    /// Name sent to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unfinished => "UNFINISHED",
            Self::Victory => "VICTORY",
            Self::Loss => "LOSS",
            Self::Tie => "TIE",
        }
    }

    /// Check if game is over (cannot change).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unfinished)
    }

    /// Status after a turn, given each side's win flag and board fullness.
    pub fn resolve(player_win: bool, opponent_win: bool, board_full: bool) -> Self {
        match (player_win, opponent_win) {
            (true, true) => Self::Tie,
            (true, false) => Self::Victory,
            (false, true) => Self::Loss,
            (false, false) if board_full => Self::Tie,
            (false, false) => Self::Unfinished,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
