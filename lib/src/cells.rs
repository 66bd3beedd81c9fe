//! Cells in the cellular automaton.

use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Possible states of a cell.
///
/// There are only two of them. Randomness is always resolved into one of
/// these before a grid is handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum State {
    /// The Dead state.
    #[default]
    Dead,
    /// The Alive state.
    Alive,
}

/// The Dead state.
pub const DEAD: State = State::Dead;
/// The Alive state.
pub const ALIVE: State = State::Alive;

impl State {
    /// `1` for [`ALIVE`], `0` for [`DEAD`].
    #[inline]
    pub fn weight(self) -> u8 {
        match self {
            State::Alive => 1,
            State::Dead => 0,
        }
    }

    /// Whether the cell is alive.
    #[inline]
    pub fn is_alive(self) -> bool {
        self == ALIVE
    }
}

/// Flips the state.
impl Not for State {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            State::Alive => DEAD,
            State::Dead => ALIVE,
        }
    }
}

impl From<bool> for State {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            ALIVE
        } else {
            DEAD
        }
    }
}

/// The coordinates of a cell.
///
/// `(row, column)`. Both coordinates are 0-indexed.
pub type Coord = (usize, usize);
