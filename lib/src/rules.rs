//! Conway's Game of Life, `B3/S23`.

use crate::{
    cells::{State, ALIVE, DEAD},
    grid::Grid,
};

/// The next state of a cell, given its current state and the number of
/// living cells among its eight neighbors.
///
/// * A living cell with 2 or 3 living neighbors survives;
///   with fewer or more it dies.
/// * A dead cell with exactly 3 living neighbors becomes alive.
#[inline]
pub fn transition(state: State, count: u8) -> State {
    match (state, count) {
        (ALIVE, 2) | (ALIVE, 3) => ALIVE,
        (DEAD, 3) => ALIVE,
        _ => DEAD,
    }
}

/// Computes the next generation of the whole grid on the torus.
///
/// The result is a new grid. Every cell reads its neighbors from `grid`,
/// which is left untouched.
pub fn next_generation(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    for i in 0..grid.size() {
        for j in 0..grid.size() {
            next[(i, j)] = transition(grid[(i, j)], grid.neighbor_count((i, j)));
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        for count in 0..=8 {
            let survive = count == 2 || count == 3;
            assert_eq!(transition(ALIVE, count), State::from(survive));
            assert_eq!(transition(DEAD, count), State::from(count == 3));
        }
    }
}
