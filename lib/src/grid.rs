//! Square toroidal grids.

use crate::{
    cells::{Coord, State, ALIVE, DEAD},
    error::Error,
};
use rand::Rng;
use std::{
    fmt::{self, Display, Formatter},
    ops::{Index, IndexMut},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Offsets of the eight cells in the Moore neighborhood.
const NBHD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A square grid of cells whose edges wrap around.
///
/// Cells are stored densely in row-major order.
/// Row `size - 1` is adjacent to row `0`, and likewise for columns,
/// so there are no edge cells.
///
/// Two grids are equal iff they have the same size and every cell matches.
///
/// With the `serde` feature, a grid is (de)serialized as its
/// [Plaintext](https://conwaylife.com/wiki/Plaintext) rendering.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Grid {
    /// Side length.
    size: usize,

    /// All the cells, row by row.
    ///
    /// Its length is always `size * size`.
    cells: Box<[State]>,
}

impl Grid {
    /// Creates a grid of dead cells.
    pub fn new(size: usize) -> Result<Self, Error> {
        Self::from_fn(size, |_| DEAD)
    }

    /// Creates a grid whose cell at `(row, column)` is `f((row, column))`.
    ///
    /// Cells are visited in row-major order.
    pub fn from_fn<F: FnMut(Coord) -> State>(size: usize, mut f: F) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::NonPositiveError);
        }
        let mut cells = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                cells.push(f((i, j)));
            }
        }
        Ok(Grid {
            size,
            cells: cells.into_boxed_slice(),
        })
    }

    /// Creates a grid where every cell is independently alive with
    /// probability `1/2`.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self, Error> {
        let mut grid = Self::new(size)?;
        grid.randomize(rng);
        Ok(grid)
    }

    /// Sets every cell independently to alive with probability `1/2`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in self.cells.iter_mut() {
            *cell = State::from(rng.gen_bool(0.5));
        }
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All the cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[State] {
        &self.cells
    }

    /// All the cells in row-major order, mutably.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [State] {
        &mut self.cells
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[State]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Gets the state of a cell. Returns `None` if the coordinates are
    /// out of range.
    pub fn get(&self, (i, j): Coord) -> Option<State> {
        if i < self.size && j < self.size {
            Some(self.cells[i * self.size + j])
        } else {
            None
        }
    }

    /// Gets the state of a cell, with both coordinates taken modulo the size.
    #[inline]
    pub fn get_wrapped(&self, i: isize, j: isize) -> State {
        let n = self.size as isize;
        let i = i.rem_euclid(n) as usize;
        let j = j.rem_euclid(n) as usize;
        self.cells[i * self.size + j]
    }

    /// Number of living cells among the eight toroidal neighbors.
    pub fn neighbor_count(&self, (i, j): Coord) -> u8 {
        let (i, j) = (i as isize, j as isize);
        NBHD.iter()
            .map(|&(di, dj)| self.get_wrapped(i + di, j + dj).weight())
            .sum()
    }

    /// Number of living cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|s| s.is_alive()).count()
    }

    /// Number of cells whose states differ from the same cell in `other`.
    pub fn mismatch_count(&self, other: &Grid) -> Result<usize, Error> {
        if self.size != other.size {
            return Err(Error::DimensionMismatch {
                live: self.size,
                target: other.size,
            });
        }
        Ok(self.diff(other))
    }

    /// Same as [`mismatch_count`](Self::mismatch_count), for grids already
    /// known to have the same size.
    pub(crate) fn diff(&self, other: &Grid) -> usize {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl Index<Coord> for Grid {
    type Output = State;

    /// # Panics
    ///
    /// Panics if the coordinates are out of range.
    #[inline]
    fn index(&self, (i, j): Coord) -> &Self::Output {
        assert!(i < self.size && j < self.size, "cell ({}, {}) out of range", i, j);
        &self.cells[i * self.size + j]
    }
}

impl IndexMut<Coord> for Grid {
    #[inline]
    fn index_mut(&mut self, (i, j): Coord) -> &mut Self::Output {
        assert!(i < self.size && j < self.size, "cell ({}, {}) out of range", i, j);
        &mut self.cells[i * self.size + j]
    }
}

/// Displays the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext)
/// format.
///
/// * **Dead** cells are represented by `.`;
/// * **Living** cells are represented by `o`.
///
/// Every row, including the last one, ends with a newline.
impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &state in row {
                let c = match state {
                    State::Dead => '.',
                    State::Alive => 'o',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses a grid in [Plaintext](https://conwaylife.com/wiki/Plaintext)
/// format.
///
/// Lines starting with `!` are comments. Blank lines are ignored.
/// `.` is dead, `o`, `O` and `*` are alive.
/// The number of rows must equal the length of every row.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('!'))
            .collect::<Vec<_>>();
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != size {
                return Err(Error::ParseGridError(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.chars().count(),
                    size
                )));
            }
            for c in row.chars() {
                let state = match c {
                    '.' => DEAD,
                    'o' | 'O' | '*' => ALIVE,
                    _ => {
                        return Err(Error::ParseGridError(format!(
                            "unexpected character {:?} in row {}",
                            c, i
                        )))
                    }
                };
                cells.push(state);
            }
        }
        if size == 0 {
            return Err(Error::NonPositiveError);
        }
        Ok(Grid {
            size,
            cells: cells.into_boxed_slice(),
        })
    }
}

impl TryFrom<String> for Grid {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Grid> for String {
    fn from(grid: Grid) -> Self {
        grid.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn zero_size() {
        assert!(matches!(Grid::new(0), Err(Error::NonPositiveError)));
        assert!(matches!("".parse::<Grid>(), Err(Error::NonPositiveError)));
    }

    #[test]
    fn plaintext() -> Result<(), Error> {
        let text = "! a glider\n.o..\n..o.\nooo.\n....\n";
        let grid: Grid = text.parse()?;
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cell_count(), 5);
        assert_eq!(grid[(0, 1)], ALIVE);
        assert_eq!(grid[(3, 3)], DEAD);
        assert_eq!(grid.to_string(), ".o..\n..o.\nooo.\n....\n");
        Ok(())
    }

    #[test]
    fn bad_plaintext() {
        assert!(matches!(
            "..\n.".parse::<Grid>(),
            Err(Error::ParseGridError(_))
        ));
        assert!(matches!(
            "..\n.x".parse::<Grid>(),
            Err(Error::ParseGridError(_))
        ));
    }

    #[test]
    fn wrapping() -> Result<(), Error> {
        let grid = Grid::from_fn(4, |(i, j)| State::from(i == 3 && j == 0))?;
        assert_eq!(grid.get_wrapped(-1, 0), ALIVE);
        assert_eq!(grid.get_wrapped(3, 4), ALIVE);
        assert_eq!(grid.get_wrapped(7, -4), ALIVE);
        assert_eq!(grid.get_wrapped(0, 0), DEAD);
        assert_eq!(grid.get((4, 0)), None);
        Ok(())
    }

    #[test]
    fn random_is_seeded() -> Result<(), Error> {
        let a = Grid::random(20, &mut StdRng::seed_from_u64(7))?;
        let b = Grid::random(20, &mut StdRng::seed_from_u64(7))?;
        assert_eq!(a, b);
        let alive = a.cell_count();
        assert!(alive > 100 && alive < 300);
        Ok(())
    }

    #[test]
    fn mismatch() -> Result<(), Error> {
        let a: Grid = "o.\n..".parse()?;
        let b: Grid = "..\n.o".parse()?;
        assert_eq!(a.mismatch_count(&b)?, 2);
        assert_eq!(a.mismatch_count(&a)?, 0);
        assert!(a.mismatch_count(&Grid::new(3)?).is_err());
        Ok(())
    }
}
