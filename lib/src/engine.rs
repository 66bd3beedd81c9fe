//! The automaton that morphs a random grid into the target.

use crate::{config::Config, error::Error, grid::Grid, rules};
use log::{debug, info};
use rand::{rngs::StdRng, Rng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Animation status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// Initial status. No frame has been computed yet.
    Initial,
    /// Some frames are computed, and the grid still differs from the target.
    Running,
    /// The live grid equals the target.
    Converged,
    /// The frame budget ran out before the grid reached the target.
    ///
    /// This is not an error.
    Exhausted,
}

/// Owns the live grid and the target grid, and advances the live grid
/// one frame at a time.
///
/// Each [`step`](Self::step) applies one generation of `B3/S23` on the
/// torus, then independently replaces every cell with the target cell
/// with probability [`match_probability`](Self::match_probability).
///
/// The random number generator is injected, so that a seeded engine
/// always produces the same frames.
pub struct Engine<R: Rng = StdRng> {
    /// Configuration.
    config: Config,

    /// The live grid. Replaced on every step.
    live: Grid,

    /// The target grid. Never changes.
    target: Grid,

    /// Number of frames computed so far.
    frame: u64,

    /// Current status.
    status: Status,

    /// Source of all randomness.
    rng: R,
}

impl Engine<StdRng> {
    /// Creates an engine with the default bias for `size` × `size` grids.
    ///
    /// `seed` being `None` means seeding from the operating system.
    pub fn new(size: usize, target: Grid, seed: Option<u64>) -> Result<Self, Error> {
        Config::new(size).set_seed(seed).engine(target)
    }
}

impl<R: Rng> Engine<R> {
    /// Creates an engine from a configuration, a target and a random number
    /// generator.
    ///
    /// The live grid starts uniformly random, drawn from `rng`.
    pub fn with_rng(config: Config, target: Grid, mut rng: R) -> Result<Self, Error> {
        config.validate()?;
        if target.size() != config.size {
            return Err(Error::DimensionMismatch {
                live: config.size,
                target: target.size(),
            });
        }
        let live = Grid::random(config.size, &mut rng)?;
        Ok(Engine {
            config,
            live,
            target,
            frame: 0,
            status: Status::Initial,
            rng,
        })
    }

    /// Configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current live grid.
    pub fn live(&self) -> &Grid {
        &self.live
    }

    /// The target grid.
    pub fn target(&self) -> &Grid {
        &self.target
    }

    /// Number of frames computed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Replaces the live grid. The frame counter is kept.
    pub fn set_live(&mut self, live: Grid) -> Result<(), Error> {
        if live.size() != self.target.size() {
            return Err(Error::DimensionMismatch {
                live: live.size(),
                target: self.target.size(),
            });
        }
        self.live = live;
        Ok(())
    }

    /// Starts over from a fresh random grid at frame 0.
    pub fn restart(&mut self) {
        self.live.randomize(&mut self.rng);
        self.frame = 0;
        self.status = Status::Initial;
    }

    /// Probability that a cell is forced to its target state in the
    /// next step.
    pub fn match_probability(&self) -> f64 {
        self.config.match_probability(self.frame)
    }

    /// Whether the live grid equals the target.
    pub fn is_converged(&self) -> bool {
        self.live == self.target
    }

    /// Number of cells of the live grid that differ from the target.
    pub fn mismatch_count(&self) -> usize {
        self.live.diff(&self.target)
    }

    /// Overwrites cells of `grid` with their target states.
    ///
    /// One random number is drawn for every cell, in row-major order,
    /// whether or not the cell already matches.
    fn bias(&mut self, grid: &mut Grid, probability: f64) {
        for (cell, &target) in grid.cells_mut().iter_mut().zip(self.target.cells()) {
            if self.rng.gen::<f64>() < probability {
                *cell = target;
            }
        }
    }

    /// Computes the next frame.
    ///
    /// Returns a copy of the new live grid, and whether it equals the target.
    pub fn step(&mut self) -> (Grid, bool) {
        let probability = self.match_probability();
        let mut next = rules::next_generation(&self.live);
        self.bias(&mut next, probability);
        self.frame += 1;
        self.live = next;

        let done = self.is_converged();
        self.status = if done {
            Status::Converged
        } else {
            Status::Running
        };
        debug!(
            "Frame {}: p = {:.2}, {} cells differ",
            self.frame,
            probability,
            self.mismatch_count()
        );
        if done {
            info!("Reached the target after {} frames", self.frame);
        }
        (self.live.clone(), done)
    }

    /// Steps until the live grid equals the target, or `max_frames` steps
    /// have been made.
    ///
    /// The grid is compared with the target before every step, so no step
    /// is made when it already matches. `on_frame` is called after every
    /// step with the frame number and the new grid.
    pub fn run<F: FnMut(u64, &Grid)>(&mut self, max_frames: u64, mut on_frame: F) -> Status {
        for _ in 0..max_frames {
            if self.is_converged() {
                break;
            }
            let (grid, _) = self.step();
            on_frame(self.frame, &grid);
        }
        self.status = if self.is_converged() {
            Status::Converged
        } else {
            info!(
                "Stopped after {} frames, {} cells differ",
                self.frame,
                self.mismatch_count()
            );
            Status::Exhausted
        };
        self.status
    }
}
