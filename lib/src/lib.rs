//! A Game of Life on a torus that slowly turns into a picture.
//!
//! A [`PatternSource`] thresholds an image into a target [`Grid`].
//! An [`Engine`] then runs Conway's Game of Life (B3/S23) on a random grid,
//! and after every generation overwrites each cell with the target cell
//! with a probability that grows with the frame number, until the two
//! grids agree.
//!
//! ```no_run
//! use lifemorph_lib::{Config, Status};
//!
//! # fn main() -> Result<(), lifemorph_lib::Error> {
//! let config = Config::new(50).set_seed(Some(42));
//! let target = config.pattern_source()?.derive("cat.png")?;
//! let mut engine = config.engine(target)?;
//! let status = engine.run(config.max_frames, |_, grid| println!("{}", grid));
//! assert!(matches!(status, Status::Converged | Status::Exhausted));
//! # Ok(())
//! # }
//! ```

mod cells;
mod config;
mod engine;
mod error;
mod grid;
mod pattern;
pub mod rules;

pub use cells::{Coord, State, ALIVE, DEAD};
pub use config::{Config, Resample};
pub use engine::{Engine, Status};
pub use error::Error;
pub use grid::Grid;
pub use pattern::{PatternSource, THRESHOLD};
