//! All kinds of errors in this crate.

use displaydoc::Display;
use image::ImageError;
use std::path::PathBuf;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// Unable to read image {path:?}: {source}
    ImageReadError {
        /// The path of the image. `None` for images decoded from memory.
        path: Option<PathBuf>,
        /// The error from the decoder.
        #[source]
        source: ImageError,
    },
    /// Grid size should be positive.
    NonPositiveError,
    /// The live grid is {live}x{live} but the target grid is {target}x{target}.
    DimensionMismatch {
        /// Side length of the live grid.
        live: usize,
        /// Side length of the target grid.
        target: usize,
    },
    /// Probability should be between 0 and 1, got {0}.
    InvalidProbability(f64),
    /// Invalid Plaintext grid: {0}.
    ParseGridError(String),
}
