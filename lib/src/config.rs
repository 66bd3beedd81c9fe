//! Configuration.

use crate::{engine::Engine, error::Error, grid::Grid, pattern::PatternSource};
use educe::Educe;
use image::imageops::FilterType;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How to resample an image to the size of the grid.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Resample {
    /// Nearest neighbor.
    Nearest,
    /// Linear filter.
    Triangle,
    /// Cubic filter. The usual "bicubic".
    #[educe(Default)]
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Lanczos with window 3.
    Lanczos3,
}

impl Resample {
    /// All possible values, as they are written in [`Display`].
    pub const NAMES: [&'static str; 5] =
        ["nearest", "triangle", "catmull-rom", "gaussian", "lanczos3"];

    /// The corresponding filter of the `image` crate.
    pub fn filter(self) -> FilterType {
        match self {
            Resample::Nearest => FilterType::Nearest,
            Resample::Triangle => FilterType::Triangle,
            Resample::CatmullRom => FilterType::CatmullRom,
            Resample::Gaussian => FilterType::Gaussian,
            Resample::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for Resample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(Resample::Nearest),
            "triangle" => Ok(Resample::Triangle),
            "catmull-rom" | "bicubic" => Ok(Resample::CatmullRom),
            "gaussian" => Ok(Resample::Gaussian),
            "lanczos3" => Ok(Resample::Lanczos3),
            _ => Err(String::from("invalid Resample")),
        }
    }
}

impl Display for Resample {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let s = match self {
            Resample::Nearest => "nearest",
            Resample::Triangle => "triangle",
            Resample::CatmullRom => "catmull-rom",
            Resample::Gaussian => "gaussian",
            Resample::Lanczos3 => "lanczos3",
        };
        write!(f, "{}", s)?;
        Ok(())
    }
}

/// Configuration of the pattern source, the engine and the animation.
///
/// Both components are created from this configuration.
#[derive(Clone, Debug, Educe, PartialEq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Side length of the grids.
    #[educe(Default = 50)]
    pub size: usize,

    /// Seed of the random number generator.
    ///
    /// `None` means that the generator is seeded from the operating system.
    pub seed: Option<u64>,

    /// Maximal number of frames to animate.
    ///
    /// Running out of frames is a normal way to stop.
    #[educe(Default = 100)]
    pub max_frames: u64,

    /// Milliseconds between two frames, for drivers that pace the animation.
    #[educe(Default = 200)]
    pub interval_ms: u64,

    /// Probability of forcing a cell to its target state on frame 0.
    #[educe(Default = 0.1)]
    pub base_probability: f64,

    /// How much that probability grows every frame.
    #[educe(Default = 0.02)]
    pub probability_step: f64,

    /// How to resample the image.
    pub resample: Resample,
}

impl Config {
    /// Sets up a new configuration with given grid size.
    pub fn new(size: usize) -> Self {
        Config {
            size,
            ..Config::default()
        }
    }

    /// Sets the seed.
    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the maximal number of frames.
    pub fn set_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Sets the interval between frames.
    pub fn set_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Sets the base probability and its growth per frame.
    pub fn set_bias(mut self, base_probability: f64, probability_step: f64) -> Self {
        self.base_probability = base_probability;
        self.probability_step = probability_step;
        self
    }

    /// Sets the resampling filter.
    pub fn set_resample(mut self, resample: Resample) -> Self {
        self.resample = resample;
        self
    }

    /// The probability that a cell is forced to its target state
    /// on the given frame.
    ///
    /// `min(1, base_probability + frame * probability_step)`.
    pub fn match_probability(&self, frame: u64) -> f64 {
        (self.base_probability + frame as f64 * self.probability_step).min(1.0)
    }

    /// Checks the size and the bias parameters.
    pub fn validate(&self) -> Result<(), Error> {
        if self.size == 0 {
            return Err(Error::NonPositiveError);
        }
        for p in [self.base_probability, self.probability_step] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::InvalidProbability(p));
            }
        }
        Ok(())
    }

    /// Creates a pattern source producing grids of the configured size.
    pub fn pattern_source(&self) -> Result<PatternSource, Error> {
        Ok(PatternSource::new(self.size)?.set_resample(self.resample))
    }

    /// Creates an engine driving a random grid towards `target`.
    ///
    /// The generator is seeded with [`seed`](#structfield.seed).
    pub fn engine(&self, target: Grid) -> Result<Engine<StdRng>, Error> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.engine_with_rng(target, rng)
    }

    /// Creates an engine with the given random number generator.
    pub fn engine_with_rng<R: Rng>(&self, target: Grid, rng: R) -> Result<Engine<R>, Error> {
        Engine::with_rng(self.clone(), target, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.size, 50);
        assert_eq!(config.max_frames, 100);
        assert_eq!(config.interval_ms, 200);
        assert_eq!(config.seed, None);
        assert_eq!(config.resample, Resample::CatmullRom);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid() {
        assert!(matches!(
            Config::new(0).validate(),
            Err(Error::NonPositiveError)
        ));
        assert!(matches!(
            Config::new(5).set_bias(1.5, 0.0).validate(),
            Err(Error::InvalidProbability(_))
        ));
        assert!(matches!(
            Config::new(5).set_bias(0.1, -0.02).validate(),
            Err(Error::InvalidProbability(_))
        ));
    }

    #[test]
    fn resample_names() {
        for name in Resample::NAMES {
            let resample: Resample = name.parse().unwrap();
            assert_eq!(resample.to_string(), name);
        }
        assert!("cubic".parse::<Resample>().is_err());
    }
}
