//! Turning images into target grids.

use crate::{
    cells::{ALIVE, DEAD},
    config::Resample,
    error::Error,
    grid::Grid,
};
use image::{imageops, DynamicImage, GrayImage, Luma};
use log::debug;
use std::path::Path;

/// Luminance threshold.
///
/// Samples strictly darker than this become [`ALIVE`], the rest [`DEAD`].
pub const THRESHOLD: u8 = 128;

/// Produces target grids from images by thresholding their luminance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternSource {
    /// Side length of the produced grids.
    size: usize,

    /// How to resample the image.
    resample: Resample,
}

impl PatternSource {
    /// Creates a pattern source producing `size` × `size` grids.
    pub fn new(size: usize) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::NonPositiveError);
        }
        Ok(PatternSource {
            size,
            resample: Resample::default(),
        })
    }

    /// Sets the resampling filter.
    pub fn set_resample(mut self, resample: Resample) -> Self {
        self.resample = resample;
        self
    }

    /// Side length of the produced grids.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Reads the image at `path` and derives the target grid from it.
    ///
    /// Fails with [`Error::ImageReadError`] if the file does not exist
    /// or cannot be decoded.
    pub fn derive<P: AsRef<Path>>(&self, path: P) -> Result<Grid, Error> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| Error::ImageReadError {
            path: Some(path.to_path_buf()),
            source,
        })?;
        debug!(
            "Decoded {:?}: {}x{}",
            path,
            image.width(),
            image.height()
        );
        self.derive_image(&image)
    }

    /// Derives the target grid from an encoded image in memory.
    pub fn derive_bytes(&self, bytes: &[u8]) -> Result<Grid, Error> {
        let image = image::load_from_memory(bytes)
            .map_err(|source| Error::ImageReadError { path: None, source })?;
        self.derive_image(&image)
    }

    /// Derives the target grid from a decoded image.
    ///
    /// The image is converted to luminance, resampled to the grid size,
    /// and thresholded at [`THRESHOLD`].
    pub fn derive_image(&self, image: &DynamicImage) -> Result<Grid, Error> {
        let gray = luminance(image);
        let n = self.size as u32;
        let gray = if gray.dimensions() == (n, n) {
            gray
        } else {
            imageops::resize(&gray, n, n, self.resample.filter())
        };
        Grid::from_fn(self.size, |(i, j)| {
            let Luma([l]) = *gray.get_pixel(j as u32, i as u32);
            if l < THRESHOLD {
                ALIVE
            } else {
                DEAD
            }
        })
    }
}

/// Converts an image to 8-bit luminance with the ITU-R 601-2 weights.
///
/// Alpha is ignored. Gray images keep their exact values.
fn luminance(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let l = (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16;
        Luma([l as u8])
    })
}
