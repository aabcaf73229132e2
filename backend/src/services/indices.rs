//! Vegetation and soil index extraction from a spectral cube.
//!
//! The cube is held in memory by the caller; decoding capture files into a
//! [`SpectralCube`] happens outside this crate.

use serde::{Deserialize, Serialize};

use crate::models::{DatasetError, DatasetResult, FieldDataset, ImageShape};

/// Guards every ratio against a zero denominator.
const EPSILON: f64 = 1e-6;

/// Soil brightness correction factor for SAVI.
pub const SAVI_L: f64 = 0.5;

/// Band indices used by the index formulas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSelection {
    pub red: usize,
    pub green: usize,
    pub blue: usize,
    pub nir: usize,
}

/// Pixel-major, band-interleaved reflectance samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralCube {
    shape: ImageShape,
    data: Vec<f64>,
}

impl SpectralCube {
    pub fn new(shape: ImageShape, data: Vec<f64>) -> DatasetResult<Self> {
        let expected = shape.total_pixels() * shape.bands;
        if data.len() != expected {
            return Err(DatasetError::CubeSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> ImageShape {
        self.shape
    }

    pub fn sample(&self, pixel: usize, band: usize) -> f64 {
        self.data[pixel * self.shape.bands + band]
    }

    /// Rescale every band to roughly `[0, 1]`, zeroing non-finite samples first.
    pub fn normalize_bands(&mut self) {
        let bands = self.shape.bands;
        if bands == 0 {
            return;
        }
        for v in self.data.iter_mut() {
            if !v.is_finite() {
                *v = 0.0;
            }
        }
        for band in 0..bands {
            let (min, max) = self
                .data
                .iter()
                .skip(band)
                .step_by(bands)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            if !min.is_finite() {
                continue;
            }
            for v in self.data.iter_mut().skip(band).step_by(bands) {
                *v = (*v - min) / (max - min + EPSILON);
            }
        }
    }

    fn check_band(&self, band: usize) -> DatasetResult<()> {
        if band >= self.shape.bands {
            return Err(DatasetError::BandOutOfRange {
                band,
                bands: self.shape.bands,
            });
        }
        Ok(())
    }

    fn per_pixel<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(usize) -> f64,
    {
        (0..self.shape.total_pixels()).map(f).collect()
    }
}

pub fn ndvi(nir: f64, red: f64) -> f64 {
    (nir - red) / (nir + red + EPSILON)
}

pub fn gndvi(nir: f64, green: f64) -> f64 {
    (nir - green) / (nir + green + EPSILON)
}

pub fn savi(nir: f64, red: f64) -> f64 {
    ((nir - red) / (nir + red + SAVI_L + EPSILON)) * (1.0 + SAVI_L)
}

pub fn soil_index(red: f64, blue: f64) -> f64 {
    red / (blue + EPSILON)
}

/// Compute all four index layers for every pixel of the cube.
pub fn extract_indices(cube: &SpectralCube, bands: BandSelection) -> DatasetResult<FieldDataset> {
    for band in [bands.red, bands.green, bands.blue, bands.nir] {
        cube.check_band(band)?;
    }

    let ndvi_values = cube.per_pixel(|p| ndvi(cube.sample(p, bands.nir), cube.sample(p, bands.red)));
    let gndvi_values =
        cube.per_pixel(|p| gndvi(cube.sample(p, bands.nir), cube.sample(p, bands.green)));
    let savi_values = cube.per_pixel(|p| savi(cube.sample(p, bands.nir), cube.sample(p, bands.red)));
    let soil_values =
        cube.per_pixel(|p| soil_index(cube.sample(p, bands.red), cube.sample(p, bands.blue)));

    FieldDataset::new(
        cube.shape(),
        ndvi_values,
        gndvi_values,
        savi_values,
        soil_values,
    )
}
