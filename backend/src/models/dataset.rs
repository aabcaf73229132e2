use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors raised while assembling a [`FieldDataset`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    /// An index array is neither empty nor `total_pixels` long.
    #[error("{index} has {actual} values, expected 0 or {expected}")]
    LengthMismatch {
        index: IndexKind,
        expected: usize,
        actual: usize,
    },

    /// A spectral cube buffer does not match its declared dimensions.
    #[error("cube buffer has {actual} samples, expected {expected}")]
    CubeSize { expected: usize, actual: usize },

    /// A band selection points past the last band of the cube.
    #[error("band {band} out of range for a cube with {bands} bands")]
    BandOutOfRange { band: usize, bands: usize },

    /// Unknown index name.
    #[error("unknown vegetation index '{0}'")]
    UnknownIndex(String),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Per-pixel scalar layers carried by a dataset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndexKind {
    #[serde(rename = "NDVI")]
    Ndvi,
    #[serde(rename = "GNDVI")]
    Gndvi,
    #[serde(rename = "SAVI")]
    Savi,
    #[serde(rename = "SoilIndex")]
    SoilIndex,
}

impl IndexKind {
    pub const ALL: [IndexKind; 4] = [
        IndexKind::Ndvi,
        IndexKind::Gndvi,
        IndexKind::Savi,
        IndexKind::SoilIndex,
    ];

    /// Display name used in tables, reports and JSON keys.
    pub fn name(&self) -> &'static str {
        match self {
            IndexKind::Ndvi => "NDVI",
            IndexKind::Gndvi => "GNDVI",
            IndexKind::Savi => "SAVI",
            IndexKind::SoilIndex => "SoilIndex",
        }
    }

    /// Vegetation indices share one status scale; the soil index uses its own.
    pub fn is_vegetation(&self) -> bool {
        !matches!(self, IndexKind::SoilIndex)
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndexKind {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndexKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| DatasetError::UnknownIndex(s.to_string()))
    }
}

/// Image dimensions as `(width, height, band_count)`.
///
/// Serialized as a three element array to match the export format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 3]", into = "[usize; 3]")]
pub struct ImageShape {
    pub width: usize,
    pub height: usize,
    pub bands: usize,
}

impl ImageShape {
    pub fn new(width: usize, height: usize, bands: usize) -> Self {
        Self {
            width,
            height,
            bands,
        }
    }

    pub fn total_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl From<[usize; 3]> for ImageShape {
    fn from(v: [usize; 3]) -> Self {
        ImageShape::new(v[0], v[1], v[2])
    }
}

impl From<ImageShape> for [usize; 3] {
    fn from(shape: ImageShape) -> Self {
        [shape.width, shape.height, shape.bands]
    }
}

impl fmt::Display for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.width, self.height, self.bands)
    }
}

/// Immutable per-pixel dataset for one field capture.
///
/// Every index array is either empty or exactly `shape.total_pixels()` long,
/// and every stored value is finite. A dataset is never edited after
/// construction; a refresh builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldDataset")]
pub struct FieldDataset {
    shape: ImageShape,
    ndvi: Vec<f64>,
    gndvi: Vec<f64>,
    savi: Vec<f64>,
    soil_index: Vec<f64>,
}

/// Unvalidated wire form; deserialization goes through [`FieldDataset::new`].
#[derive(Deserialize)]
struct RawFieldDataset {
    shape: ImageShape,
    ndvi: Vec<f64>,
    gndvi: Vec<f64>,
    savi: Vec<f64>,
    soil_index: Vec<f64>,
}

impl TryFrom<RawFieldDataset> for FieldDataset {
    type Error = DatasetError;

    fn try_from(raw: RawFieldDataset) -> Result<Self, Self::Error> {
        FieldDataset::new(raw.shape, raw.ndvi, raw.gndvi, raw.savi, raw.soil_index)
    }
}

/// Replace NaN and infinities with `0.0`, returning how many were replaced.
fn zero_non_finite(values: &mut [f64]) -> usize {
    let mut replaced = 0;
    for v in values.iter_mut().filter(|v| !v.is_finite()) {
        *v = 0.0;
        replaced += 1;
    }
    replaced
}

impl FieldDataset {
    /// Build a dataset, validating the length of every index array.
    ///
    /// Non-finite values read as `0.0`, the same as a missing value.
    pub fn new(
        shape: ImageShape,
        ndvi: Vec<f64>,
        gndvi: Vec<f64>,
        savi: Vec<f64>,
        soil_index: Vec<f64>,
    ) -> DatasetResult<Self> {
        let mut dataset = Self {
            shape,
            ndvi,
            gndvi,
            savi,
            soil_index,
        };
        let expected = shape.total_pixels();
        for kind in IndexKind::ALL {
            let actual = dataset.values(kind).len();
            if actual != 0 && actual != expected {
                return Err(DatasetError::LengthMismatch {
                    index: kind,
                    expected,
                    actual,
                });
            }
        }

        for (kind, values) in [
            (IndexKind::Ndvi, &mut dataset.ndvi),
            (IndexKind::Gndvi, &mut dataset.gndvi),
            (IndexKind::Savi, &mut dataset.savi),
            (IndexKind::SoilIndex, &mut dataset.soil_index),
        ] {
            let replaced = zero_non_finite(values);
            if replaced > 0 {
                log::warn!("{} had {} non-finite values; read as 0.0", kind, replaced);
            }
        }
        Ok(dataset)
    }

    /// A dataset with the given shape and no index values yet.
    pub fn empty(shape: ImageShape) -> Self {
        Self {
            shape,
            ndvi: Vec::new(),
            gndvi: Vec::new(),
            savi: Vec::new(),
            soil_index: Vec::new(),
        }
    }

    pub fn shape(&self) -> ImageShape {
        self.shape
    }

    pub fn total_pixels(&self) -> usize {
        self.shape.total_pixels()
    }

    pub fn values(&self, kind: IndexKind) -> &[f64] {
        match kind {
            IndexKind::Ndvi => &self.ndvi,
            IndexKind::Gndvi => &self.gndvi,
            IndexKind::Savi => &self.savi,
            IndexKind::SoilIndex => &self.soil_index,
        }
    }

    /// Value at pixel `i`, or `0.0` when the index has no data.
    pub fn value_or_zero(&self, kind: IndexKind, i: usize) -> f64 {
        self.values(kind).get(i).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pixels() {
        let shape = ImageShape::new(120, 150, 224);
        assert_eq!(shape.total_pixels(), 18_000);
    }

    #[test]
    fn test_new_accepts_empty_and_full_arrays() {
        let shape = ImageShape::new(2, 1, 10);
        let dataset =
            FieldDataset::new(shape, vec![0.1, 0.2], vec![], vec![0.3, 0.4], vec![]).unwrap();
        assert_eq!(dataset.values(IndexKind::Ndvi), &[0.1, 0.2]);
        assert!(dataset.values(IndexKind::Gndvi).is_empty());
    }

    #[test]
    fn test_new_rejects_partial_array() {
        let shape = ImageShape::new(2, 2, 10);
        let err = FieldDataset::new(shape, vec![0.1], vec![], vec![], vec![]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::LengthMismatch {
                index: IndexKind::Ndvi,
                expected: 4,
                actual: 1
            }
        );
    }

    #[test]
    fn test_new_zeroes_non_finite_values() {
        let shape = ImageShape::new(3, 1, 1);
        let dataset = FieldDataset::new(
            shape,
            vec![f64::NAN, 0.4, f64::INFINITY],
            vec![],
            vec![],
            vec![1.0, f64::NEG_INFINITY, 2.0],
        )
        .unwrap();

        assert_eq!(dataset.values(IndexKind::Ndvi), &[0.0, 0.4, 0.0]);
        assert_eq!(dataset.values(IndexKind::SoilIndex), &[1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_deserialize_validates_lengths() {
        let valid = r#"{"shape":[2,1,1],"ndvi":[0.1,0.2],"gndvi":[],"savi":[],"soil_index":[]}"#;
        let dataset: FieldDataset = serde_json::from_str(valid).unwrap();
        assert_eq!(dataset.total_pixels(), 2);

        let partial = r#"{"shape":[2,2,1],"ndvi":[0.1],"gndvi":[],"savi":[],"soil_index":[]}"#;
        let err = serde_json::from_str::<FieldDataset>(partial).unwrap_err();
        assert!(err.to_string().contains("NDVI has 1 values, expected 0 or 4"));
    }

    #[test]
    fn test_serialize_roundtrip_goes_through_validation() {
        let dataset = FieldDataset::new(
            ImageShape::new(1, 2, 4),
            vec![0.25, -0.5],
            vec![0.1, 0.2],
            vec![],
            vec![1.5, 0.5],
        )
        .unwrap();
        let json = serde_json::to_string(&dataset).unwrap();
        let back: FieldDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dataset);
    }

    #[test]
    fn test_value_or_zero_for_missing_layer() {
        let dataset = FieldDataset::empty(ImageShape::new(3, 3, 1));
        assert_eq!(dataset.value_or_zero(IndexKind::SoilIndex, 4), 0.0);
    }

    #[test]
    fn test_index_kind_parse() {
        assert_eq!("ndvi".parse::<IndexKind>().unwrap(), IndexKind::Ndvi);
        assert_eq!("SoilIndex".parse::<IndexKind>().unwrap(), IndexKind::SoilIndex);
        assert!("evi".parse::<IndexKind>().is_err());
    }

    #[test]
    fn test_shape_serializes_as_array() {
        let json = serde_json::to_string(&ImageShape::new(100, 100, 100)).unwrap();
        assert_eq!(json, "[100,100,100]");
        let back: ImageShape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ImageShape::new(100, 100, 100));
    }
}
