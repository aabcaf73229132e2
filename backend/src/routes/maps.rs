use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::IndexKind;
use crate::store::StoreError;

// =========================================================
// Raster types, map registry + routes
// =========================================================

/// An opaque RGB color stop.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for legends.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A translucent overlay color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Red (stressed) through yellow to blue (vigorous).
pub const NDVI_RAMP: [Rgb; 8] = [
    Rgb::new(215, 48, 39),
    Rgb::new(244, 109, 67),
    Rgb::new(253, 174, 97),
    Rgb::new(254, 224, 139),
    Rgb::new(230, 245, 152),
    Rgb::new(171, 221, 164),
    Rgb::new(102, 194, 165),
    Rgb::new(50, 136, 189),
];

pub const GNDVI_RAMP: [Rgb; 6] = [
    Rgb::new(255, 255, 204),
    Rgb::new(199, 233, 180),
    Rgb::new(127, 205, 187),
    Rgb::new(65, 182, 196),
    Rgb::new(44, 123, 182),
    Rgb::new(37, 52, 148),
];

pub const SAVI_RAMP: [Rgb; 8] = [
    Rgb::new(140, 81, 10),
    Rgb::new(191, 129, 45),
    Rgb::new(223, 194, 125),
    Rgb::new(246, 232, 195),
    Rgb::new(199, 234, 229),
    Rgb::new(128, 205, 193),
    Rgb::new(53, 151, 143),
    Rgb::new(1, 102, 94),
];

/// Dark brown through sand to near white.
pub const SOIL_RAMP: [Rgb; 6] = [
    Rgb::new(84, 48, 5),
    Rgb::new(140, 81, 10),
    Rgb::new(191, 129, 45),
    Rgb::new(223, 194, 125),
    Rgb::new(246, 232, 195),
    Rgb::new(245, 245, 245),
];

/// Fill used for a map whose layer has no values.
pub const PLACEHOLDER_GRAY: Rgb = Rgb::new(128, 128, 128);

pub const STRESSED_WASH: Rgba = Rgba::new(180, 65, 60, 120);
pub const HEALTHY_WASH: Rgba = Rgba::new(31, 184, 205, 80);
pub const LOW_RISK_WASH: Rgba = Rgba::new(31, 184, 205, 80);
pub const MEDIUM_RISK_WASH: Rgba = Rgba::new(255, 193, 133, 100);
pub const HIGH_RISK_WASH: Rgba = Rgba::new(180, 65, 60, 120);

/// Index maps the dashboard renders, each bound to one ramp and one layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapId {
    Ndvi,
    Gndvi,
    Savi,
    Soil,
}

impl MapId {
    pub const ALL: [MapId; 4] = [MapId::Ndvi, MapId::Gndvi, MapId::Savi, MapId::Soil];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapId::Ndvi => "ndvi",
            MapId::Gndvi => "gndvi",
            MapId::Savi => "savi",
            MapId::Soil => "soil",
        }
    }

    /// Human-readable map name used in reports.
    pub fn title(&self) -> &'static str {
        match self {
            MapId::Ndvi => "NDVI",
            MapId::Gndvi => "GNDVI",
            MapId::Savi => "SAVI",
            MapId::Soil => "Soil Index",
        }
    }

    pub fn ramp(&self) -> &'static [Rgb] {
        match self {
            MapId::Ndvi => &NDVI_RAMP,
            MapId::Gndvi => &GNDVI_RAMP,
            MapId::Savi => &SAVI_RAMP,
            MapId::Soil => &SOIL_RAMP,
        }
    }

    /// Dataset layer and statistics entry the map is drawn from.
    pub fn index(&self) -> IndexKind {
        match self {
            MapId::Ndvi => IndexKind::Ndvi,
            MapId::Gndvi => IndexKind::Gndvi,
            MapId::Savi => IndexKind::Savi,
            MapId::Soil => IndexKind::SoilIndex,
        }
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MapId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| StoreError::UnknownLayer(s.to_string()))
    }
}

/// Overlays composited over the base field texture.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayId {
    Stress,
    PestRisk,
}

impl OverlayId {
    pub const ALL: [OverlayId; 2] = [OverlayId::Stress, OverlayId::PestRisk];

    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayId::Stress => "stress",
            OverlayId::PestRisk => "pest-risk",
        }
    }

    pub fn palette(&self) -> &'static [Rgba] {
        match self {
            OverlayId::Stress => &[STRESSED_WASH, HEALTHY_WASH],
            OverlayId::PestRisk => &[LOW_RISK_WASH, MEDIUM_RISK_WASH, HIGH_RISK_WASH],
        }
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlayId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverlayId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| StoreError::UnknownLayer(s.to_string()))
    }
}

/// Row-major RGBA8888 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// A buffer filled with one opaque color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let pixels = [color.r, color.g, color.b, 255].repeat(width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(4)
    }
}

/// Legend values for an index map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLegend {
    pub map: MapId,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stops: Vec<String>,
}

/// One colored entry of an overlay legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLegend {
    pub overlay: OverlayId,
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

/// Route paths for rendered layers.
pub const GET_MAP: &str = "/datasets/current/maps/{map_id}";
pub const GET_OVERLAY: &str = "/datasets/current/overlays/{overlay_id}";
pub const GET_LEGENDS: &str = "/datasets/current/legends";
