use serde::{Deserialize, Serialize};

use crate::models::IndexKind;

// =========================================================
// Statistics types + route
// =========================================================

/// Summary statistics for one index layer.
///
/// `std` is the population standard deviation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStatistics {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Statistics for all four layers of a dataset.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsTable {
    #[serde(rename = "NDVI")]
    pub ndvi: IndexStatistics,
    #[serde(rename = "GNDVI")]
    pub gndvi: IndexStatistics,
    #[serde(rename = "SAVI")]
    pub savi: IndexStatistics,
    #[serde(rename = "SoilIndex")]
    pub soil_index: IndexStatistics,
}

impl StatisticsTable {
    pub fn get(&self, kind: IndexKind) -> &IndexStatistics {
        match kind {
            IndexKind::Ndvi => &self.ndvi,
            IndexKind::Gndvi => &self.gndvi,
            IndexKind::Savi => &self.savi,
            IndexKind::SoilIndex => &self.soil_index,
        }
    }

    pub fn get_mut(&mut self, kind: IndexKind) -> &mut IndexStatistics {
        match kind {
            IndexKind::Ndvi => &mut self.ndvi,
            IndexKind::Gndvi => &mut self.gndvi,
            IndexKind::Savi => &mut self.savi,
            IndexKind::SoilIndex => &mut self.soil_index,
        }
    }
}

/// Qualitative rating of an index mean.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexStatus {
    Good,
    Fair,
    Poor,
}

/// One row of the statistics table shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRow {
    pub index: IndexKind,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub status: IndexStatus,
}

/// Route path for the statistics table.
pub const GET_STATISTICS: &str = "/datasets/current/statistics";
