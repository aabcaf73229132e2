pub mod alerts;
pub mod export;
pub mod features;
pub mod labels;
pub mod maps;
pub mod statistics;

/// Route path for the dataset summary and refresh.
pub const DATASETS: &str = "/datasets";
pub const GET_CURRENT_DATASET: &str = "/datasets/current";
pub const GET_SENSORS: &str = "/datasets/current/sensors";
