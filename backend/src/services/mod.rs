//! Service layer: the pure computational core.
//!
//! Services take their inputs explicitly (dataset, thresholds, an injected
//! random source) and return fresh values. Nothing here touches the store or
//! any global state; [`pipeline`] composes the stages in order.

pub mod alerts;
pub mod distributions;
pub mod export;
pub mod fusion;
pub mod indices;
pub mod labeling;
pub mod pipeline;
pub mod raster;
pub mod sensors;
pub mod statistics;

pub use alerts::evaluate;
pub use distributions::{bounded_log_normal, bounded_normal, generate_dataset, DatasetProfile};
pub use export::{image_report, text_report};
pub use fusion::{fuse_features, standardize};
pub use labeling::classify;
pub use pipeline::{DataSource, FieldSnapshot};
pub use raster::{ramp_color, render_base_field, render_scalar_map};
pub use statistics::compute_stats;
