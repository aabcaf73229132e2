pub mod dataset;
pub mod sensor;

pub use dataset::*;
pub use sensor::*;
