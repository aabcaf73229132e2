//! # Cropwatch Backend
//!
//! Per-pixel crop-field monitoring engine.
//!
//! This crate synthesizes per-pixel vegetation and soil datasets, derives
//! statistics, stress/pest-risk labels and rule-based alerts from them, and
//! renders color-ramp index maps and composited overlays as RGBA buffers for a
//! monitoring dashboard. The backend exposes a REST API via Axum.
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Datasets, image shapes and sensor series
//! - [`services`]: Generation, statistics, labeling, alerts, rendering and export
//! - [`store`]: The single active snapshot and its checksum
//! - [`config`]: TOML configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route-specific data types and path constants
//!
//! ## Data flow
//!
//! ```text
//! generate -> statistics -> labels -> alerts -> checksum -> publish
//!                                                              |
//!                                       render / export <- snapshot
//! ```

pub mod api;
pub mod config;
pub mod models;

pub mod routes;

pub mod services;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;
