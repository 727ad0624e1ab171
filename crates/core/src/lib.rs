#![deny(unsafe_code)]
//! Core types for the windfield cyclone simulator.
//!
//! Provides the storm [`Track`] data model and hurdat2-derived JSON loading,
//! the fixed-resolution global [`WindGrid`], engine [`ModelConfig`] with
//! fail-fast validation, geodesy helpers, JSON parameter helpers, and the
//! Saffir-Simpson scale.

pub mod config;
pub mod error;
pub mod geo;
pub mod grid;
pub mod params;
pub mod saffir;
pub mod track;

pub use config::{ModelConfig, ModelKind};
pub use error::ModelError;
pub use grid::{GridNode, GridRect, WindGrid};
pub use saffir::SaffirCategory;
pub use track::{Observation, Track};
