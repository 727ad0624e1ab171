#![deny(unsafe_code)]
//! Tropical cyclone surface wind-field simulation.
//!
//! This crate sits on top of `windfield-core` (data model, grid, config) and
//! provides the engine proper: the polar sampling pattern, the temporal track
//! interpolator, the Holland/NWS23 wind evaluators, the grid accumulator, and
//! the fixed-timestep clock that ties them together. The CLI depends on this
//! crate; embedders can drive [`StormEngine`] directly.

pub mod accumulate;
pub mod engine;
pub mod interp;
pub mod sampler;
pub mod state;
pub mod wind;

#[cfg(feature = "png")]
pub mod snapshot;

pub use engine::{Phase, RenderFrame, StepStatus, StormEngine};
pub use interp::{sample_track, TrackSample};
pub use sampler::{SampleBracket, SampleField, SampleGrid, SampleValue};
pub use state::ModelState;
