//! Chart draw engine for rhythm game tournaments.
//!
//! Given a catalog of songs and a config snapshot, `draw` picks a set of
//! charts honoring the configured style, difficulty, level range, flags and
//! optional per-level weights.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod buckets;
pub mod catalog;
pub mod config;
pub mod distribution;
pub mod drawing;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod projection;
pub mod rng;
pub mod sampler;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogProblem, Chart, ChartRef, Song};
pub use config::ConfigState;
pub use drawing::{Drawing, DrawnChart, Player, PlayerActionOnChart, PocketPick};
#[cfg(feature = "std")]
pub use engine::draw;
pub use engine::draw_with_rng;
pub use error::{DrawError, DrawResult};
pub use projection::EligibleChart;
pub use rng::{DrawRng, XorShiftRng};
