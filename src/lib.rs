//! The `smapseries` crate provides tools for extracting SMAP soil-moisture
//! retrievals as per-point time series on user-defined domains.

pub mod domain;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod timeseries;
pub mod volume;

#[cfg(feature = "cli")]
pub mod cli;
