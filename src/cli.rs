//! Command line interface.

pub mod build;
pub mod domain;
pub mod flags;
pub mod run;
pub mod timeseries;
pub mod utils;
