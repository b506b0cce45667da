//! aadplot: summary charts for authenticated-dictionary benchmark logs.
//!
//! The benchmarks write CSV logs of proof sizes, verification times and
//! append times. Every chart goes through the same pipeline:
//!
//! 1. `loader` reads and merges the logs, rejecting mismatched schemas;
//! 2. `aggregate` averages rows sharing a key;
//! 3. `normalize` converts bytes to KB and microseconds to coarser units;
//! 4. `series` extracts one line per key value;
//! 5. `chart` describes the figure and renders it as PNG.
//!
//! The `pipeline` module wires these steps together for each binary.
#![recursion_limit = "1024"]
#![deny(missing_docs)]

extern crate average;
extern crate chrono;
extern crate csv;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate plotters;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate structopt;
extern crate toml;

#[cfg(test)]
extern crate tempfile;

pub mod errors;
pub mod record;
pub mod loader;
pub mod aggregate;
pub mod normalize;
pub mod series;
pub mod axis;
mod setting;
pub mod chart;
pub mod pipeline;
pub mod cli;

pub use axis::AxisScale;
pub use chart::{Chart, PngRenderer, Render};
pub use errors::{Error, ErrorKind, Result};
pub use normalize::Normalized;
pub use record::{Column, Record};
pub use series::{Series, SeriesSpec};
pub use setting::ChartStyle;
