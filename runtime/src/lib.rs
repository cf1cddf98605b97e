//! Strategy digest: turns a folder of generated backtest report pages into
//! the JSON data file behind the strategy showcase site.
//!
//! - [`report`] parses a single report page into a [`report::StrategyRecord`].
//! - [`digest`] runs the folder scan, writes the JSON array and summarizes it.
//! - [`config`] resolves the input folder and output file.

pub mod cli;
pub mod config;
pub mod digest;
pub mod report;
