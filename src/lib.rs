//! # colscope - CSV column explorer
//!
//! colscope loads a CSV upload into an immutable table and explores one
//! column at a time: descriptive statistics, the most frequent values and a
//! distribution chart.
//!
//! ## Quick Start
//!
//! ```no_run
//! use colscope::config::Settings;
//! use colscope::explorer::Session;
//!
//! # fn example() -> colscope::error::Result<()> {
//! let mut session = Session::new(Settings::default());
//! session.upload(&std::fs::read("sales.csv")?)?;
//!
//! let report = session.explore_numeric("amount")?;
//! for row in report.summary_rows() {
//!     println!("{}: {}", row.label, row.value);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`explorer`]: Upload session and the column profiling pipeline
//!   - [`explorer::logic`]: Loader, classifier, profilers, ranker and binner
//! - [`config`]: Persistent settings
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: `tracing` subscriber setup for the binary
//! - [`utils`]: Display formatting helpers
//!
//! ## Missing data
//!
//! A column without any value profiles to a summary whose metrics are all
//! `None` (shown as `—`), an empty frequency table and no histogram bins. It
//! is never an error.

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod explorer;
pub mod logging;
pub mod utils;
