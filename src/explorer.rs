//! CSV column exploration.
//!
//! [`logic`] holds the loader and the per-column computations; [`session`]
//! ties them to one uploaded table.

pub mod logic;
pub mod session;

pub use session::Session;
