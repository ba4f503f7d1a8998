//! Deterministic elector apportionment over county-level presidential returns.
//!
//! `elector-apportion` distributes a fixed elector pool across states with the
//! Huntington-Hill method, then splits each state's electors among candidates
//! with the Sainte-Lague method. Both apportioners are pure functions:
//! identical inputs always produce identical outputs, tie-breaks included.
//!
//! The [`dataset`] module reads and aggregates the raw CSV; the core in
//! [`apportion`] never touches files.

pub mod apportion;
pub mod config;
pub mod dataset;
pub mod pipeline;
pub mod types;

pub use config::ApportionConfig;
pub use pipeline::{apportion_electors, ElectorApportioner};
