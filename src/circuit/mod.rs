//! Circuit graph representation.
//!
//! Ingestion yields [`BranchRecord`]s with 1-based node numbers and raw
//! element values; [`CircuitGraph`] turns them into directed [`Branch`]es
//! and exposes the matrices nodal analysis is built from: the reduced
//! incidence matrix and the Z, E and J columns.

mod graph;
mod types;

pub use graph::CircuitGraph;
pub use types::*;
