//! # Nodal AC
//!
//! Steady-state AC circuit analysis by the node-potential method.
//!
//! This library provides:
//! - A phasor-capable complex scalar keeping rectangular and polar forms in sync
//! - A dense complex matrix with cofactor determinant and adjugate inverse
//! - A directed circuit graph with its reduced node-incidence matrix
//! - A closed-form nodal solver producing branch currents
//! - Netlist ingestion and result rendering for the CLI
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`algebra`] - Complex numbers, complex matrices and their rendering
//! - [`circuit`] - Branch records and the circuit graph
//! - [`solver`] - Nodal analysis over the graph's matrices
//! - [`netlist`] - Parser for the netlist text format
//! - [`report`] - Result output (CLI only)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! nodal-ac circuit.txt --form exponential --precision 4
//! ```
//!
//! ### Library
//!
//! ```rust
//! use nodal_ac::circuit::{BranchRecord, CircuitGraph};
//! use nodal_ac::solver::solve;
//!
//! // 10 V source with 3 Ω internal resistance feeding a 4 Ω inductive load
//! let graph = CircuitGraph::from_records(&[
//!     BranchRecord::passive(2, 1, 3.0, 0.0).with_emf(10.0, 0.0),
//!     BranchRecord::passive(1, 2, 0.0, 4.0),
//! ])?;
//! let currents = solve(&graph)?;
//! assert!((currents.get(1, 0)?.abs() - 2.0).abs() < 1e-9);
//! # Ok::<(), nodal_ac::NodalError>(())
//! ```
//!
//! ## Solution Method
//!
//! With `A` the reduced incidence matrix (the highest-numbered node is the
//! reference), `Z`, `E`, `J` the branch impedance, voltage source and
//! current source columns:
//!
//! 1. `G = diag(Z)⁻¹`
//! 2. `F = (A·G·Aᵗ)⁻¹ · (−A·G·E − A·J)`
//! 3. `U = Aᵗ·F`
//! 4. `IR = G·(U + E)`
//!
//! Inverses use the adjugate over recursive cofactor determinants; an
//! elimination path can be selected for large systems.

pub mod algebra;
pub mod circuit;
pub mod error;
pub mod netlist;
pub mod solver;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use algebra::{Complex, ComplexMatrix, FormMode, FormatConfig};
pub use circuit::CircuitGraph;
pub use error::{NodalError, Result};
pub use solver::{NodalSolution, NodalSolver, SolverConfig};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmNodalSolver;
