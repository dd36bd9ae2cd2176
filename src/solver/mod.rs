//! Node-potential (nodal analysis) solver.
//!
//! With the reduced incidence matrix `A`, branch impedances `Z`, voltage
//! sources `E` and current sources `J`, the branch currents follow in
//! closed form:
//!
//! ```text
//! G  = diag(Z)⁻¹
//! F  = (A·G·Aᵗ)⁻¹ · (−A·G·E − A·J)     node potentials
//! U  = Aᵗ·F                            branch voltages
//! IR = G·(U + E)                       currents through the impedances
//! ```
//!
//! Every step is an explicit matrix operation; there is no iteration and no
//! elimination-based linear solve unless the configuration asks for it.

mod nodal;
mod solution;

pub use nodal::{solve, InversionMethod, NodalSolver, SolverConfig};
pub use solution::NodalSolution;

/// Largest order inverted by cofactor expansion under [`InversionMethod::Auto`].
pub const DEFAULT_MAX_COFACTOR_ORDER: usize = 8;
