//! Closed-form nodal analysis.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::solution::NodalSolution;
use super::DEFAULT_MAX_COFACTOR_ORDER;
use crate::algebra::ComplexMatrix;
use crate::circuit::CircuitGraph;
use crate::error::Result;

/// How matrix inverses are computed during a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionMethod {
    /// Adjugate over recursive cofactor determinants, at every order.
    Cofactor,
    /// Gauss-Jordan elimination, at every order.
    Elimination,
    /// Cofactor up to `max_cofactor_order`, elimination above it.
    Auto { max_cofactor_order: usize },
}

impl Default for InversionMethod {
    fn default() -> Self {
        Self::Auto {
            max_cofactor_order: DEFAULT_MAX_COFACTOR_ORDER,
        }
    }
}

impl FromStr for InversionMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cofactor" | "adjugate" => Ok(Self::Cofactor),
            "elimination" | "gauss" => Ok(Self::Elimination),
            "auto" => Ok(Self::default()),
            _ => Err(format!(
                "unknown inversion method '{}' (expected cofactor, elimination or auto)",
                s
            )),
        }
    }
}

impl fmt::Display for InversionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cofactor => write!(f, "cofactor"),
            Self::Elimination => write!(f, "elimination"),
            Self::Auto { max_cofactor_order } => {
                write!(f, "auto (cofactor up to {})", max_cofactor_order)
            }
        }
    }
}

/// Configuration for the solver.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Inversion strategy for `diag(Z)` and `A·G·Aᵗ`.
    pub inversion: InversionMethod,
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inversion strategy.
    ///
    /// - `Cofactor`: the reference algorithm; factorial cost in the order
    /// - `Elimination`: polynomial cost, may differ by rounding near singularity
    /// - `Auto` (default): cofactor for small systems, elimination otherwise
    pub fn with_inversion(mut self, inversion: InversionMethod) -> Self {
        self.inversion = inversion;
        self
    }
}

/// Nodal-analysis solver.
#[derive(Debug, Clone, Default)]
pub struct NodalSolver {
    config: SolverConfig,
}

impl NodalSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn invert(&self, m: &ComplexMatrix) -> Result<ComplexMatrix> {
        match self.config.inversion {
            InversionMethod::Cofactor => m.inverse(),
            InversionMethod::Elimination => m.inverse_elimination(),
            InversionMethod::Auto { max_cofactor_order } => {
                if m.order() <= max_cofactor_order {
                    m.inverse()
                } else {
                    debug!(order = m.order(), "order above cofactor limit, using elimination");
                    m.inverse_elimination()
                }
            }
        }
    }

    /// Solve the circuit for node potentials, branch voltages and currents.
    pub fn solve(&self, graph: &CircuitGraph) -> Result<NodalSolution> {
        let a = graph.incidence_matrix()?;
        let z = graph.impedance_vector();
        let e = graph.voltage_source_vector();
        let j = graph.current_source_vector();

        debug!(
            nodes = graph.nodes_count(),
            branches = graph.branches_count(),
            method = %self.config.inversion,
            "solving circuit"
        );

        // Branch conductances
        let zd = z.diag()?;
        let g = self.invert(&zd)?;

        // Node potentials relative to the reference node
        let at = a.transpose();
        let y = a.matmul(&g)?.matmul(&at)?;
        let rhs = (-&a)
            .matmul(&g)?
            .matmul(&e)?
            .try_sub(&a.matmul(&j)?)?;
        let f = self.invert(&y)?.matmul(&rhs)?;
        debug!(shape = ?f.shape(), "node potentials computed");

        // Branch voltages, then currents through the impedances
        let u = at.matmul(&f)?;
        let ir = g.matmul(&u.try_add(&e)?)?;

        Ok(NodalSolution::new(f, u, ir))
    }
}

/// Branch currents of `graph` with the default solver configuration.
pub fn solve(graph: &CircuitGraph) -> Result<ComplexMatrix> {
    NodalSolver::new().solve(graph).map(NodalSolution::into_currents)
}
