//! Result of a nodal solve.

use crate::algebra::{Complex, ComplexMatrix};
use crate::circuit::{BranchId, CircuitGraph, NodeId};
use crate::error::Result;

/// Node potentials, branch voltages and branch currents of a solved circuit.
#[derive(Debug, Clone)]
pub struct NodalSolution {
    potentials: ComplexMatrix,
    voltages: ComplexMatrix,
    currents: ComplexMatrix,
}

impl NodalSolution {
    pub(crate) fn new(
        potentials: ComplexMatrix,
        voltages: ComplexMatrix,
        currents: ComplexMatrix,
    ) -> Self {
        Self {
            potentials,
            voltages,
            currents,
        }
    }

    /// Node potentials F, `(nodes - 1) × 1`, relative to the reference node.
    pub fn potentials(&self) -> &ComplexMatrix {
        &self.potentials
    }

    /// Branch voltages U, `branches × 1`.
    pub fn voltages(&self) -> &ComplexMatrix {
        &self.voltages
    }

    /// Currents through the branch impedances IR, `branches × 1`.
    pub fn currents(&self) -> &ComplexMatrix {
        &self.currents
    }

    /// Consume the solution, keeping only the current column.
    pub fn into_currents(self) -> ComplexMatrix {
        self.currents
    }

    /// Current through the impedance of one branch.
    pub fn current(&self, branch: BranchId) -> Option<Complex> {
        self.currents.get(branch.0, 0).ok()
    }

    /// Voltage across one branch.
    pub fn voltage(&self, branch: BranchId) -> Option<Complex> {
        self.voltages.get(branch.0, 0).ok()
    }

    /// Potential of a node; the reference node is at zero.
    pub fn potential(&self, node: NodeId) -> Option<Complex> {
        let reduced = self.potentials.height();
        if node.0 == reduced {
            Some(Complex::ZERO)
        } else {
            self.potentials.get(node.0, 0).ok()
        }
    }

    /// Largest current imbalance `|A·(IR + J)|` over the non-reference nodes.
    pub fn kcl_residual(&self, graph: &CircuitGraph) -> Result<f64> {
        let total = self.currents.try_add(&graph.current_source_vector())?;
        let imbalance = graph.incidence_matrix()?.matmul(&total)?;
        Ok(imbalance
            .column_values()
            .iter()
            .map(Complex::abs)
            .fold(0.0, f64::max))
    }
}
