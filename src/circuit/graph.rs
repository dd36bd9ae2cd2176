//! Circuit graph structure.

use tracing::trace;

use super::types::{Branch, BranchId, BranchRecord, NodeId};
use crate::algebra::{Complex, ComplexMatrix};
use crate::error::{NodalError, Result};

/// A directed graph of circuit branches, ready for nodal analysis.
///
/// The node count is derived from the branches: it is one more than the
/// highest 0-based endpoint seen so far. The highest-numbered node is the
/// reference and has no row in the reduced incidence matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CircuitGraph {
    branches: Vec<Branch>,
    nodes_count: usize,
}

impl CircuitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from ingested records, in order.
    pub fn from_records(records: &[BranchRecord]) -> Result<Self> {
        let mut graph = Self::new();
        for record in records {
            let branch = Branch::from_record(record)?;
            trace!(
                line = record.line,
                begin = record.begin,
                end = record.end,
                "ingested branch"
            );
            graph.push(branch);
        }
        Ok(graph)
    }

    /// Append a branch, growing the node count if it touches a new node.
    pub fn push(&mut self, branch: Branch) {
        self.nodes_count = self
            .nodes_count
            .max(branch.begin.0 + 1)
            .max(branch.end.0 + 1);
        self.branches.push(branch);
    }

    /// All branches in ingestion order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Look up a branch.
    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.0)
    }

    /// Number of branches.
    pub fn branches_count(&self) -> usize {
        self.branches.len()
    }

    /// Number of nodes, including the reference node.
    pub fn nodes_count(&self) -> usize {
        self.nodes_count
    }

    /// The reference (ground) node: the highest-numbered one.
    pub fn reference_node(&self) -> Option<NodeId> {
        self.nodes_count.checked_sub(1).map(NodeId)
    }

    fn ensure_solvable_shape(&self) -> Result<()> {
        if self.branches.is_empty() || self.nodes_count < 2 {
            return Err(NodalError::EmptyCircuit);
        }
        Ok(())
    }

    /// Reduced node-incidence matrix, `(nodes - 1) × branches`.
    ///
    /// Column `j` holds `+1` in the row of the node branch `j` leaves and
    /// `-1` in the row of the node it enters. The reference node has no row.
    pub fn incidence_matrix(&self) -> Result<ComplexMatrix> {
        self.ensure_solvable_shape()?;

        let minus_one = -Complex::ONE;
        let mut a = ComplexMatrix::zeros(self.nodes_count - 1, self.branches_count());
        for i in 0..a.height() {
            for (j, branch) in self.branches.iter().enumerate() {
                if branch.begin.0 == i {
                    a.set(i, j, Complex::ONE)?;
                } else if branch.end.0 == i {
                    a.set(i, j, minus_one)?;
                }
            }
        }
        Ok(a)
    }

    /// Column of branch impedances Z.
    pub fn impedance_vector(&self) -> ComplexMatrix {
        ComplexMatrix::column(self.branches.iter().map(|b| b.impedance).collect())
    }

    /// Column of branch voltage sources E.
    pub fn voltage_source_vector(&self) -> ComplexMatrix {
        ComplexMatrix::column(self.branches.iter().map(|b| b.voltage_source).collect())
    }

    /// Column of branch current sources J.
    pub fn current_source_vector(&self) -> ComplexMatrix {
        ComplexMatrix::column(self.branches.iter().map(|b| b.current_source).collect())
    }
}

impl FromIterator<Branch> for CircuitGraph {
    fn from_iter<I: IntoIterator<Item = Branch>>(iter: I) -> Self {
        let mut graph = CircuitGraph::new();
        for branch in iter {
            graph.push(branch);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(usize, usize)]) -> CircuitGraph {
        let records: Vec<_> = edges
            .iter()
            .map(|&(b, e)| BranchRecord::passive(b, e, 1.0, 0.0))
            .collect();
        CircuitGraph::from_records(&records).unwrap()
    }

    #[test]
    fn test_nodes_count_grows_incrementally() {
        let mut g = CircuitGraph::new();
        assert_eq!(g.nodes_count(), 0);
        g.push(Branch::from_record(&BranchRecord::passive(1, 2, 1.0, 0.0)).unwrap());
        assert_eq!(g.nodes_count(), 2);
        g.push(Branch::from_record(&BranchRecord::passive(4, 1, 1.0, 0.0)).unwrap());
        assert_eq!(g.nodes_count(), 4);
        g.push(Branch::from_record(&BranchRecord::passive(2, 3, 1.0, 0.0)).unwrap());
        assert_eq!(g.nodes_count(), 4);
        assert_eq!(g.branches_count(), 3);
        assert_eq!(g.reference_node(), Some(NodeId(3)));
    }

    #[test]
    fn test_incidence_matrix() {
        // 1→2, 2→3, 1→3 ; node 3 is the reference
        let g = graph(&[(1, 2), (2, 3), (1, 3)]);
        let a = g.incidence_matrix().unwrap();
        assert_eq!(a.shape(), (2, 3));

        let expected = [[1.0, 0.0, 1.0], [-1.0, 1.0, 0.0]];
        for (i, row) in expected.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert_eq!(a.get(i, j).unwrap().re(), v, "entry ({}, {})", i, j);
            }
        }
    }

    #[test]
    fn test_source_vectors() {
        let records = vec![
            BranchRecord::passive(1, 2, 5.0, 0.0).with_emf(10.0, 0.0),
            BranchRecord::passive(2, 1, 0.0, -4.0).with_current_source(1.0, 90.0),
        ];
        let g = CircuitGraph::from_records(&records).unwrap();
        let z = g.impedance_vector();
        assert_eq!(z.shape(), (2, 1));
        assert_eq!(z.get(0, 0).unwrap(), Complex::new(5.0, 0.0));
        assert!((z.get(1, 0).unwrap().im() + 4.0).abs() < 1e-12);
        assert_eq!(g.voltage_source_vector().get(0, 0).unwrap(), Complex::from_real(10.0));
        assert!((g.current_source_vector().get(1, 0).unwrap().arg() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_circuit() {
        assert!(matches!(
            CircuitGraph::new().incidence_matrix(),
            Err(NodalError::EmptyCircuit)
        ));
        // A self-loop on node 1 leaves no node besides the reference
        assert!(matches!(
            graph(&[(1, 1)]).incidence_matrix(),
            Err(NodalError::EmptyCircuit)
        ));
    }

    #[test]
    fn test_from_iterator() {
        let g: CircuitGraph = [(1, 3), (3, 2)]
            .iter()
            .map(|&(b, e)| Branch::from_record(&BranchRecord::passive(b, e, 2.0, 0.0)).unwrap())
            .collect();
        assert_eq!(g.nodes_count(), 3);
        assert_eq!(g.branch(BranchId(1)).map(|b| b.end), Some(NodeId(1)));
    }
}
