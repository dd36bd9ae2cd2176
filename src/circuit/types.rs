//! Core types for circuit representation.

use std::fmt;

use crate::algebra::Complex;
use crate::error::{NodalError, Result};

/// A node in the circuit graph (0-based).
///
/// Netlists number nodes from 1; the conversion happens in
/// [`Branch::from_record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shown with the netlist's 1-based numbering
        write!(f, "N{}", self.0 + 1)
    }
}

/// Position of a branch in the circuit graph (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchId(pub usize);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0 + 1)
    }
}

/// A branch exactly as supplied by ingestion, with 1-based node numbers
/// and raw element values.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchRecord {
    /// Source line for error reporting
    pub line: usize,
    /// Start node (1-based)
    pub begin: usize,
    /// End node (1-based)
    pub end: usize,
    /// Resistance R in ohms
    pub resistance: f64,
    /// Inductive reactance XL in ohms
    pub inductive_reactance: f64,
    /// Capacitive reactance XC in ohms
    pub capacitive_reactance: f64,
    /// Voltage source magnitude
    pub emf_magnitude: f64,
    /// Voltage source phase in degrees
    pub emf_angle: f64,
    /// Current source magnitude
    pub current_magnitude: f64,
    /// Current source phase in degrees
    pub current_angle: f64,
}

impl BranchRecord {
    /// A passive branch with only an impedance.
    pub fn passive(begin: usize, end: usize, resistance: f64, reactance: f64) -> Self {
        Self {
            line: 0,
            begin,
            end,
            resistance,
            inductive_reactance: reactance.max(0.0),
            capacitive_reactance: (-reactance).max(0.0),
            emf_magnitude: 0.0,
            emf_angle: 0.0,
            current_magnitude: 0.0,
            current_angle: 0.0,
        }
    }

    /// Attach a voltage source `magnitude∠angle°`.
    pub fn with_emf(mut self, magnitude: f64, angle: f64) -> Self {
        self.emf_magnitude = magnitude;
        self.emf_angle = angle;
        self
    }

    /// Attach a current source `magnitude∠angle°`.
    pub fn with_current_source(mut self, magnitude: f64, angle: f64) -> Self {
        self.current_magnitude = magnitude;
        self.current_angle = angle;
        self
    }
}

/// A directed branch of the circuit graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Node the branch leaves
    pub begin: NodeId,
    /// Node the branch enters
    pub end: NodeId,
    /// Z = R + j(XL - XC)
    pub impedance: Complex,
    /// Series voltage source E
    pub voltage_source: Complex,
    /// Parallel current source J
    pub current_source: Complex,
}

impl Branch {
    /// Convert an ingested record: 1-based nodes become 0-based, the three
    /// element values combine into one impedance, sources become phasors.
    pub fn from_record(record: &BranchRecord) -> Result<Self> {
        let node = |value: usize| {
            value
                .checked_sub(1)
                .map(NodeId)
                .ok_or(NodalError::InvalidNode {
                    line: record.line,
                    value,
                })
        };

        let impedance = Complex::from_real(record.resistance)
            + Complex::J * record.inductive_reactance
            - Complex::J * record.capacitive_reactance;

        Ok(Self {
            begin: node(record.begin)?,
            end: node(record.end)?,
            impedance,
            voltage_source: Complex::from_polar(record.emf_magnitude, record.emf_angle),
            current_source: Complex::from_polar(record.current_magnitude, record.current_angle),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_branch_from_record() {
        let record = BranchRecord {
            line: 3,
            begin: 1,
            end: 3,
            resistance: 10.0,
            inductive_reactance: 8.0,
            capacitive_reactance: 2.0,
            emf_magnitude: 100.0,
            emf_angle: 30.0,
            current_magnitude: 2.0,
            current_angle: -90.0,
        };
        let branch = Branch::from_record(&record).unwrap();
        assert_eq!(branch.begin, NodeId(0));
        assert_eq!(branch.end, NodeId(2));
        assert_abs_diff_eq!(branch.impedance.re(), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(branch.impedance.im(), 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(branch.voltage_source.abs(), 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(branch.voltage_source.arg(), 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(branch.current_source.im(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_node_zero_rejected() {
        let record = BranchRecord::passive(0, 2, 1.0, 0.0);
        assert!(matches!(
            Branch::from_record(&record),
            Err(NodalError::InvalidNode { value: 0, .. })
        ));
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(NodeId(0).to_string(), "N1");
        assert_eq!(BranchId(4).to_string(), "B5");
    }
}
