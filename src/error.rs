//! Error types for the nodal AC solver.
//!
//! This module provides a unified error type [`NodalError`] that covers
//! all error conditions that can occur during matrix algebra, circuit
//! construction, netlist ingestion, and solving.

use thiserror::Error;

/// Result type alias using [`NodalError`].
pub type Result<T> = std::result::Result<T, NodalError>;

/// Unified error type for all solver operations.
#[derive(Error, Debug)]
pub enum NodalError {
    // ============ Matrix Algebra Errors ============
    /// Operands of an elementwise or product operation are not conformable
    #[error("Dimension mismatch in {op}: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Operation requires a square matrix
    #[error("{op}() requires a square matrix, got {height}x{width}")]
    NotSquare {
        op: &'static str,
        height: usize,
        width: usize,
    },

    /// Diagonal build requires a single column
    #[error("diag() requires column vector, got {height}x{width}")]
    NotColumn { height: usize, width: usize },

    /// Element access outside the matrix bounds
    #[error("Index ({row}, {col}) out of range for {height}x{width} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    /// Nested literal with rows of different widths
    #[error("invalid size: row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Matrix is singular and cannot be inverted
    #[error("Singular matrix - zero impedance branch or a node with no path to the reference node")]
    SingularMatrix,

    // ============ Circuit Errors ============
    /// Branch endpoint outside the 1-based node numbering
    #[error("Invalid node number {value} at line {line} (nodes are numbered from 1)")]
    InvalidNode { line: usize, value: usize },

    /// Circuit has no branches or no node besides the reference
    #[error("Circuit needs at least one branch and two nodes")]
    EmptyCircuit,

    // ============ Ingestion Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Input ended in the middle of a branch record
    #[error("Incomplete branch record at line {line}: {found} of 9 fields present")]
    IncompleteRecord { line: usize, found: usize },

    /// Error reading the netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing results
    #[error("Output error: {message}")]
    OutputError { message: String },
}

impl NodalError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        Self::DimensionMismatch { op, left, right }
    }

    /// Create a not-square error
    pub fn not_square(op: &'static str, height: usize, width: usize) -> Self {
        Self::NotSquare { op, height, width }
    }

    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Whether this error came from reading the external netlist.
    pub fn is_ingestion_failure(&self) -> bool {
        matches!(
            self,
            Self::LexerError { .. }
                | Self::ParseError { .. }
                | Self::IncompleteRecord { .. }
                | Self::FileReadError { .. }
                | Self::InvalidNode { .. }
        )
    }
}
