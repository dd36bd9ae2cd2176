//! Netlist ingestion.
//!
//! The netlist is a plain text file: two free-form header lines followed by
//! whitespace-separated branch records. Records may be laid out one per
//! line or wrapped across lines; only the field order matters.
//!
//! # Record Layout
//!
//! ```text
//! index  BE  R  XL  XC  E  φE  J  φJ
//! ```
//!
//! | Field | Meaning |
//! |-------|---------|
//! | index | Branch number, 1, 2, 3, ... in order |
//! | BE    | Begin and end node packed as two digits (`13` is node 1 → node 3) |
//! | R     | Resistance, Ω |
//! | XL    | Inductive reactance, Ω |
//! | XC    | Capacitive reactance, Ω |
//! | E, φE | Voltage source magnitude and phase in degrees |
//! | J, φJ | Current source magnitude and phase in degrees |
//!
//! Numbers accept SPICE-style suffixes (`p n u m k M G`). `#` and `;` start
//! a comment that runs to the end of the line.
//!
//! # Example
//!
//! ```text
//! Two-node sample
//! N  BE  R  XL  XC  E  phiE  J  phiJ
//! 1  12  3  0   0   10 0     0  0
//! 2  21  0  4   0   0  0     0  0
//! ```

mod lexer;
mod parser;

pub use lexer::{parse_value, Field, Lexer};
pub use parser::{Parser, RECORD_FIELDS};

use tracing::debug;

use crate::circuit::{BranchRecord, CircuitGraph};
use crate::error::{NodalError, Result};

/// Number of free-form header lines before the records.
pub const HEADER_LINES: usize = 2;

/// A parsed netlist.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    /// The header lines, verbatim
    pub header: Vec<String>,
    /// Branch records in file order
    pub records: Vec<BranchRecord>,
}

impl Netlist {
    /// Build the circuit graph from the records.
    pub fn to_graph(&self) -> Result<CircuitGraph> {
        CircuitGraph::from_records(&self.records)
    }
}

/// Parse netlist text.
pub fn parse(input: &str) -> Result<Netlist> {
    let mut header = Vec::with_capacity(HEADER_LINES);
    let mut body = input;
    for _ in 0..HEADER_LINES {
        if body.is_empty() {
            break;
        }
        let (line, rest) = body.split_once('\n').unwrap_or((body, ""));
        header.push(line.trim_end_matches('\r').to_string());
        body = rest;
    }

    let lexer = Lexer::starting_at_line(body, header.len() + 1);
    let records = Parser::new(lexer).parse()?;
    debug!(records = records.len(), "netlist parsed");

    Ok(Netlist { header, records })
}

/// Parse a netlist file.
pub fn parse_file(path: &std::path::Path) -> Result<Netlist> {
    let content = std::fs::read_to_string(path).map_err(|e| NodalError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_skipped() {
        let input = concat!(
            "Цепь переменного тока\n",
            "N BE R XL XC E fE J fJ\n",
            "1 12 3 0 0 10 0 0 0\n",
            "2 21 0 4 0 0 0 0 0\n",
        );
        let netlist = parse(input).unwrap();
        assert_eq!(netlist.header.len(), 2);
        assert_eq!(netlist.header[1], "N BE R XL XC E fE J fJ");
        assert_eq!(netlist.records.len(), 2);
        assert_eq!(netlist.records[0].line, 3);

        let graph = netlist.to_graph().unwrap();
        assert_eq!(graph.nodes_count(), 2);
        assert_eq!(graph.branches_count(), 2);
    }

    #[test]
    fn test_error_lines_count_headers() {
        let err = parse("title\ncolumns\n1 12 3 0 0 10 0 0 0\n2 2x").unwrap_err();
        assert!(matches!(err, NodalError::LexerError { line: 4, column: 3, .. }));
        assert!(err.is_ingestion_failure());
    }

    #[test]
    fn test_zero_node_rejected_by_graph() {
        let netlist = parse("a\nb\n1 10 1 0 0 0 0 0 0\n").unwrap();
        assert!(matches!(
            netlist.to_graph(),
            Err(NodalError::InvalidNode { line: 3, value: 0 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = parse_file(std::path::Path::new("/nonexistent/netlist.txt")).unwrap_err();
        assert!(matches!(err, NodalError::FileReadError { .. }));
    }
}
