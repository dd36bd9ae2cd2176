//! Result output for the CLI frontend.
//!
//! Writes the solved quantities as fixed-width columns to stdout.

use std::io::{self, Write};

use crate::algebra::FormatConfig;
use crate::error::{NodalError, Result};
use crate::solver::NodalSolution;

/// What to include besides the branch currents.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Also print node potentials F
    pub potentials: bool,
    /// Also print branch voltages U
    pub voltages: bool,
}

/// Render the report as text.
///
/// With no extra sections this is exactly the current column; otherwise
/// each column gets a one-line heading.
pub fn render_report(
    solution: &NodalSolution,
    format: &FormatConfig,
    options: &ReportOptions,
) -> String {
    if !options.potentials && !options.voltages {
        return solution.currents().render(format);
    }

    let mut out = String::new();
    if options.potentials {
        out.push_str("F:\n");
        out.push_str(&solution.potentials().render(format));
    }
    if options.voltages {
        out.push_str("U:\n");
        out.push_str(&solution.voltages().render(format));
    }
    out.push_str("IR:\n");
    out.push_str(&solution.currents().render(format));
    out
}

/// Write the report to stdout.
pub fn print_report(
    solution: &NodalSolution,
    format: &FormatConfig,
    options: &ReportOptions,
) -> Result<()> {
    let text = render_report(solution, format, options);
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| NodalError::OutputError {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{BranchRecord, CircuitGraph};
    use crate::solver::NodalSolver;

    fn solved() -> NodalSolution {
        let graph = CircuitGraph::from_records(&[
            BranchRecord::passive(1, 2, 10.0, 0.0).with_current_source(1.0, 0.0),
            BranchRecord::passive(1, 2, 10.0, 0.0),
        ])
        .unwrap();
        NodalSolver::new().solve(&graph).unwrap()
    }

    #[test]
    fn test_plain_report_is_current_column() {
        let format = FormatConfig::new().with_precision(2);
        let text = render_report(&solved(), &format, &ReportOptions::default());
        assert_eq!(text, "     -0.50\n     -0.50\n");
    }

    #[test]
    fn test_sections() {
        let format = FormatConfig::new().with_precision(1);
        let options = ReportOptions {
            potentials: true,
            voltages: false,
        };
        let text = render_report(&solved(), &format, &options);
        assert_eq!(text, "F:\n      -5.0\nIR:\n      -0.5\n      -0.5\n");
    }
}
