//! End-to-end tests: netlist text to branch currents.

use std::path::Path;

use approx::assert_abs_diff_eq;
use nodal_ac::algebra::{Complex, ComplexMatrix, FormMode, FormatConfig};
use nodal_ac::circuit::{BranchId, NodeId};
use nodal_ac::netlist;
use nodal_ac::solver::{self, InversionMethod, NodalSolution, NodalSolver, SolverConfig};
use nodal_ac::NodalError;

/// Reference currents for `demos/circuit_ac_sample.txt` (re, im).
const SAMPLE_CURRENTS: [(f64, f64); 6] = [
    (5.584614399102654, -1.061757478631609),
    (4.071006097002116, -0.6532257226626509),
    (3.597091308664859, 0.2642795772704025),
    (3.37864880319652, -1.1442521786985567),
    (-2.705965595906134, 0.7835307037174919),
    (-0.21844250546833935, -1.4085317559689585),
];

/// Reference node potentials for the same circuit, nodes 1..3.
const SAMPLE_POTENTIALS: [(f64, f64); 3] = [
    (-29.10126385137268, 47.51751417634789),
    (-0.8737700218733586, -25.634127023875834),
    (-8.16428605363092, 59.05212352947974),
];

fn sample_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/circuit_ac_sample.txt")
}

/// Helper: parse + build + solve
fn solve_text(text: &str, method: InversionMethod) -> NodalSolution {
    let netlist = netlist::parse(text).expect("parse failed");
    let graph = netlist.to_graph().expect("graph failed");
    NodalSolver::with_config(SolverConfig::new().with_inversion(method))
        .solve(&graph)
        .expect("solve failed")
}

fn assert_column_close(column: &ComplexMatrix, expected: &[(f64, f64)], eps: f64) {
    assert_eq!(column.shape(), (expected.len(), 1));
    for (k, &(re, im)) in expected.iter().enumerate() {
        let z = column.get(k, 0).unwrap();
        assert_abs_diff_eq!(z.re(), re, epsilon = eps);
        assert_abs_diff_eq!(z.im(), im, epsilon = eps);
    }
}

// ── Golden Sample ─────────────────────────────────────────────────

#[test]
fn test_sample_matches_reference_currents() {
    let netlist = netlist::parse_file(&sample_path()).unwrap();
    assert_eq!(netlist.records.len(), 6);

    let graph = netlist.to_graph().unwrap();
    assert_eq!(graph.nodes_count(), 4);
    assert_eq!(graph.branches_count(), 6);

    let currents = solver::solve(&graph).unwrap();
    assert_column_close(&currents, &SAMPLE_CURRENTS, 1e-4);
}

#[test]
fn test_sample_potentials_and_kcl() {
    let text = std::fs::read_to_string(sample_path()).unwrap();
    let solution = solve_text(&text, InversionMethod::Cofactor);
    assert_column_close(solution.potentials(), &SAMPLE_POTENTIALS, 1e-4);
    assert_eq!(solution.potential(NodeId(3)), Some(Complex::ZERO));

    let graph = netlist::parse(&text).unwrap().to_graph().unwrap();
    assert!(solution.kcl_residual(&graph).unwrap() < 1e-9);
}

#[test]
fn test_sample_elimination_within_tolerance() {
    let text = std::fs::read_to_string(sample_path()).unwrap();
    let cofactor = solve_text(&text, InversionMethod::Cofactor);
    let elimination = solve_text(&text, InversionMethod::Elimination);
    for k in 0..SAMPLE_CURRENTS.len() {
        let a = cofactor.current(BranchId(k)).unwrap();
        let b = elimination.current(BranchId(k)).unwrap();
        assert!((a - b).abs() < 1e-9, "branch {} differs by {}", k + 1, (a - b).abs());
    }
}

#[test]
fn test_sample_auto_switches_without_changing_result() {
    let text = std::fs::read_to_string(sample_path()).unwrap();
    // Six branches: diag(Z) exceeds an order-4 cofactor limit, A·G·Aᵗ does not
    let solution = solve_text(&text, InversionMethod::Auto { max_cofactor_order: 4 });
    assert_column_close(solution.currents(), &SAMPLE_CURRENTS, 1e-4);
}

// ── Small Circuits ────────────────────────────────────────────────

#[test]
fn test_ohms_law_single_loop() {
    // Source branch with negligible internal impedance closing a 5 Ω load:
    // I = 10∠0° / 5 Ω = 2∠0° A
    let text = "\
Ohm's law check
N BE R XL XC E phiE J phiJ
1 21 1u 0 0 10 0 0 0
2 12 5  0 0 0  0 0 0
";
    let solution = solve_text(text, InversionMethod::Cofactor);
    let load = solution.current(BranchId(1)).unwrap();
    assert_abs_diff_eq!(load.abs(), 2.0, epsilon = 1e-5);
    assert_abs_diff_eq!(load.arg(), 0.0, epsilon = 1e-5);
}

#[test]
fn test_open_branch_carries_no_current() {
    let text = "\
Single branch, node 2 is the reference
N BE R XL XC E phiE J phiJ
1 12 5 0 0 10 0 0 0
";
    let solution = solve_text(text, InversionMethod::Cofactor);
    assert!(solution.current(BranchId(0)).unwrap().abs() < 1e-12);
}

#[test]
fn test_rlc_series_resonance() {
    // XL == XC: the loop impedance is purely resistive
    let text = "\
Series RLC at resonance
N BE R XL XC E phiE J phiJ
1 21 2 0  0  12 30 0 0
2 12 4 50 50 0  0  0 0
";
    let solution = solve_text(text, InversionMethod::Cofactor);
    let i = solution.current(BranchId(1)).unwrap();
    assert_abs_diff_eq!(i.abs(), 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(i.arg(), 30.0, epsilon = 1e-7);
}

#[test]
fn test_rendered_output() {
    let text = "\
Divider
N BE R XL XC E phiE J phiJ
1 21 3 0 0 10 0 0 0
2 12 0 4 0 0  0 0 0
";
    let solution = solve_text(text, InversionMethod::Cofactor);

    let algebraic = solution.currents().render(&FormatConfig::new().with_precision(2));
    assert_eq!(algebraic, "1.20-1.60j\n1.20-1.60j\n");

    let exponential = solution
        .currents()
        .render(&FormatConfig::new().with_mode(FormMode::Exponential).with_precision(1));
    assert_eq!(exponential, "2.0e^(-53.1j)\n2.0e^(-53.1j)\n");
}

// ── Failures ──────────────────────────────────────────────────────

#[test]
fn test_zero_impedance_branch_is_singular() {
    let text = "\
Shorted branch
N BE R XL XC E phiE J phiJ
1 12 0 5 5 1 0 0 0
2 12 1 0 0 0 0 0 0
";
    let graph = netlist::parse(text).unwrap().to_graph().unwrap();
    assert!(matches!(solver::solve(&graph), Err(NodalError::SingularMatrix)));
}

#[test]
fn test_truncated_netlist_is_rejected() {
    let text = "\
Truncated
N BE R XL XC E phiE J phiJ
1 12 1 0 0 1 0 0 0
2 21 1 0
";
    let err = netlist::parse(text).unwrap_err();
    assert!(matches!(err, NodalError::IncompleteRecord { line: 4, found: 4 }));
    assert!(err.is_ingestion_failure());
}

#[test]
fn test_empty_netlist_cannot_be_solved() {
    let graph = netlist::parse("only\nheaders\n").unwrap().to_graph().unwrap();
    assert!(matches!(solver::solve(&graph), Err(NodalError::EmptyCircuit)));
}
