//! nodal-ac - AC circuit solver
//!
//! Reads a netlist, solves it by node-potential analysis and prints the
//! branch currents.
//!
//! # Usage
//!
//! ```bash
//! nodal-ac demos/circuit_ac_sample.txt --form exponential
//! RUST_LOG=debug nodal-ac demos/circuit_ac_sample.txt --potentials
//! ```

use std::path::PathBuf;

use clap::Parser;
use nodal_ac::{
    algebra::{FormMode, FormatConfig, DEFAULT_PRECISION},
    error::Result,
    netlist,
    report::{print_report, ReportOptions},
    solver::{InversionMethod, NodalSolver, SolverConfig},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Steady-state AC circuit solver (node-potential method)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file
    #[arg(value_name = "NETLIST")]
    netlist: PathBuf,

    /// Output form: algebraic (a+bj) or exponential (re^(θj))
    #[arg(short, long, default_value_t = FormMode::Algebraic)]
    form: FormMode,

    /// Digits after the decimal point
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: usize,

    /// Matrix inversion method: cofactor, elimination or auto
    #[arg(short, long, default_value = "auto")]
    method: InversionMethod,

    /// Also print node potentials
    #[arg(long)]
    potentials: bool,

    /// Also print branch voltages
    #[arg(long)]
    voltages: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Parse the netlist and build the circuit graph
    let netlist = netlist::parse_file(&args.netlist)?;
    let graph = netlist.to_graph()?;
    info!(
        nodes = graph.nodes_count(),
        branches = graph.branches_count(),
        "circuit loaded"
    );

    // Solve
    let solver = NodalSolver::with_config(SolverConfig::new().with_inversion(args.method));
    let solution = solver.solve(&graph)?;

    // Print
    let format = FormatConfig::new()
        .with_mode(args.form)
        .with_precision(args.precision);
    let options = ReportOptions {
        potentials: args.potentials,
        voltages: args.voltages,
    };
    print_report(&solution, &format, &options)?;

    Ok(())
}
