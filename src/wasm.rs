//! WASM bindings for the nodal AC solver.
//!
//! This module provides JavaScript-friendly bindings for use in web pages
//! that solve a netlist typed or uploaded by the user.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmNodalSolver } from 'nodal_ac';
//!
//! await init();
//!
//! const netlist = `Divider
//! N BE R XL XC E phiE J phiJ
//! 1 21 3 0 0 10 0 0 0
//! 2 12 0 4 0 0  0 0 0
//! `;
//!
//! const solver = new WasmNodalSolver(netlist);
//! const currents = solver.currents();   // [re0, im0, re1, im1, ...]
//! console.log(solver.render(true));     // exponential form
//! ```

use wasm_bindgen::prelude::*;

use crate::algebra::{FormMode, FormatConfig};
use crate::netlist;
use crate::solver::{NodalSolution, NodalSolver};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// WASM-compatible circuit solver.
///
/// Parses and solves the netlist once on construction; the accessors read
/// the stored solution.
#[wasm_bindgen]
pub struct WasmNodalSolver {
    solution: NodalSolution,
    branches: usize,
}

#[wasm_bindgen]
impl WasmNodalSolver {
    /// Parse and solve a netlist.
    ///
    /// # Arguments
    /// * `netlist_text` - The netlist, including its two header lines
    ///
    /// # Returns
    /// A solved `WasmNodalSolver` or an error if the netlist is invalid or
    /// the circuit is singular.
    #[wasm_bindgen(constructor)]
    pub fn new(netlist_text: &str) -> Result<WasmNodalSolver, JsValue> {
        let to_js = |e: crate::error::NodalError| JsValue::from_str(&e.to_string());

        let graph = netlist::parse(netlist_text)
            .and_then(|n| n.to_graph())
            .map_err(to_js)?;
        let solution = NodalSolver::new().solve(&graph).map_err(to_js)?;

        Ok(WasmNodalSolver {
            solution,
            branches: graph.branches_count(),
        })
    }

    /// Number of branches in the solved circuit.
    #[wasm_bindgen(getter)]
    pub fn branches(&self) -> usize {
        self.branches
    }

    /// Branch currents as interleaved real and imaginary parts.
    #[wasm_bindgen]
    pub fn currents(&self) -> Vec<f64> {
        self.solution
            .currents()
            .column_values()
            .iter()
            .flat_map(|z| [z.re(), z.im()])
            .collect()
    }

    /// Node potentials as interleaved real and imaginary parts.
    #[wasm_bindgen]
    pub fn potentials(&self) -> Vec<f64> {
        self.solution
            .potentials()
            .column_values()
            .iter()
            .flat_map(|z| [z.re(), z.im()])
            .collect()
    }

    /// Render the current column as text.
    ///
    /// # Arguments
    /// * `exponential` - Use `re^(θj)` instead of `a+bj`
    #[wasm_bindgen]
    pub fn render(&self, exponential: bool) -> String {
        let mode = if exponential {
            FormMode::Exponential
        } else {
            FormMode::Algebraic
        };
        self.solution
            .currents()
            .render(&FormatConfig::new().with_mode(mode))
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
