//! Complex scalar and dense complex matrix algebra.
//!
//! This is the numeric core of the solver:
//!
//! - [`Complex`] keeps rectangular and polar forms in sync; addition works
//!   on `x + jy`, multiplication and division on `r∠θ`.
//! - [`ComplexMatrix`] is a dense, single-owner matrix with conformability
//!   checks on every operation, cofactor determinant and adjugate inverse.
//! - [`FormatConfig`] controls how values are rendered; it is passed
//!   explicitly to every render call.

mod complex;
mod format;
mod matrix;

pub use complex::{arg, normalize, Complex, AXIS_EPSILON};
pub use format::{
    FormMode, FormatConfig, Formatted, CELL_WIDTH, DEFAULT_PRECISION, DEFAULT_ZERO_THRESHOLD,
};
pub use matrix::{ComplexMatrix, SINGULARITY_TOLERANCE};
