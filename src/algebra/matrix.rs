//! Dense complex matrix.
//!
//! Storage is a single row-major buffer with explicit dimensions. `Clone`
//! is a deep copy and every operation returns a fresh matrix, so no two
//! matrices ever share storage.
//!
//! The determinant and inverse use recursive cofactor (Laplace) expansion
//! along column 0 and the classical adjugate. Gaussian elimination variants
//! are provided separately for large orders where the cofactor method
//! becomes impractical. Both share one singularity test, so they accept the
//! same matrices and differ only by rounding in the entries.

use std::fmt;
use std::ops::{Mul, Neg};

use super::format::{FormatConfig, CELL_WIDTH};
use super::Complex;
use crate::error::{NodalError, Result};

/// Relative determinant threshold (against the Hadamard bound) below which
/// a matrix is considered singular.
pub const SINGULARITY_TOLERANCE: f64 = 1e-12;

/// `(-1)^k` as a complex scalar.
fn sign(k: usize) -> Complex {
    if k % 2 == 0 {
        Complex::ONE
    } else {
        Complex::from_real(-1.0)
    }
}

/// Dense matrix of [`Complex`] values.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexMatrix {
    height: usize,
    width: usize,
    data: Vec<Complex>,
}

impl ComplexMatrix {
    /// Create an `height × width` matrix with every entry set to `value`.
    pub fn filled(height: usize, width: usize, value: Complex) -> Self {
        Self {
            height,
            width,
            data: vec![value; height * width],
        }
    }

    /// Create an all-zero matrix.
    pub fn zeros(height: usize, width: usize) -> Self {
        Self::filled(height, width, Complex::ZERO)
    }

    /// Create the `n × n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = Complex::ONE;
        }
        m
    }

    /// Create from nested rows; all rows must have the same width.
    pub fn from_rows(rows: Vec<Vec<Complex>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(height * width);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(NodalError::RaggedRows {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            data.extend(row);
        }

        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Create an `n × 1` column vector.
    pub fn column(values: Vec<Complex>) -> Self {
        Self {
            height: values.len(),
            width: 1,
            data: values,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Order of a square matrix, or 0 for a rectangular one.
    pub fn order(&self) -> usize {
        if self.height == self.width {
            self.height
        } else {
            0
        }
    }

    /// Whether the matrix is square and non-empty.
    pub fn is_square(&self) -> bool {
        self.order() > 0
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.height && col < self.width {
            Ok(row * self.width + col)
        } else {
            Err(NodalError::IndexOutOfRange {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Complex> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.data[idx])
    }

    /// Mutable reference to the entry at `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut Complex> {
        let idx = self.check_bounds(row, col)?;
        Ok(&mut self.data[idx])
    }

    /// Overwrite the entry at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: Complex) -> Result<()> {
        let idx = self.check_bounds(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    // In-bounds access for internal loops.
    fn at(&self, row: usize, col: usize) -> Complex {
        self.data[row * self.width + col]
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Complex]> {
        // chunks() panics on a zero chunk size
        self.data.chunks(self.width.max(1)).take(self.height)
    }

    /// Entries of the first column, top to bottom.
    pub fn column_values(&self) -> Vec<Complex> {
        if self.width == 0 {
            return Vec::new();
        }
        (0..self.height).map(|i| self.at(i, 0)).collect()
    }

    fn elementwise(
        &self,
        other: &ComplexMatrix,
        op: &'static str,
        f: impl Fn(Complex, Complex) -> Complex,
    ) -> Result<ComplexMatrix> {
        if self.shape() != other.shape() {
            return Err(NodalError::dimension_mismatch(op, self.shape(), other.shape()));
        }
        Ok(ComplexMatrix {
            height: self.height,
            width: self.width,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Elementwise sum.
    pub fn try_add(&self, other: &ComplexMatrix) -> Result<ComplexMatrix> {
        self.elementwise(other, "add", |a, b| a + b)
    }

    /// Elementwise difference.
    pub fn try_sub(&self, other: &ComplexMatrix) -> Result<ComplexMatrix> {
        self.elementwise(other, "sub", |a, b| a - b)
    }

    /// Multiply every entry by `value`.
    pub fn scale(&self, value: Complex) -> ComplexMatrix {
        ComplexMatrix {
            height: self.height,
            width: self.width,
            data: self.data.iter().map(|&a| a * value).collect(),
        }
    }

    /// Matrix product `self · other`.
    pub fn matmul(&self, other: &ComplexMatrix) -> Result<ComplexMatrix> {
        if self.width != other.height {
            return Err(NodalError::dimension_mismatch(
                "matmul",
                self.shape(),
                other.shape(),
            ));
        }

        let mut product = ComplexMatrix::zeros(self.height, other.width);
        for i in 0..self.height {
            for j in 0..other.width {
                let mut acc = Complex::ZERO;
                for k in 0..self.width {
                    acc += self.at(i, k) * other.at(k, j);
                }
                product.data[i * other.width + j] = acc;
            }
        }
        Ok(product)
    }

    /// Transpose; valid for any shape.
    pub fn transpose(&self) -> ComplexMatrix {
        let mut t = ComplexMatrix::zeros(self.width, self.height);
        for i in 0..self.height {
            for j in 0..self.width {
                t.data[j * self.height + i] = self.at(i, j);
            }
        }
        t
    }

    /// Square matrix with this column on its main diagonal.
    pub fn diag(&self) -> Result<ComplexMatrix> {
        if self.width != 1 {
            return Err(NodalError::NotColumn {
                height: self.height,
                width: self.width,
            });
        }
        let n = self.height;
        let mut d = ComplexMatrix::zeros(n, n);
        for i in 0..n {
            d.data[i * n + i] = self.data[i];
        }
        Ok(d)
    }

    /// Copy of a square matrix without row `row` and column `col`.
    pub fn minor(&self, row: usize, col: usize) -> Result<ComplexMatrix> {
        let n = self.order();
        if n < 2 {
            return Err(NodalError::not_square("minor", self.height, self.width));
        }
        self.check_bounds(row, col)?;
        Ok(self.minor_unchecked(row, col))
    }

    fn minor_unchecked(&self, row: usize, col: usize) -> ComplexMatrix {
        let n = self.height;
        let mut data = Vec::with_capacity((n - 1) * (n - 1));
        for i in (0..n).filter(|&i| i != row) {
            for j in (0..n).filter(|&j| j != col) {
                data.push(self.at(i, j));
            }
        }
        ComplexMatrix {
            height: n - 1,
            width: n - 1,
            data,
        }
    }

    /// Determinant by Laplace expansion along column 0.
    pub fn det(&self) -> Result<Complex> {
        if !self.is_square() {
            return Err(NodalError::not_square("det", self.height, self.width));
        }
        Ok(self.cofactor_det())
    }

    fn cofactor_det(&self) -> Complex {
        let n = self.height;
        if n == 1 {
            return self.data[0];
        }
        let mut det = Complex::ZERO;
        for i in 0..n {
            det += self.at(i, 0) * sign(i) * self.minor_unchecked(i, 0).cofactor_det();
        }
        det
    }

    /// Natural log of the Hadamard bound `Π ‖row_i‖₂`, an upper bound on `|det|`.
    ///
    /// Summed per row in log space so large or tiny entries cannot overflow
    /// or underflow the product.
    fn log_hadamard_bound(&self) -> f64 {
        self.rows()
            .map(|row| row.iter().fold(0.0_f64, |norm, z| norm.hypot(z.abs())).ln())
            .sum()
    }

    // Pivots of partial-pivot elimination and the parity of the row swaps.
    // Stops early at a column with no nonzero pivot.
    fn elimination_pivots(&self) -> (Vec<Complex>, bool) {
        let n = self.height;
        let mut lu = self.clone();
        let mut pivots = Vec::with_capacity(n);
        let mut odd = false;

        for k in 0..n {
            let p = lu.pivot_row(k, k);
            if lu.at(p, k).abs() == 0.0 {
                break;
            }
            if p != k {
                lu.swap_rows(p, k);
                odd = !odd;
            }
            let pivot = lu.at(k, k);
            pivots.push(pivot);
            for i in (k + 1)..n {
                let factor = lu.at(i, k) / pivot;
                for j in (k + 1)..n {
                    let updated = lu.at(i, j) - factor * lu.at(k, j);
                    lu.data[i * n + j] = updated;
                }
            }
        }
        (pivots, odd)
    }

    /// Shared singularity test for both inversion paths.
    ///
    /// Singular when `|det| ≤ SINGULARITY_TOLERANCE · Π ‖row_i‖₂`, with
    /// `ln |det|` taken as `Σ ln |pivot|` so the comparison never sees an
    /// overflowed or underflowed product.
    fn is_singular(&self) -> bool {
        let (pivots, _) = self.elimination_pivots();
        if pivots.len() < self.height {
            return true;
        }
        let log_det: f64 = pivots.iter().map(|p| p.abs().ln()).sum();
        !log_det.is_finite() || log_det <= SINGULARITY_TOLERANCE.ln() + self.log_hadamard_bound()
    }

    /// Inverse via the adjugate: `inv(i, j) = (-1)^(i+j) · M(j, i) / det`.
    pub fn inverse(&self) -> Result<ComplexMatrix> {
        let n = self.order();
        if n == 0 {
            return Err(NodalError::not_square("inverse", self.height, self.width));
        }
        if n == 1 {
            let recip = Complex::ONE
                .checked_div(self.data[0])
                .ok_or(NodalError::SingularMatrix)?;
            return Ok(ComplexMatrix::filled(1, 1, recip));
        }
        if self.is_singular() {
            return Err(NodalError::SingularMatrix);
        }

        let det = self.cofactor_det();
        if det.abs() == 0.0 || !det.is_finite() {
            return Err(NodalError::SingularMatrix);
        }

        let mut inv = ComplexMatrix::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let cofactor = sign(i + j) * self.minor_unchecked(j, i).cofactor_det();
                inv.data[i * n + j] = cofactor / det;
            }
        }
        Ok(inv)
    }

    // Row index of the largest-magnitude entry in `col`, at or below `from`.
    fn pivot_row(&self, col: usize, from: usize) -> usize {
        (from..self.height)
            .max_by(|&a, &b| self.at(a, col).abs().total_cmp(&self.at(b, col).abs()))
            .unwrap_or(from)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let w = self.width;
        for j in 0..w {
            self.data.swap(a * w + j, b * w + j);
        }
    }

    /// Determinant by Gaussian elimination with partial pivoting.
    pub fn det_elimination(&self) -> Result<Complex> {
        let n = self.order();
        if n == 0 {
            return Err(NodalError::not_square("det", self.height, self.width));
        }

        let (pivots, odd) = self.elimination_pivots();
        if pivots.len() < n {
            return Ok(Complex::ZERO);
        }
        let det: Complex = pivots.into_iter().fold(Complex::ONE, |det, p| det * p);
        Ok(if odd { -det } else { det })
    }

    /// Inverse by Gauss-Jordan elimination with partial pivoting.
    ///
    /// Accepts and rejects exactly the matrices [`inverse`](Self::inverse)
    /// does; the entries may differ by rounding.
    pub fn inverse_elimination(&self) -> Result<ComplexMatrix> {
        let n = self.order();
        if n == 0 {
            return Err(NodalError::not_square("inverse", self.height, self.width));
        }
        if self.is_singular() {
            return Err(NodalError::SingularMatrix);
        }

        let mut a = self.clone();
        let mut inv = ComplexMatrix::identity(n);

        for k in 0..n {
            let p = a.pivot_row(k, k);
            a.swap_rows(p, k);
            inv.swap_rows(p, k);

            let pivot = a.at(k, k);
            if pivot.abs() == 0.0 || !pivot.is_finite() {
                return Err(NodalError::SingularMatrix);
            }

            for j in 0..n {
                a.data[k * n + j] = a.at(k, j) / pivot;
                inv.data[k * n + j] = inv.at(k, j) / pivot;
            }

            for i in (0..n).filter(|&i| i != k) {
                let factor = a.at(i, k);
                if factor.abs() == 0.0 {
                    continue;
                }
                for j in 0..n {
                    let a_ij = a.at(i, j) - factor * a.at(k, j);
                    let inv_ij = inv.at(i, j) - factor * inv.at(k, j);
                    a.data[i * n + j] = a_ij;
                    inv.data[i * n + j] = inv_ij;
                }
            }
        }
        Ok(inv)
    }

    /// Render one row per line with fixed-width columns.
    pub fn render(&self, config: &FormatConfig) -> String {
        let mut out = String::new();
        for row in self.rows() {
            for value in row {
                out.push_str(&format!("{:>width$}", value.display(config), width = CELL_WIDTH));
            }
            out.push('\n');
        }
        out
    }
}

impl Neg for &ComplexMatrix {
    type Output = ComplexMatrix;

    fn neg(self) -> ComplexMatrix {
        ComplexMatrix {
            height: self.height,
            width: self.width,
            data: self.data.iter().map(|&a| -a).collect(),
        }
    }
}

impl Neg for ComplexMatrix {
    type Output = ComplexMatrix;

    fn neg(self) -> ComplexMatrix {
        -&self
    }
}

impl Mul<Complex> for &ComplexMatrix {
    type Output = ComplexMatrix;

    fn mul(self, rhs: Complex) -> ComplexMatrix {
        self.scale(rhs)
    }
}

impl fmt::Display for ComplexMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&FormatConfig::default()))
    }
}
