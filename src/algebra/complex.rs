//! Phasor-capable complex scalar.
//!
//! [`Complex`] stores both the rectangular form `x + jy` and the polar form
//! `r∠θ` (θ in degrees). Addition and subtraction work on the rectangular
//! parts, multiplication and division on the polar parts, and every
//! operation recomputes the other representation so both stay valid.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex64;

/// Below this magnitude a coordinate is treated as zero by [`arg`].
pub const AXIS_EPSILON: f64 = 1e-15;

/// Normalize an angle in degrees into the half-open range (-180, 180].
pub fn normalize(theta: f64) -> f64 {
    if !theta.is_finite() {
        return theta;
    }
    let mut theta = if theta.abs() > 720.0 { theta % 360.0 } else { theta };
    while theta > 180.0 {
        theta -= 360.0;
    }
    while theta <= -180.0 {
        theta += 360.0;
    }
    theta
}

/// Quadrant-aware angle of `x + jy` in degrees, in (-180, 180].
///
/// Built on the single-argument arctangent: the left half-plane is shifted
/// by ±180°, and the imaginary axis is handled explicitly.
pub fn arg(x: f64, y: f64) -> f64 {
    if x.abs() < AXIS_EPSILON && y.abs() < AXIS_EPSILON {
        return 0.0;
    }
    let theta = if x < 0.0 {
        let base = (y / x).atan().to_degrees();
        if y > 0.0 {
            base + 180.0
        } else {
            base - 180.0
        }
    } else if x.abs() < AXIS_EPSILON {
        if y > 0.0 {
            90.0
        } else {
            -90.0
        }
    } else {
        (y / x).atan().to_degrees()
    };
    normalize(theta)
}

/// A complex number kept in rectangular and polar form at once.
#[derive(Debug, Clone, Copy)]
pub struct Complex {
    x: f64,
    y: f64,
    r: f64,
    theta: f64,
}

impl Complex {
    /// Zero.
    pub const ZERO: Complex = Complex {
        x: 0.0,
        y: 0.0,
        r: 0.0,
        theta: 0.0,
    };

    /// One.
    pub const ONE: Complex = Complex {
        x: 1.0,
        y: 0.0,
        r: 1.0,
        theta: 0.0,
    };

    /// The imaginary unit `j`.
    pub const J: Complex = Complex {
        x: 0.0,
        y: 1.0,
        r: 1.0,
        theta: 90.0,
    };

    /// Create from rectangular parts.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            r: x.hypot(y),
            theta: arg(x, y),
        }
    }

    /// Create from a magnitude and an angle in degrees.
    ///
    /// A negative magnitude is folded into the angle.
    pub fn from_polar(magnitude: f64, angle_deg: f64) -> Self {
        let (r, theta) = if magnitude < 0.0 {
            (-magnitude, angle_deg + 180.0)
        } else {
            (magnitude, angle_deg)
        };
        Self::polar_normalized(r, normalize(theta))
    }

    /// Create a purely real value.
    pub fn from_real(x: f64) -> Self {
        Self::new(x, 0.0)
    }

    fn polar_normalized(r: f64, theta: f64) -> Self {
        if r == 0.0 {
            return Self::ZERO;
        }
        let rad = theta.to_radians();
        Self {
            x: r * rad.cos(),
            y: r * rad.sin(),
            r,
            theta,
        }
    }

    /// Real part.
    pub fn re(&self) -> f64 {
        self.x
    }

    /// Imaginary part.
    pub fn im(&self) -> f64 {
        self.y
    }

    /// Magnitude.
    pub fn abs(&self) -> f64 {
        self.r
    }

    /// Angle in degrees, in (-180, 180].
    pub fn arg(&self) -> f64 {
        self.theta
    }

    /// Complex conjugate.
    pub fn conj(&self) -> Self {
        Self::new(self.x, -self.y)
    }

    /// `1 / self`, through the polar path.
    pub fn recip(&self) -> Self {
        Self::ONE / *self
    }

    /// Division that refuses a zero-magnitude divisor.
    pub fn checked_div(self, rhs: Complex) -> Option<Complex> {
        if rhs.r == 0.0 {
            None
        } else {
            Some(self / rhs)
        }
    }

    /// Whether the magnitude is below `tolerance`.
    pub fn is_zero(&self, tolerance: f64) -> bool {
        self.r < tolerance
    }

    /// Whether both rectangular parts are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Complex {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<f64> for Complex {
    fn from(x: f64) -> Self {
        Self::from_real(x)
    }
}

impl From<Complex64> for Complex {
    fn from(c: Complex64) -> Self {
        Self::new(c.re, c.im)
    }
}

impl From<Complex> for Complex64 {
    fn from(c: Complex) -> Self {
        Complex64::new(c.x, c.y)
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.x, -self.y)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::polar_normalized(self.r * rhs.r, normalize(self.theta + rhs.theta))
    }
}

impl Div for Complex {
    type Output = Complex;

    /// Dividing by zero yields non-finite parts; use [`Complex::checked_div`]
    /// when the divisor may vanish.
    fn div(self, rhs: Complex) -> Complex {
        Complex::polar_normalized(self.r / rhs.r, normalize(self.theta - rhs.theta))
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f64) -> Complex {
        self * Complex::from_real(rhs)
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::from_real(self) * rhs
    }
}

impl Div<f64> for Complex {
    type Output = Complex;

    fn div(self, rhs: f64) -> Complex {
        self / Complex::from_real(rhs)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        *self = *self + rhs;
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, rhs: Complex) {
        *self = *self - rhs;
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, rhs: Complex) {
        *self = *self * rhs;
    }
}

impl DivAssign for Complex {
    fn div_assign(&mut self, rhs: Complex) {
        *self = *self / rhs;
    }
}

impl std::iter::Sum for Complex {
    fn sum<I: Iterator<Item = Complex>>(iter: I) -> Complex {
        iter.fold(Complex::ZERO, |acc, z| acc + z)
    }
}
