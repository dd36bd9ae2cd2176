//! Rendering configuration for complex values and matrices.

use std::fmt;
use std::str::FromStr;

use super::Complex;

/// Magnitudes and angles below this render as zero / are suppressed.
pub const DEFAULT_ZERO_THRESHOLD: f64 = 1e-5;

/// Digits after the decimal point.
pub const DEFAULT_PRECISION: usize = 4;

/// Column width used when rendering matrices.
pub const CELL_WIDTH: usize = 10;

/// How a complex value is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// `a+bj`
    #[default]
    Algebraic,
    /// `re^(θj)` with θ in degrees
    Exponential,
}

impl FromStr for FormMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "algebraic" | "alg" | "a" => Ok(Self::Algebraic),
            "exponential" | "exp" | "e" => Ok(Self::Exponential),
            _ => Err(format!("unknown form '{}' (expected algebraic or exponential)", s)),
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormMode::Algebraic => write!(f, "algebraic"),
            FormMode::Exponential => write!(f, "exponential"),
        }
    }
}

/// Formatting options passed explicitly to every render call.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatConfig {
    /// Algebraic or exponential form.
    pub mode: FormMode,
    /// Fixed-point digits.
    pub precision: usize,
    /// Magnitude (and angle, in exponential form) below which a term is dropped.
    pub zero_threshold: f64,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            mode: FormMode::default(),
            precision: DEFAULT_PRECISION,
            zero_threshold: DEFAULT_ZERO_THRESHOLD,
        }
    }
}

impl FormatConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering form.
    pub fn with_mode(mut self, mode: FormMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the number of digits after the decimal point.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the zero-suppression threshold.
    pub fn with_zero_threshold(mut self, zero_threshold: f64) -> Self {
        self.zero_threshold = zero_threshold;
        self
    }

    /// Render a single value to a string.
    pub fn render(&self, value: Complex) -> String {
        let p = self.precision;
        let thr = self.zero_threshold;

        if value.abs() < thr {
            return "0".to_string();
        }

        match self.mode {
            FormMode::Algebraic => {
                let (x, y) = (value.re(), value.im());
                if y.abs() < thr {
                    format!("{:.*}", p, x)
                } else if x.abs() < thr {
                    format!("{:.*}j", p, y)
                } else if y < 0.0 {
                    format!("{:.*}-{:.*}j", p, x, p, -y)
                } else {
                    format!("{:.*}+{:.*}j", p, x, p, y)
                }
            }
            FormMode::Exponential => {
                if value.arg().abs() < thr {
                    format!("{:.*}", p, value.abs())
                } else {
                    format!("{:.*}e^({:.*}j)", p, value.abs(), p, value.arg())
                }
            }
        }
    }
}

/// Display adapter returned by [`Complex::display`].
pub struct Formatted<'a> {
    value: Complex,
    config: &'a FormatConfig,
}

impl fmt::Display for Formatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.config.render(self.value))
    }
}

impl Complex {
    /// Render with an explicit configuration.
    pub fn display<'a>(&self, config: &'a FormatConfig) -> Formatted<'a> {
        Formatted {
            value: *self,
            config,
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&FormatConfig::default().render(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_rendering() {
        let cfg = FormatConfig::new();
        assert_eq!(cfg.render(Complex::new(1.5, -2.25)), "1.5000-2.2500j");
        assert_eq!(cfg.render(Complex::new(1.5, 2.25)), "1.5000+2.2500j");
        assert_eq!(cfg.render(Complex::new(-3.0, 0.0)), "-3.0000");
        assert_eq!(cfg.render(Complex::new(0.0, 4.0)), "4.0000j");
        assert_eq!(cfg.render(Complex::new(1e-6, -1e-6)), "0");
    }

    #[test]
    fn test_exponential_rendering() {
        let cfg = FormatConfig::new()
            .with_mode(FormMode::Exponential)
            .with_precision(2);
        assert_eq!(cfg.render(Complex::from_polar(2.0, 30.0)), "2.00e^(30.00j)");
        assert_eq!(cfg.render(Complex::from_real(7.0)), "7.00");
        assert_eq!(cfg.render(Complex::ZERO), "0");
    }

    #[test]
    fn test_padding() {
        let cfg = FormatConfig::new().with_precision(1);
        let s = format!("{:>10}", Complex::new(2.0, 1.0).display(&cfg));
        assert_eq!(s, "  2.0+1.0j");
        assert_eq!(format!("{}", Complex::from_real(1.0)), "1.0000");
    }

    #[test]
    fn test_form_mode_from_str() {
        assert_eq!("exp".parse::<FormMode>(), Ok(FormMode::Exponential));
        assert_eq!("Algebraic".parse::<FormMode>(), Ok(FormMode::Algebraic));
        assert!("polar".parse::<FormMode>().is_err());
    }
}
