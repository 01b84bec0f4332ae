//! Text rendering of bin bounds
//!
//! Bounds are written in "general" notation with six significant digits:
//! fixed notation when the decimal exponent lies in `[-4, precision)`,
//! scientific notation otherwise, with trailing zeros removed. This is the
//! classic default rendering of floating-point numbers in text streams, so
//! histogram files stay comparable with those produced by other tools.

use std::fmt;

/// Significant digits used when no precision is given
pub const DEFAULT_PRECISION: usize = 6;

/// `Display` adapter rendering an `f64` in general notation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneralFloat {
    value: f64,
    precision: usize,
}

impl GeneralFloat {
    /// Render `value` with [`DEFAULT_PRECISION`] significant digits
    pub fn new(value: f64) -> Self {
        Self::with_precision(value, DEFAULT_PRECISION)
    }

    /// Render `value` with `precision` significant digits (at least one)
    pub fn with_precision(value: f64, precision: usize) -> Self {
        Self {
            value,
            precision: precision.max(1),
        }
    }
}

impl fmt::Display for GeneralFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
        }
        if value == 0.0 {
            return f.write_str(if value.is_sign_negative() { "-0" } else { "0" });
        }

        // Round to the requested significant digits first; the exponent of
        // the rounded value decides between fixed and scientific notation.
        let precision = self.precision;
        let scientific = format!("{:.*e}", precision - 1, value);
        let Some((mantissa, exponent)) = scientific.split_once('e') else {
            return f.write_str(&scientific);
        };
        let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

        if exponent < -4 || exponent >= precision as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", trim_fraction(mantissa), sign, exponent.unsigned_abs())
        } else {
            let decimals = (precision as i32 - 1 - exponent) as usize;
            let fixed = format!("{value:.decimals$}");
            f.write_str(trim_fraction(&fixed))
        }
    }
}

/// Render `value` in general notation with the default precision
pub fn format_bound(value: f64) -> String {
    GeneralFloat::new(value).to_string()
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
