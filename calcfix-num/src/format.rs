//! Runtime description of a fixed-point layout.
//!
//! [`FixedFormat`] is what configuration files and logs talk about; the type
//! system carries the same two numbers as const generics on
//! [`FixedPoint`](crate::FixedPoint).

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FixedPointError, Result};

/// Widest layout any storage type can hold.
pub const MAX_BITS: u32 = 128;

/// Total width and fractional width of a fixed-point layout.
///
/// Written as `Q<int>.<frac>` where `<int>` includes the sign bit, so the
/// 24-bit calculator layout with 6 fractional bits is `Q18.6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedFormat {
    /// Total number of bits in the scaled integer
    pub bits: u32,
    /// Number of low-order bits below the binary point
    pub point: u32,
}

impl FixedFormat {
    pub const fn new(bits: u32, point: u32) -> Self {
        Self { bits, point }
    }

    /// Check that the layout is one a storage type can actually hold.
    pub fn validate(self) -> Result<Self> {
        if self.bits == 0 || self.bits > MAX_BITS || self.point >= self.bits {
            tracing::debug!(bits = self.bits, point = self.point, "rejected fixed-point format");
            return Err(FixedPointError::InvalidFormat {
                bits: self.bits,
                point: self.point,
            });
        }
        Ok(self)
    }

    /// Bits above the binary point, sign bit included.
    pub const fn integer_bits(self) -> u32 {
        self.bits.saturating_sub(self.point)
    }

    /// Smallest positive step, `2^-point`.
    pub fn resolution(self) -> f64 {
        1.0 / pow2(self.point)
    }

    /// Most negative representable value, `-2^(bits - point - 1)`.
    ///
    /// Only meaningful for a format that passes [`validate`](Self::validate);
    /// one without a sign bit reports `-1`.
    pub fn min_value(self) -> f64 {
        -pow2(self.integer_bits().saturating_sub(1))
    }

    /// Largest representable value, one resolution step below `2^(bits - point - 1)`.
    pub fn max_value(self) -> f64 {
        pow2(self.integer_bits().saturating_sub(1)) - self.resolution()
    }

    /// Whether `value` lies inside the range, ignoring precision loss.
    pub fn is_representable(self, value: f64) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }
}

// Built from the exponent field; saturates to infinity past f64's range.
fn pow2(exp: u32) -> f64 {
    if exp > 1023 {
        return f64::INFINITY;
    }
    f64::from_bits(u64::from(exp + 1023) << 52)
}

impl fmt::Display for FixedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}.{}", self.integer_bits(), self.point)
    }
}

impl FromStr for FixedFormat {
    type Err = FixedPointError;

    fn from_str(s: &str) -> Result<Self> {
        let body = s
            .trim()
            .strip_prefix(['Q', 'q'])
            .ok_or(FixedPointError::MalformedFormat)?;
        let (int, frac) = body.split_once('.').ok_or(FixedPointError::MalformedFormat)?;
        let int: u32 = int.parse().map_err(|_| FixedPointError::MalformedFormat)?;
        let point: u32 = frac.parse().map_err(|_| FixedPointError::MalformedFormat)?;
        let bits = int.checked_add(point).ok_or(FixedPointError::MalformedFormat)?;
        if int == 0 {
            // no room for the sign bit
            return Err(FixedPointError::InvalidFormat { bits, point });
        }
        Self::new(bits, point).validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculator_layout_bounds() {
        let fmt = FixedFormat::new(24, 6);
        assert_eq!(fmt.integer_bits(), 18);
        assert_eq!(fmt.resolution(), 1.0 / 64.0);
        assert_eq!(fmt.min_value(), -131072.0);
        assert_eq!(fmt.max_value(), 131072.0 - 1.0 / 64.0);
        assert!(fmt.is_representable(-131072.0));
        assert!(!fmt.is_representable(131072.0));
    }

    #[test]
    fn test_validate_rejects_point_at_width() {
        assert!(FixedFormat::new(16, 8).validate().is_ok());
        assert!(matches!(
            FixedFormat::new(16, 16).validate(),
            Err(FixedPointError::InvalidFormat { bits: 16, point: 16 })
        ));
        assert!(FixedFormat::new(0, 0).validate().is_err());
        assert!(FixedFormat::new(129, 4).validate().is_err());
    }

    #[test]
    fn test_unvalidated_formats_do_not_panic() {
        // no sign bit
        let signless = FixedFormat::new(8, 8);
        assert_eq!(signless.integer_bits(), 0);
        assert_eq!(signless.min_value(), -1.0);
        assert_eq!(signless.max_value(), 1.0 - 1.0 / 256.0);
        assert!(signless.validate().is_err());

        let inverted = FixedFormat::new(8, 12);
        assert_eq!(inverted.integer_bits(), 0);
        assert!(inverted.max_value().is_finite());

        let huge = FixedFormat::new(2000, 0);
        assert_eq!(huge.max_value(), f64::INFINITY);
        assert_eq!(FixedFormat::new(129, 0).max_value(), 2f64.powi(128) - 1.0);
    }

    #[test]
    fn test_parse_q_notation() {
        let fmt: FixedFormat = "Q18.6".parse().unwrap();
        assert_eq!(fmt, FixedFormat::new(24, 6));
        assert_eq!(" q16.16 ".parse::<FixedFormat>().unwrap(), FixedFormat::new(32, 16));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("18.6".parse::<FixedFormat>(), Err(FixedPointError::MalformedFormat)));
        assert!(matches!("Q18".parse::<FixedFormat>(), Err(FixedPointError::MalformedFormat)));
        assert!(matches!("Qx.6".parse::<FixedFormat>(), Err(FixedPointError::MalformedFormat)));
        assert!(matches!(
            "Q0.8".parse::<FixedFormat>(),
            Err(FixedPointError::InvalidFormat { .. })
        ));
        assert!(matches!(
            "Q100.100".parse::<FixedFormat>(),
            Err(FixedPointError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_display_roundtrip() {
        let fmt = FixedFormat::new(16, 8);
        let text = fmt.to_string();
        assert_eq!(text, "Q8.8");
        assert_eq!(text.parse::<FixedFormat>().unwrap(), fmt);
    }
}
