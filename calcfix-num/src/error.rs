//! Errors reported by the opt-in checked layer.
//!
//! The plain operators never produce these: they wrap and truncate silently.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FixedPointError {
    #[error("Overflow in fixed-point {op}: result exceeds the {bits}-bit range")]
    Overflow { op: &'static str, bits: u32 },

    #[error("Division by zero in fixed-point {op}")]
    DivisionByZero { op: &'static str },

    #[error("Value {value} is not representable with {bits} bits and {point} fractional bits")]
    OutOfRange { value: f64, bits: u32, point: u32 },

    #[error("Invalid fixed-point format: {point} fractional bits in a {bits}-bit value")]
    InvalidFormat { bits: u32, point: u32 },

    #[error("Malformed fixed-point format string (expected Q<int>.<frac>)")]
    MalformedFormat,
}

pub type Result<T> = core::result::Result<T, FixedPointError>;
