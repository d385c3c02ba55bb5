//! # calcfix-num
//!
//! Fixed-point numbers for targets where floating point is slow or missing.
//!
//! [`FixedPoint<BITS, POINT, S, A, N>`](FixedPoint) stores `real * 2^POINT` in a
//! `BITS`-bit signed integer held by storage type `S`. Multiplication and
//! division go through the wider accumulator `A`; `N` is the native integer
//! type used for whole-number interop.
//!
//! Arithmetic is deterministic and never checks for overflow: results wrap at
//! `BITS` bits and fractions truncate toward zero. The `checked_*` methods and
//! the `strict` feature exist for callers who want to catch overflow.
//!
//! ```
//! use calcfix_num::I18F6;
//!
//! let x = I18F6::from_f32(2.5);
//! assert_eq!(x.raw(), 160);
//! assert_eq!((x * 2 + 1).to_f32(), 6.0);
//! assert_eq!((1 - x).to_f32(), -1.5);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod error;
pub mod fixed_point;
pub mod format;
pub mod ops;
pub mod raw;

pub use error::{FixedPointError, Result};
pub use fixed_point::{FixedPoint, I16F16, I18F6, I8F8};
pub use format::FixedFormat;
pub use raw::{Accumulator, Native, RawInt, Storage};
