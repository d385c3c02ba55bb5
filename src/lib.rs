//! # calcfix
//!
//! Deterministic fixed-point arithmetic and trigonometry.
//!
//! This crate re-exports the two workspace members:
//! - [`calcfix_num`]: the [`FixedPoint`] type, its layouts and operators
//! - [`calcfix_math`]: [`abs`], [`sin`] and [`cos`] built on top of it

#![cfg_attr(not(test), no_std)]

pub use calcfix_math as math;
pub use calcfix_num as num;

pub use calcfix_math::{abs, cos, cos_domain, sin, sin_domain};
pub use calcfix_num::{FixedFormat, FixedPoint, FixedPointError, Result, I16F16, I18F6, I8F8};
