//! # calcfix-math
//!
//! Elementary functions over [`FixedPoint`](calcfix_num::FixedPoint) values,
//! built only from the type's own operators:
//! - [`abs`]
//! - [`cos_domain`] / [`sin_domain`]: inputs already inside `[0, pi]` / `[0, tau]`
//! - [`cos`] / [`sin`]: any input, range-reduced into `[0, tau]` first
//!
//! Sine and cosine share one truncated Taylor polynomial,
//! `1 - x^2/2 + x^4/24 - x^6/720`. Inputs are folded onto `[0, pi/2]` before
//! it is evaluated, where its truncation error stays below `0.001`.
//!
//! ```
//! use calcfix_math::{cos, sin};
//! use calcfix_num::I16F16;
//!
//! let x = I16F16::from_f32(0.5);
//! assert!((sin(x).to_f32() - 0.5f32.sin()).abs() < 0.002);
//! assert!((cos(-x).to_f32() - 0.5f32.cos()).abs() < 0.002);
//! ```

#![cfg_attr(not(test), no_std)]

pub mod trig;

pub use trig::{abs, cos, cos_domain, sin, sin_domain};
