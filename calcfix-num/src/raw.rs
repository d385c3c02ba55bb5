//! Integer plumbing behind [`FixedPoint`](crate::FixedPoint).
//!
//! A fixed-point layout names three integer types: the storage type holding the
//! scaled value, the wider accumulator used as scratch space, and the native
//! type used at the boundary with whole numbers. All three are signed
//! primitives implementing [`RawInt`].

use core::fmt::Debug;
use core::hash::Hash;

use num_traits::{AsPrimitive, PrimInt, Signed, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};

mod sealed {
    pub trait Sealed {}
}

/// A signed primitive integer usable inside a fixed-point layout.
///
/// Sealed: implemented for `i8`, `i16`, `i32`, `i64` and `i128` only.
pub trait RawInt:
    PrimInt
    + Signed
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + Hash
    + Debug
    + Default
    + AsPrimitive<f32>
    + AsPrimitive<f64>
    + sealed::Sealed
{
    /// Width of the type in bits.
    const WIDTH: u32;

    /// Float to integer, truncating toward zero and saturating at the type bounds.
    fn from_f32(v: f32) -> Self;

    fn from_f64(v: f64) -> Self;

    /// Truncating division; wraps on `MIN / -1`, panics on a zero divisor.
    fn wrapping_div(self, rhs: Self) -> Self;

    fn wrapping_rem(self, rhs: Self) -> Self;

    /// Reinterpret the low `bits` bits as a two's complement value.
    #[inline]
    fn sign_extend(self, bits: u32) -> Self {
        if bits >= Self::WIDTH {
            return self;
        }
        let shift = (Self::WIDTH - bits) as usize;
        (self << shift) >> shift
    }
}

macro_rules! raw_int_impl {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl RawInt for $t {
                const WIDTH: u32 = <$t>::BITS;

                #[inline(always)]
                fn from_f32(v: f32) -> Self {
                    v as $t
                }

                #[inline(always)]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline(always)]
                fn wrapping_div(self, rhs: Self) -> Self {
                    <$t>::wrapping_div(self, rhs)
                }

                #[inline(always)]
                fn wrapping_rem(self, rhs: Self) -> Self {
                    <$t>::wrapping_rem(self, rhs)
                }
            }
        )*
    };
}

raw_int_impl!(i8, i16, i32, i64, i128);

/// Storage type of a layout whose accumulator is `A` and native type is `N`.
pub trait Storage<A: 'static + Copy, N: 'static + Copy>: RawInt + AsPrimitive<A> + AsPrimitive<N> {}

impl<T, A, N> Storage<A, N> for T
where
    T: RawInt + AsPrimitive<A> + AsPrimitive<N>,
    A: 'static + Copy,
    N: 'static + Copy,
{
}

/// Scratch type wide enough to hold intermediate products of storage `S`.
pub trait Accumulator<S: 'static + Copy>: RawInt + AsPrimitive<S> {}

impl<T, S> Accumulator<S> for T
where
    T: RawInt + AsPrimitive<S>,
    S: 'static + Copy,
{
}

/// Whole-number interop type, widened into accumulator `A` before use.
pub trait Native<A: 'static + Copy>: RawInt + AsPrimitive<A> {}

impl<T, A> Native<A> for T
where
    T: RawInt + AsPrimitive<A>,
    A: 'static + Copy,
{
}
