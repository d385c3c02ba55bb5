//! Operator overloads.
//!
//! Every operator widens into the accumulator, computes, then narrows back to
//! `BITS` bits through [`FixedPoint::narrow`]. Scalars may sit on either side:
//! `fixed OP scalar` and `scalar OP fixed` are both provided, and the reversed
//! forms are computed directly rather than by swapping operands.

use core::cmp::Ordering;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use num_traits::AsPrimitive;

use crate::fixed_point::FixedPoint;
use crate::raw::{Accumulator, Native, Storage};

/// Generates the assigning form of a binary operator from its plain form.
macro_rules! assign_op {
    ($Assign:ident, $assign:ident, $Op:ident, $op:ident, $Rhs:ty) => {
        impl<const BITS: u32, const POINT: u32, S, A, N> $Assign<$Rhs> for FixedPoint<BITS, POINT, S, A, N>
        where
            S: Storage<A, N>,
            A: Accumulator<S>,
            N: Native<A>,
        {
            #[inline]
            fn $assign(&mut self, rhs: $Rhs) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

/// Generates `FixedPoint OP rhs` with `$body(lhs, rhs) -> FixedPoint`.
macro_rules! binary_op {
    ($Op:ident, $op:ident, $Rhs:ty, |$lhs:ident, $rhs:ident| $body:expr) => {
        impl<const BITS: u32, const POINT: u32, S, A, N> $Op<$Rhs> for FixedPoint<BITS, POINT, S, A, N>
        where
            S: Storage<A, N>,
            A: Accumulator<S>,
            N: Native<A>,
        {
            type Output = Self;

            #[inline]
            fn $op(self, $rhs: $Rhs) -> Self {
                let $lhs = self;
                $body
            }
        }
    };
}

type Fixed<const BITS: u32, const POINT: u32, S, A, N> = FixedPoint<BITS, POINT, S, A, N>;

// Fixed <-> Fixed

binary_op!(Add, add, FixedPoint<BITS, POINT, S, A, N>, |lhs, rhs| Self::narrow(Self::widen(lhs.raw()) + Self::widen(rhs.raw())));
binary_op!(Sub, sub, FixedPoint<BITS, POINT, S, A, N>, |lhs, rhs| Self::narrow(Self::widen(lhs.raw()) - Self::widen(rhs.raw())));
binary_op!(Mul, mul, FixedPoint<BITS, POINT, S, A, N>, |lhs, rhs| Self::narrow(
    Self::widen(lhs.raw())
        .wrapping_mul(&Self::widen(rhs.raw()))
        .wrapping_div(Self::scale())
));
// Shift the dividend up first so the quotient keeps POINT fractional bits.
// A zero divisor panics, exactly like primitive integer division.
binary_op!(Div, div, FixedPoint<BITS, POINT, S, A, N>, |lhs, rhs| Self::narrow(
    (Self::widen(lhs.raw()) << POINT as usize).wrapping_div(Self::widen(rhs.raw()))
));
binary_op!(Rem, rem, FixedPoint<BITS, POINT, S, A, N>, |lhs, rhs| Self::narrow(
    Self::widen(lhs.raw()).wrapping_rem(Self::widen(rhs.raw()))
));

assign_op!(AddAssign, add_assign, Add, add, FixedPoint<BITS, POINT, S, A, N>);
assign_op!(SubAssign, sub_assign, Sub, sub, FixedPoint<BITS, POINT, S, A, N>);
assign_op!(MulAssign, mul_assign, Mul, mul, FixedPoint<BITS, POINT, S, A, N>);
assign_op!(DivAssign, div_assign, Div, div, FixedPoint<BITS, POINT, S, A, N>);
assign_op!(RemAssign, rem_assign, Rem, rem, FixedPoint<BITS, POINT, S, A, N>);

impl<const BITS: u32, const POINT: u32, S, A, N> Neg for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    type Output = Self;

    /// The minimum value negates to itself.
    #[inline]
    fn neg(self) -> Self {
        Self::narrow(Self::widen(self.raw()).wrapping_neg())
    }
}

// Fixed <-> native integer. Addition and subtraction rescale the integer;
// multiplication and division act on the raw value directly, since a scaled
// value times an unscaled one keeps its scale.

binary_op!(Add, add, N, |lhs, n| Self::narrow(
    Self::widen(lhs.raw()).wrapping_add(&(Self::widen_native(n) << POINT as usize))
));
binary_op!(Sub, sub, N, |lhs, n| Self::narrow(
    Self::widen(lhs.raw()).wrapping_sub(&(Self::widen_native(n) << POINT as usize))
));
binary_op!(Mul, mul, N, |lhs, n| Self::narrow(
    Self::widen(lhs.raw()).wrapping_mul(&Self::widen_native(n))
));
binary_op!(Div, div, N, |lhs, n| Self::narrow(
    Self::widen(lhs.raw()).wrapping_div(Self::widen_native(n))
));

assign_op!(AddAssign, add_assign, Add, add, N);
assign_op!(SubAssign, sub_assign, Sub, sub, N);
assign_op!(MulAssign, mul_assign, Mul, mul, N);
assign_op!(DivAssign, div_assign, Div, div, N);

// Fixed <-> f32, evaluated in float and truncated back toward zero. A scalar
// beyond the accumulator saturates there first, then wraps like any other
// out-of-range result.

binary_op!(Add, add, f32, |lhs, n| Self::narrow(
    Self::widen(lhs.raw()).wrapping_add(&A::from_f32(n * Self::scale_f32()))
));
binary_op!(Sub, sub, f32, |lhs, n| Self::narrow(
    Self::widen(lhs.raw()).wrapping_sub(&A::from_f32(n * Self::scale_f32()))
));
binary_op!(Mul, mul, f32, |lhs, n| Self::narrow(A::from_f32(raw_f32(lhs) * n)));
binary_op!(Div, div, f32, |lhs, n| Self::narrow(A::from_f32(raw_f32(lhs) / n)));

assign_op!(AddAssign, add_assign, Add, add, f32);
assign_op!(SubAssign, sub_assign, Sub, sub, f32);
assign_op!(MulAssign, mul_assign, Mul, mul, f32);
assign_op!(DivAssign, div_assign, Div, div, f32);

#[inline]
fn raw_f32<const BITS: u32, const POINT: u32, S, A, N>(x: Fixed<BITS, POINT, S, A, N>) -> f32
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    <S as AsPrimitive<f32>>::as_(x.raw())
}

// Scalar <-> Fixed, one set per native integer type.

macro_rules! native_lhs_ops {
    ($($n:ty),*) => {
        $(
            impl<const BITS: u32, const POINT: u32, S, A> Add<FixedPoint<BITS, POINT, S, A, $n>> for $n
            where
                S: Storage<A, $n>,
                A: Accumulator<S>,
                $n: Native<A>,
            {
                type Output = FixedPoint<BITS, POINT, S, A, $n>;

                #[inline]
                fn add(self, f: FixedPoint<BITS, POINT, S, A, $n>) -> FixedPoint<BITS, POINT, S, A, $n> {
                    FixedPoint::<BITS, POINT, S, A, $n>::narrow(
                        (FixedPoint::<BITS, POINT, S, A, $n>::widen_native(self) << POINT as usize)
                            .wrapping_add(&FixedPoint::<BITS, POINT, S, A, $n>::widen(f.raw())),
                    )
                }
            }

            impl<const BITS: u32, const POINT: u32, S, A> Sub<FixedPoint<BITS, POINT, S, A, $n>> for $n
            where
                S: Storage<A, $n>,
                A: Accumulator<S>,
                $n: Native<A>,
            {
                type Output = FixedPoint<BITS, POINT, S, A, $n>;

                #[inline]
                fn sub(self, f: FixedPoint<BITS, POINT, S, A, $n>) -> FixedPoint<BITS, POINT, S, A, $n> {
                    FixedPoint::<BITS, POINT, S, A, $n>::narrow(
                        (FixedPoint::<BITS, POINT, S, A, $n>::widen_native(self) << POINT as usize)
                            .wrapping_sub(&FixedPoint::<BITS, POINT, S, A, $n>::widen(f.raw())),
                    )
                }
            }

            impl<const BITS: u32, const POINT: u32, S, A> Mul<FixedPoint<BITS, POINT, S, A, $n>> for $n
            where
                S: Storage<A, $n>,
                A: Accumulator<S>,
                $n: Native<A>,
            {
                type Output = FixedPoint<BITS, POINT, S, A, $n>;

                #[inline]
                fn mul(self, f: FixedPoint<BITS, POINT, S, A, $n>) -> FixedPoint<BITS, POINT, S, A, $n> {
                    f * self
                }
            }

            impl<const BITS: u32, const POINT: u32, S, A> Div<FixedPoint<BITS, POINT, S, A, $n>> for $n
            where
                S: Storage<A, $n>,
                A: Accumulator<S>,
                $n: Native<A>,
            {
                type Output = FixedPoint<BITS, POINT, S, A, $n>;

                /// `n / f`: the integer is scaled by `2^(2 * POINT)` so the
                /// quotient comes out with `POINT` fractional bits.
                ///
                /// The scaled dividend wraps in the accumulator when
                /// `2 * POINT` leaves it no headroom.
                #[inline]
                fn div(self, f: FixedPoint<BITS, POINT, S, A, $n>) -> FixedPoint<BITS, POINT, S, A, $n> {
                    // Two shifts, each below the accumulator width.
                    let dividend = (FixedPoint::<BITS, POINT, S, A, $n>::widen_native(self) << POINT as usize)
                        << POINT as usize;
                    FixedPoint::<BITS, POINT, S, A, $n>::narrow(
                        dividend.wrapping_div(FixedPoint::<BITS, POINT, S, A, $n>::widen(f.raw())),
                    )
                }
            }

            impl<const BITS: u32, const POINT: u32, S, A> From<FixedPoint<BITS, POINT, S, A, $n>> for $n
            where
                S: Storage<A, $n>,
                A: Accumulator<S>,
                $n: Native<A>,
            {
                #[inline]
                fn from(f: FixedPoint<BITS, POINT, S, A, $n>) -> Self {
                    f.to_int()
                }
            }
        )*
    };
}

native_lhs_ops!(i8, i16, i32, i64, i128);

impl<const BITS: u32, const POINT: u32, S, A, N> Add<FixedPoint<BITS, POINT, S, A, N>> for f32
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    type Output = FixedPoint<BITS, POINT, S, A, N>;

    #[inline]
    fn add(self, f: FixedPoint<BITS, POINT, S, A, N>) -> FixedPoint<BITS, POINT, S, A, N> {
        let scaled = A::from_f32(self * Fixed::<BITS, POINT, S, A, N>::scale_f32());
        Fixed::<BITS, POINT, S, A, N>::narrow(scaled.wrapping_add(&Fixed::<BITS, POINT, S, A, N>::widen(f.raw())))
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> Sub<FixedPoint<BITS, POINT, S, A, N>> for f32
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    type Output = FixedPoint<BITS, POINT, S, A, N>;

    #[inline]
    fn sub(self, f: FixedPoint<BITS, POINT, S, A, N>) -> FixedPoint<BITS, POINT, S, A, N> {
        let scaled = A::from_f32(self * Fixed::<BITS, POINT, S, A, N>::scale_f32());
        Fixed::<BITS, POINT, S, A, N>::narrow(scaled.wrapping_sub(&Fixed::<BITS, POINT, S, A, N>::widen(f.raw())))
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> Mul<FixedPoint<BITS, POINT, S, A, N>> for f32
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    type Output = FixedPoint<BITS, POINT, S, A, N>;

    #[inline]
    fn mul(self, f: FixedPoint<BITS, POINT, S, A, N>) -> FixedPoint<BITS, POINT, S, A, N> {
        Fixed::<BITS, POINT, S, A, N>::narrow(A::from_f32(raw_f32(f) * self))
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> Div<FixedPoint<BITS, POINT, S, A, N>> for f32
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    type Output = FixedPoint<BITS, POINT, S, A, N>;

    #[inline]
    fn div(self, f: FixedPoint<BITS, POINT, S, A, N>) -> FixedPoint<BITS, POINT, S, A, N> {
        let scale = Fixed::<BITS, POINT, S, A, N>::scale_f32();
        Fixed::<BITS, POINT, S, A, N>::narrow(A::from_f32((self / raw_f32(f)) * scale * scale))
    }
}

// Conversions

impl<const BITS: u32, const POINT: u32, S, A, N> From<N> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn from(n: N) -> Self {
        Self::from_int(n)
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> From<f32> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn from(n: f32) -> Self {
        Self::from_f32(n)
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> From<f64> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn from(n: f64) -> Self {
        Self::from_f64(n)
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> From<FixedPoint<BITS, POINT, S, A, N>> for f32
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn from(f: FixedPoint<BITS, POINT, S, A, N>) -> Self {
        f.to_f32()
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> From<FixedPoint<BITS, POINT, S, A, N>> for f64
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn from(f: FixedPoint<BITS, POINT, S, A, N>) -> Self {
        f.to_f64()
    }
}

// Comparisons against scalars rescale the scalar, then compare raw values.

impl<const BITS: u32, const POINT: u32, S, A, N> PartialEq<N> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn eq(&self, n: &N) -> bool {
        Self::widen(self.raw()) == Self::widen_native(*n) << POINT as usize
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> PartialOrd<N> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn partial_cmp(&self, n: &N) -> Option<Ordering> {
        Some(Self::widen(self.raw()).cmp(&(Self::widen_native(*n) << POINT as usize)))
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> PartialEq<f32> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn eq(&self, n: &f32) -> bool {
        raw_f32(*self) == *n * Self::scale_f32()
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> PartialOrd<f32> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    #[inline]
    fn partial_cmp(&self, n: &f32) -> Option<Ordering> {
        raw_f32(*self).partial_cmp(&(*n * Self::scale_f32()))
    }
}

// Folds

impl<const BITS: u32, const POINT: u32, S, A, N> Sum for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a, const BITS: u32, const POINT: u32, S, A, N> Sum<&'a Self> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> Product for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), Mul::mul)
    }
}
