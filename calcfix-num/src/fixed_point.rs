use core::fmt;
use core::marker::PhantomData;

use num_traits::AsPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FixedPointError, Result};
use crate::format::FixedFormat;
use crate::raw::{Accumulator, Native, RawInt, Storage};

/// A real number stored as `real * 2^POINT` in a `BITS`-bit signed integer.
///
/// - `S` holds the scaled value; it must be at least `BITS` wide and the value
///   is kept sign-extended from bit `BITS - 1`, like a `BITS`-bit bit-field.
/// - `A` is the accumulator: every operation widens into it, computes, then
///   narrows back. It must be strictly wider than `BITS`; give it twice the
///   width if products of large values must not wrap.
/// - `N` is the whole-number type used by [`from_int`](Self::from_int),
///   [`to_int`](Self::to_int) and the mixed integer operators.
///
/// Overflow is never detected on the operator path: results wrap modulo
/// `2^BITS` and fractional bits are truncated toward zero. Use the `checked_*`
/// methods (or the `strict` feature in debug builds) to catch overflow.
///
/// Values of different layouts never mix; there is no implicit rescaling.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint<const BITS: u32, const POINT: u32, S = i32, A = i64, N = i32> {
    raw: S,
    _layout: PhantomData<fn() -> (A, N)>,
}

/// The 24-bit calculator layout, 6 fractional bits (`Q18.6`).
pub type I18F6 = FixedPoint<24, 6, i32, i64, i32>;

/// 32-bit value with 16 fractional bits (`Q16.16`).
pub type I16F16 = FixedPoint<32, 16, i32, i64, i32>;

/// 16-bit value with 8 fractional bits (`Q8.8`).
pub type I8F8 = FixedPoint<16, 8, i16, i32, i16>;

impl<const BITS: u32, const POINT: u32, S, A, N> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    /// Layout of this type as a runtime value.
    pub const FORMAT: FixedFormat = FixedFormat::new(BITS, POINT);

    const LAYOUT_OK: () = {
        assert!(POINT < BITS, "fractional bits must be fewer than total bits");
        assert!(BITS <= S::WIDTH, "storage type is narrower than BITS");
        assert!(BITS < A::WIDTH, "accumulator must be wider than BITS");
    };

    /// Wrap a raw scaled integer, keeping only its low `BITS` bits.
    #[inline]
    pub fn from_raw(raw: S) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT_OK;
        Self {
            raw: raw.sign_extend(BITS),
            _layout: PhantomData,
        }
    }

    /// The scaled integer, `real * 2^POINT`.
    #[inline]
    pub fn raw(self) -> S {
        self.raw
    }

    /// `n * 2^POINT`. Wraps when `n` does not fit in `BITS - POINT` bits.
    #[inline]
    pub fn from_int(n: N) -> Self {
        Self::narrow(Self::widen_native(n) << POINT as usize)
    }

    /// `n * 2^POINT`, truncated toward zero. Out-of-range values wrap.
    #[inline]
    pub fn from_f32(n: f32) -> Self {
        Self::narrow(A::from_f32(n * Self::scale_f32()))
    }

    #[inline]
    pub fn from_f64(n: f64) -> Self {
        Self::narrow(A::from_f64(n * Self::scale_f64()))
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        <S as AsPrimitive<f32>>::as_(self.raw) / Self::scale_f32()
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        <S as AsPrimitive<f64>>::as_(self.raw) / Self::scale_f64()
    }

    /// Whole part, truncated toward zero.
    #[inline]
    pub fn to_int(self) -> N {
        let whole = Self::narrow(Self::widen(self.raw).wrapping_div(Self::scale()));
        <S as AsPrimitive<N>>::as_(whole.raw)
    }

    pub fn zero() -> Self {
        Self::from_raw(S::zero())
    }

    pub fn one() -> Self {
        Self::narrow(Self::scale())
    }

    /// Smallest positive value, `2^-POINT`.
    pub fn resolution() -> Self {
        Self::from_raw(S::one())
    }

    pub fn min_value() -> Self {
        Self::narrow(-Self::half_range())
    }

    pub fn max_value() -> Self {
        Self::narrow(Self::half_range() - A::one())
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.raw.is_negative()
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.raw.is_zero()
    }

    // Checked layer

    pub fn checked_from_int(n: N) -> Result<Self> {
        let wide = Self::widen_native(n);
        let limit = A::one() << (BITS - POINT - 1) as usize;
        if wide < -limit || wide >= limit {
            return Err(Self::out_of_range(<N as AsPrimitive<f64>>::as_(n)));
        }
        Ok(Self::from_int(n))
    }

    pub fn checked_from_f32(n: f32) -> Result<Self> {
        Self::checked_from_f64(n as f64)
    }

    pub fn checked_from_f64(n: f64) -> Result<Self> {
        if !n.is_finite() || !Self::FORMAT.is_representable(n) {
            return Err(Self::out_of_range(n));
        }
        Ok(Self::from_f64(n))
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        Self::checked_narrow(Self::widen(self.raw) + Self::widen(rhs.raw), "add")
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        Self::checked_narrow(Self::widen(self.raw) - Self::widen(rhs.raw), "sub")
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        let product = Self::widen(self.raw)
            .checked_mul(&Self::widen(rhs.raw))
            .ok_or(FixedPointError::Overflow { op: "mul", bits: BITS })?;
        Self::checked_narrow(product.wrapping_div(Self::scale()), "mul")
    }

    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(FixedPointError::DivisionByZero { op: "div" });
        }
        let quotient = Self::widen(self.raw)
            .checked_mul(&Self::scale())
            .and_then(|dividend| dividend.checked_div(&Self::widen(rhs.raw)))
            .ok_or(FixedPointError::Overflow { op: "div", bits: BITS })?;
        Self::checked_narrow(quotient, "div")
    }

    pub fn checked_neg(self) -> Result<Self> {
        Self::checked_narrow(-Self::widen(self.raw), "neg")
    }

    // Accumulator plumbing shared with the operator impls

    /// `2^POINT` in the accumulator.
    #[inline]
    pub(crate) fn scale() -> A {
        A::one() << POINT as usize
    }

    #[inline]
    pub(crate) fn scale_f32() -> f32 {
        <A as AsPrimitive<f32>>::as_(Self::scale())
    }

    #[inline]
    pub(crate) fn scale_f64() -> f64 {
        <A as AsPrimitive<f64>>::as_(Self::scale())
    }

    #[inline]
    pub(crate) fn widen(raw: S) -> A {
        <S as AsPrimitive<A>>::as_(raw)
    }

    #[inline]
    pub(crate) fn widen_native(n: N) -> A {
        <N as AsPrimitive<A>>::as_(n)
    }

    /// The one place a wide intermediate is cut back to `BITS` bits.
    ///
    /// Bits above `BITS` are discarded; with the `strict` feature a debug
    /// build panics instead of wrapping.
    #[inline]
    pub(crate) fn narrow(wide: A) -> Self {
        #[cfg(feature = "strict")]
        debug_assert!(
            Self::fits(wide),
            "fixed-point overflow: {:?} does not fit in {}",
            wide,
            Self::FORMAT
        );
        Self::from_raw(<A as AsPrimitive<S>>::as_(wide))
    }

    /// `2^(BITS - 1)`, the magnitude of the most negative raw value.
    #[inline]
    fn half_range() -> A {
        A::one() << (BITS - 1) as usize
    }

    #[inline]
    fn fits(wide: A) -> bool {
        wide >= -Self::half_range() && wide < Self::half_range()
    }

    fn checked_narrow(wide: A, op: &'static str) -> Result<Self> {
        if Self::fits(wide) {
            Ok(Self::narrow(wide))
        } else {
            Err(FixedPointError::Overflow { op, bits: BITS })
        }
    }

    fn out_of_range(value: f64) -> FixedPointError {
        FixedPointError::OutOfRange {
            value,
            bits: BITS,
            point: POINT,
        }
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> Default for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> fmt::Display for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*}", precision, self.to_f64()),
            None => write!(f, "{}", self.to_f64()),
        }
    }
}

impl<const BITS: u32, const POINT: u32, S, A, N> fmt::Debug for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, raw {:?})", self.to_f64(), Self::FORMAT, self.raw)
    }
}

// Serialized as the raw scaled integer so values survive bit-exact.

impl<const BITS: u32, const POINT: u32, S, A, N> Serialize for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N> + Serialize,
    A: Accumulator<S>,
    N: Native<A>,
{
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> core::result::Result<Ser::Ok, Ser::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, const BITS: u32, const POINT: u32, S, A, N> Deserialize<'de> for FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N> + Deserialize<'de>,
    A: Accumulator<S>,
    N: Native<A>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        S::deserialize(deserializer).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_roundtrip_calculator_layout() {
        let x = I18F6::from_f32(2.5);
        assert_eq!(x.raw(), 160);
        assert_eq!(x.to_f32(), 2.5);
    }

    #[test]
    fn test_float_construction_truncates_toward_zero() {
        assert_eq!(I18F6::from_f32(2.51).raw(), 160);
        assert_eq!(I18F6::from_f32(-2.51).raw(), -160);
        assert_eq!(I18F6::from_f32(-0.01).raw(), 0);
        assert_eq!(I18F6::from_f64(0.015625).raw(), 1);
    }

    #[test]
    fn test_int_construction_and_conversion() {
        let x = I16F16::from_int(-7);
        assert_eq!(x.raw(), -7 << 16);
        assert_eq!(x.to_int(), -7);
        assert_eq!(I16F16::from_f32(-7.75).to_int(), -7);
        assert_eq!(I16F16::from_f32(7.75).to_int(), 7);
    }

    #[test]
    fn test_int_construction_wraps_at_width() {
        // 2^17 << 6 == 2^23, the sign bit of a 24-bit value
        assert_eq!(I18F6::from_int(131_072), I18F6::min_value());
        assert_eq!(I18F6::from_int(131_071).to_int(), 131_071);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(I18F6::min_value().raw(), -(1 << 23));
        assert_eq!(I18F6::max_value().raw(), (1 << 23) - 1);
        assert_eq!(I8F8::min_value().raw(), i16::MIN);
        assert_eq!(I8F8::max_value().raw(), i16::MAX);
        assert_eq!(I16F16::resolution().to_f64(), 1.0 / 65536.0);
        assert_eq!(I8F8::one().raw(), 256);
        assert_eq!(I8F8::default(), I8F8::zero());
    }

    #[test]
    fn test_from_raw_sign_extends() {
        assert_eq!(I18F6::from_raw(1 << 23).raw(), -(1 << 23));
        assert_eq!(I18F6::from_raw(0x0100_0040).raw(), 64);
    }

    #[test]
    fn test_format_const() {
        assert_eq!(I18F6::FORMAT, FixedFormat::new(24, 6));
        assert_eq!(I8F8::FORMAT.to_string(), "Q8.8");
    }

    #[test]
    fn test_checked_overflow() {
        let big = I8F8::from_int(100);
        assert!(matches!(
            big.checked_mul(big),
            Err(FixedPointError::Overflow { op: "mul", bits: 16 })
        ));
        assert!(matches!(
            big.checked_add(big),
            Err(FixedPointError::Overflow { op: "add", .. })
        ));
        assert_eq!(big.checked_sub(big).unwrap(), I8F8::zero());
        assert!(I8F8::min_value().checked_neg().is_err());
        assert_eq!(I8F8::from_int(3).checked_neg().unwrap(), I8F8::from_int(-3));
    }

    #[test]
    fn test_checked_div() {
        let x = I16F16::from_int(3);
        assert!(matches!(
            x.checked_div(I16F16::zero()),
            Err(FixedPointError::DivisionByZero { .. })
        ));
        assert_eq!(x.checked_div(I16F16::from_int(2)).unwrap().to_f32(), 1.5);
        assert!(I16F16::from_int(1000).checked_div(I16F16::resolution()).is_err());
    }

    #[test]
    fn test_checked_construction() {
        assert!(I18F6::checked_from_int(131_071).is_ok());
        assert!(matches!(
            I18F6::checked_from_int(131_072),
            Err(FixedPointError::OutOfRange { bits: 24, point: 6, .. })
        ));
        assert!(I8F8::checked_from_f32(127.5).is_ok());
        assert!(I8F8::checked_from_f32(128.0).is_err());
        assert!(I8F8::checked_from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_display_and_debug() {
        let x = I18F6::from_f32(-1.25);
        assert_eq!(x.to_string(), "-1.25");
        assert_eq!(format!("{:.3}", x), "-1.250");
        assert_eq!(format!("{:?}", x), "-1.25 (Q18.6, raw -80)");
    }

    #[test]
    fn test_serde_keeps_raw_bits() {
        let x = I16F16::from_f32(-3.140625);
        let bytes = bincode::serialize(&x).unwrap();
        assert_eq!(bytes, x.raw().to_le_bytes());
        let back: I16F16 = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, x);
    }
}
