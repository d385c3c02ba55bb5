//! Absolute value, sine and cosine.
//!
//! Everything here is composed from [`FixedPoint`] operators, so results wrap
//! and truncate exactly as the underlying layout does. The constants are
//! derived from a single-precision pi literal on every call; their precision
//! is bounded by both the literal and the layout's resolution.

use calcfix_num::{Accumulator, FixedPoint, Native, Storage};

/// Single-precision pi every angle constant is derived from.
#[allow(clippy::approx_constant)]
const PI_LITERAL: f32 = 3.141592;

struct Angles<F> {
    pi: F,
    half_pi: F,
    tau: F,
}

fn angles<const BITS: u32, const POINT: u32, S, A, N>() -> Angles<FixedPoint<BITS, POINT, S, A, N>>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A> + From<i16>,
{
    let pi = FixedPoint::<BITS, POINT, S, A, N>::from_f32(PI_LITERAL);
    Angles {
        pi,
        half_pi: pi / native::<N>(2),
        tau: pi * native::<N>(2),
    }
}

// `NumCast` also provides a `from`, so the conversion is spelled out.
#[inline]
fn native<N: From<i16>>(n: i16) -> N {
    <N as From<i16>>::from(n)
}

/// `|x|`. The minimum value of a layout has no positive counterpart and is
/// returned unchanged.
pub fn abs<const BITS: u32, const POINT: u32, S, A, N>(
    x: FixedPoint<BITS, POINT, S, A, N>,
) -> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A>,
{
    if x.is_negative() {
        -x
    } else {
        x
    }
}

/// Cosine for `x` in `[0, pi]`.
///
/// Inputs in `(pi, tau]` are folded back with a sign flip and still give
/// usable results; anything further out is not range-reduced, use [`cos`].
pub fn cos_domain<const BITS: u32, const POINT: u32, S, A, N>(
    x: FixedPoint<BITS, POINT, S, A, N>,
) -> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A> + From<i16>,
{
    folded_cos(x)
}

/// Sine for `x` in `[0, tau]`, evaluated as `cos(x - pi/2)`.
pub fn sin_domain<const BITS: u32, const POINT: u32, S, A, N>(
    x: FixedPoint<BITS, POINT, S, A, N>,
) -> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A> + From<i16>,
{
    let half_pi = angles::<BITS, POINT, S, A, N>().half_pi;
    folded_cos(x - half_pi)
}

/// Cosine of any angle in radians.
pub fn cos<const BITS: u32, const POINT: u32, S, A, N>(
    x: FixedPoint<BITS, POINT, S, A, N>,
) -> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A> + From<i16>,
{
    cos_domain(reduce(x))
}

/// Sine of any angle in radians.
pub fn sin<const BITS: u32, const POINT: u32, S, A, N>(
    x: FixedPoint<BITS, POINT, S, A, N>,
) -> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A> + From<i16>,
{
    sin_domain(reduce(x))
}

/// Bring `x` into `[0, tau]` by working on raw values: modulo above `tau`,
/// reflection below zero.
fn reduce<const BITS: u32, const POINT: u32, S, A, N>(
    x: FixedPoint<BITS, POINT, S, A, N>,
) -> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A> + From<i16>,
{
    let tau = angles::<BITS, POINT, S, A, N>().tau;
    let reduced = if x > tau {
        x % tau
    } else if x.is_negative() {
        tau - ((-x) % tau)
    } else {
        return x;
    };
    tracing::trace!(input = %x, reduced = %reduced, "range-reduced angle");
    reduced
}

/// Fold `x` onto `[0, pi/2]` using the symmetries of cosine, then evaluate the
/// polynomial there and restore the sign.
fn folded_cos<const BITS: u32, const POINT: u32, S, A, N>(
    x: FixedPoint<BITS, POINT, S, A, N>,
) -> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A> + From<i16>,
{
    let Angles { pi, half_pi, .. } = angles::<BITS, POINT, S, A, N>();
    let mut x = x;
    let mut negate = false;

    // cos(x) = -cos(x - pi)
    if x > pi {
        x -= pi;
        negate = true;
    }
    // cos(-x) = cos(x)
    x = abs(x);
    // cos(x) = -cos(pi - x)
    if x > half_pi {
        x = pi - x;
        negate = !negate;
    }

    let y = taylor_cos(x);
    if negate {
        -y
    } else {
        y
    }
}

/// `1 - x^2/2 + x^4/24 - x^6/720`
fn taylor_cos<const BITS: u32, const POINT: u32, S, A, N>(
    x: FixedPoint<BITS, POINT, S, A, N>,
) -> FixedPoint<BITS, POINT, S, A, N>
where
    S: Storage<A, N>,
    A: Accumulator<S>,
    N: Native<A> + From<i16>,
{
    let x2 = x * x;
    let x4 = x2 * x2;
    FixedPoint::<BITS, POINT, S, A, N>::one() - x2 / native::<N>(2) + x4 / native::<N>(24)
        - (x4 * x2) / native::<N>(720)
}
