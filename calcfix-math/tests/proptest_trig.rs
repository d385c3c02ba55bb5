use calcfix_math::{abs, cos, sin};
use calcfix_num::{I16F16, I8F8};
use proptest::prelude::*;

// Raw Q16.16 angles in [-10, 10] radians
fn q16_angle() -> impl Strategy<Value = i32> {
    -(10i32 << 16)..(10 << 16)
}

// Property 1: Sine tracks the f64 reference over several periods
proptest! {
    #[test]
    fn prop_sin_matches_reference(raw in q16_angle()) {
        let x = I16F16::from_raw(raw);
        let err = (sin(x).to_f64() - x.to_f64().sin()).abs();
        prop_assert!(err < 0.002, "sin({}) off by {}", x, err);
    }
}

// Property 2: Cosine tracks the f64 reference over several periods
proptest! {
    #[test]
    fn prop_cos_matches_reference(raw in q16_angle()) {
        let x = I16F16::from_raw(raw);
        let err = (cos(x).to_f64() - x.to_f64().cos()).abs();
        prop_assert!(err < 0.002, "cos({}) off by {}", x, err);
    }
}

// Property 3: Adding a full turn changes nothing once the angle is positive
proptest! {
    #[test]
    fn prop_sin_is_periodic(raw in 1i32..(10 << 16)) {
        let x = I16F16::from_raw(raw);
        let tau = I16F16::from_f32(3.141592) * 2;
        prop_assert_eq!(sin(x + tau), sin(x));
        prop_assert_eq!(cos(x + tau), cos(x));
    }
}

// Property 4: Sine is odd, up to the polynomial error on each side
proptest! {
    #[test]
    fn prop_sin_is_odd(raw in q16_angle()) {
        let x = I16F16::from_raw(raw);
        let sum = (sin(x) + sin(-x)).to_f64();
        prop_assert!(sum.abs() < 0.004, "sin({0}) + sin(-{0}) = {1}", x, sum);
    }
}

// Property 5: Results stay inside [-1, 1] plus the polynomial error
proptest! {
    #[test]
    fn prop_bounded(raw in q16_angle()) {
        let x = I16F16::from_raw(raw);
        let limit = I16F16::from_f32(1.001);
        prop_assert!(abs(sin(x)) <= limit);
        prop_assert!(abs(cos(x)) <= limit);
    }
}

// Property 6: Absolute value is non-negative everywhere but the minimum
proptest! {
    #[test]
    fn prop_abs_non_negative(raw in (i32::MIN + 1)..=i32::MAX) {
        let x = I16F16::from_raw(raw);
        prop_assert!(!abs(x).is_negative());
        prop_assert_eq!(abs(x), abs(-x));
    }
}

// Property 7: Q8.8 stays usable, within its coarser resolution
proptest! {
    #[test]
    fn prop_q8_8_tracks_reference(raw in -(6i16 << 8)..(6 << 8)) {
        let x = I8F8::from_raw(raw);
        let s = (sin(x).to_f64() - x.to_f64().sin()).abs();
        let c = (cos(x).to_f64() - x.to_f64().cos()).abs();
        prop_assert!(s < 0.03 && c < 0.03, "Q8.8 at {}: sin err {}, cos err {}", x, s, c);
    }
}
