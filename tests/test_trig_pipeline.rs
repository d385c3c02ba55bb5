// Integration tests across both crates: layout description, arithmetic and trig
use calcfix::{abs, cos, sin, FixedFormat, FixedPointError, I16F16, I18F6};

#[test]
fn test_rotate_point_end_to_end() {
    // Rotate (1, 0) by a quarter turn in eight steps
    let step = I16F16::from_f32(3.141592) / 16;
    let (c, s) = (cos(step), sin(step));

    let mut x = I16F16::one();
    let mut y = I16F16::zero();
    for _ in 0..8 {
        let nx = x * c - y * s;
        let ny = x * s + y * c;
        x = nx;
        y = ny;
    }

    println!("rotated point: ({}, {})", x, y);
    assert!(abs(x).to_f32() < 0.01, "x = {}", x);
    assert!((y.to_f32() - 1.0).abs() < 0.01, "y = {}", y);
}

#[test]
fn test_layout_from_config() {
    let fmt: FixedFormat = serde_json::from_str(r#"{"bits":24,"point":6}"#).unwrap();
    assert_eq!(fmt, I18F6::FORMAT);
    assert_eq!(fmt.validate(), Ok(fmt));
    assert_eq!("Q18.6".parse::<FixedFormat>(), Ok(I18F6::FORMAT));
    assert_eq!(I16F16::FORMAT.to_string(), "Q16.16");

    let json = serde_json::to_string(&I16F16::FORMAT).unwrap();
    assert_eq!(json, r#"{"bits":32,"point":16}"#);
}

#[test]
fn test_calculator_expression() {
    // (3.5 * 4 - 1) / 2 + sin(0) = 6.5
    let x = I18F6::from_f32(3.5);
    let y = (x * 4 - 1) / 2 + sin(I18F6::zero());
    assert_eq!(y.to_f32(), 6.5);
    assert_eq!(y.to_int(), 6);

    let mut acc = I18F6::zero();
    acc += x;
    acc -= 1;
    acc *= 2;
    acc /= I18F6::from_f32(0.5);
    assert_eq!(acc, 10);
}

#[test]
fn test_checked_layer_reports_overflow() {
    let big = I18F6::max_value();
    assert!(matches!(
        big.checked_add(I18F6::one()),
        Err(FixedPointError::Overflow { bits: 24, .. })
    ));
    // The unchecked operator wraps instead
    assert_eq!(big + I18F6::resolution(), I18F6::min_value());
    assert!(matches!(
        I18F6::one().checked_div(I18F6::zero()),
        Err(FixedPointError::DivisionByZero { .. })
    ));
}
