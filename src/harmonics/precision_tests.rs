use approx;
use num::{BigInt, BigRational};

use crate::harmonics::precision::{ExactScalar, PrecisionScalar};

#[test]
fn test_precision_factorial() {
    assert_eq!(ExactScalar::factorial(0).to_f64().unwrap(), 1.0);
    assert_eq!(ExactScalar::factorial(5).to_f64().unwrap(), 120.0);
    assert_eq!(ExactScalar::factorial(10).to_f64().unwrap(), 3628800.0);

    // 18! is the largest factorial exactly representable in a double.
    assert_eq!(
        ExactScalar::factorial(18).to_f64().unwrap(),
        6402373705728000.0
    );
}

#[test]
fn test_precision_pow2() {
    assert_eq!(ExactScalar::pow2(0).to_f64().unwrap(), 1.0);
    assert_eq!(ExactScalar::pow2(10).to_f64().unwrap(), 1024.0);
    assert_eq!(ExactScalar::pow2(60).to_f64().unwrap(), 2f64.powi(60));
}

#[test]
fn test_precision_exact_cancellation() {
    // 1/3 + 1/6 − 1/2 cancels exactly; a floating-point accumulation would
    // leave residue.
    let third = ExactScalar::one() / ExactScalar::from_u32(3);
    let sixth = ExactScalar::one() / ExactScalar::from_u32(6);
    let half = ExactScalar::one() / ExactScalar::from_u32(2);
    assert!((third + sixth - half).is_zero());

    let third = ExactScalar::one() / ExactScalar::from_u32(3);
    assert!(!third.is_zero());
}

#[test]
fn test_precision_sqrt() {
    // Perfect squares come back exactly.
    assert_eq!(ExactScalar::from_u32(4).sqrt().unwrap().to_f64().unwrap(), 2.0);
    assert_eq!(
        ExactScalar::from_u32(144).sqrt().unwrap().to_f64().unwrap(),
        12.0
    );
    assert_eq!(ExactScalar::zero().sqrt().unwrap().to_f64().unwrap(), 0.0);

    // Irrational roots agree with the correctly rounded hardware result.
    assert_eq!(
        ExactScalar::from_u32(2).sqrt().unwrap().to_f64().unwrap(),
        2f64.sqrt()
    );
    assert_eq!(
        ExactScalar::from_u32(3).sqrt().unwrap().to_f64().unwrap(),
        3f64.sqrt()
    );

    // A non-representable radicand stays within one unit in the last place of
    // the doubly rounded hardware evaluation.
    let twelfth = ExactScalar::one() / ExactScalar::from_u32(12);
    assert!(approx::relative_eq!(
        twelfth.sqrt().unwrap().to_f64().unwrap(),
        (1.0f64 / 12.0).sqrt(),
        max_relative = 1e-15
    ));

    assert!((ExactScalar::zero() - ExactScalar::one()).sqrt().is_none());
}

#[test]
fn test_precision_to_f64() {
    // Exactly representable ratios convert exactly.
    let exact = ExactScalar(BigRational::new(
        BigInt::from(123_456_789),
        BigInt::from(1024),
    ));
    assert_eq!(exact.to_f64().unwrap(), 123_456_789.0 / 1024.0);

    // Correct rounding matches the correctly rounded hardware division.
    let third = ExactScalar::one() / ExactScalar::from_u32(3);
    assert_eq!(third.to_f64().unwrap(), 1.0 / 3.0);
    let neg_third = ExactScalar::zero() - ExactScalar::one() / ExactScalar::from_u32(3);
    assert_eq!(neg_third.to_f64().unwrap(), -1.0 / 3.0);

    // 2^53 + 1 sits exactly half-way between neighbours and rounds to even.
    let tie = ExactScalar(BigRational::from_integer(BigInt::from(
        9_007_199_254_740_993u64,
    )));
    assert_eq!(tie.to_f64().unwrap(), 9_007_199_254_740_992.0);

    assert_eq!(ExactScalar::zero().to_f64().unwrap(), 0.0);
}
