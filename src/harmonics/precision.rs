//! High-precision scalar arithmetic backing the coefficient derivation.
//!
//! The alternating-sign factorial sums in the solid-harmonic expansion cancel
//! almost completely for high angular momenta, so intermediate values must be
//! carried at far more than double precision. The arithmetic is isolated
//! behind the narrow [`PrecisionScalar`] capability so that the derivation in
//! [`crate::harmonics::generate`] never touches a concrete number type.

use std::ops::{Add, Div, Mul, Neg, Sub};

use factorial::Factorial;
use num::{BigInt, BigRational, BigUint, Integer, Signed, ToPrimitive, Zero};

#[cfg(test)]
#[path = "precision_tests.rs"]
mod precision_tests;

/// Number of significant decimal digits carried through square roots.
const SQRT_DIGITS: u32 = 120;

/// The scalar operations required by the coefficient derivation.
///
/// Implementors must be exact under addition and multiplication of factorial
/// ratios, so that complete cancellation of a sum yields a value for which
/// [`PrecisionScalar::is_zero`] is `true`. The only lossy operations are
/// [`PrecisionScalar::sqrt`], which may approximate to no fewer than 100
/// significant decimal digits, and the final [`PrecisionScalar::to_f64`]
/// cast.
pub trait PrecisionScalar:
    Clone
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Converts a small non-negative integer.
    fn from_u32(n: u32) -> Self;

    /// Computes $`n!`$ exactly.
    fn factorial(n: u32) -> Self;

    /// Computes $`2^l`$ exactly.
    fn pow2(l: u32) -> Self {
        (0..l).fold(Self::one(), |acc, _| acc * Self::from_u32(2))
    }

    /// Computes the principal square root, or `None` for negative values.
    fn sqrt(&self) -> Option<Self>;

    /// Indicates whether the value is exactly zero.
    fn is_zero(&self) -> bool;

    /// Casts to double precision, or `None` when the value does not fit.
    fn to_f64(&self) -> Option<f64>;
}

/// The default [`PrecisionScalar`] backend: an arbitrary-precision rational.
///
/// Sums and products of factorial ratios are exact, square roots are carried
/// to [`SQRT_DIGITS`] significant decimal digits, and [`ExactScalar::to_f64`]
/// rounds half-to-even exactly once on exit.
#[derive(Clone, Debug, PartialEq)]
pub struct ExactScalar(BigRational);

impl Add for ExactScalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for ExactScalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for ExactScalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Div for ExactScalar {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self(self.0 / rhs.0)
    }
}

impl Neg for ExactScalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl PrecisionScalar for ExactScalar {
    fn zero() -> Self {
        Self(BigRational::zero())
    }

    fn one() -> Self {
        Self(BigRational::from_integer(BigInt::from(1u32)))
    }

    fn from_u32(n: u32) -> Self {
        Self(BigRational::from_integer(BigInt::from(n)))
    }

    fn factorial(n: u32) -> Self {
        let fac = BigUint::from(n)
            .checked_factorial()
            .unwrap_or_else(|| panic!("Unable to compute the factorial of {n}."));
        Self(BigRational::from_integer(BigInt::from(fac)))
    }

    fn sqrt(&self) -> Option<Self> {
        if self.0.is_negative() {
            return None;
        }
        if self.0.is_zero() {
            return Some(Self::zero());
        }
        // √(n/d) = √(nd)/d, with the integer root scaled to SQRT_DIGITS
        // decimal digits.
        let numer = self.0.numer().magnitude();
        let denom = self.0.denom().magnitude();
        let scale = BigUint::from(10u32).pow(SQRT_DIGITS);
        let root = (numer * denom * &scale * &scale).sqrt();
        Some(Self(BigRational::new(
            BigInt::from(root),
            BigInt::from(denom * scale),
        )))
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn to_f64(&self) -> Option<f64> {
        rational_to_f64(&self.0)
    }
}

/// Converts an arbitrary-precision rational to the nearest double, rounding
/// half to even, with a single rounding step.
fn rational_to_f64(value: &BigRational) -> Option<f64> {
    if value.is_zero() {
        return Some(0.0);
    }
    let numer = value.numer().magnitude().clone();
    let denom = value.denom().magnitude().clone();

    // Scale the quotient so that it carries exactly 53 significant bits.
    let mut shift =
        53i64 - (i64::try_from(numer.bits()).ok()? - i64::try_from(denom.bits()).ok()?);
    let (mut quotient, mut remainder, mut scaled_denom) = shifted_div(&numer, &denom, shift)?;
    while quotient.bits() > 53 {
        shift -= 1;
        (quotient, remainder, scaled_denom) = shifted_div(&numer, &denom, shift)?;
    }
    while quotient.bits() < 53 {
        shift += 1;
        (quotient, remainder, scaled_denom) = shifted_div(&numer, &denom, shift)?;
    }

    // Round half to even on the discarded remainder.
    let twice_remainder = &remainder << 1usize;
    if twice_remainder > scaled_denom || (twice_remainder == scaled_denom && quotient.is_odd()) {
        quotient += 1u32;
        if quotient.bits() > 53 {
            quotient >>= 1usize;
            shift -= 1;
        }
    }

    let exponent = -shift;
    if !(-1074..=1023).contains(&exponent) {
        return None;
    }
    let magnitude = quotient.to_u64()? as f64 * 2f64.powi(i32::try_from(exponent).ok()?);
    if value.is_negative() {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}

/// Computes `⌊numer·2^shift / denom⌋` together with the remainder and the
/// effective denominator of the division.
fn shifted_div(numer: &BigUint, denom: &BigUint, shift: i64) -> Option<(BigUint, BigUint, BigUint)> {
    if shift >= 0 {
        let scaled = numer << usize::try_from(shift).ok()?;
        let (quotient, remainder) = scaled.div_rem(denom);
        Some((quotient, remainder, denom.clone()))
    } else {
        let scaled_denom = denom << usize::try_from(-shift).ok()?;
        let (quotient, remainder) = numer.div_rem(&scaled_denom);
        Some((quotient, remainder, scaled_denom))
    }
}
