//! On-the-fly derivation of Cartesian → real solid-harmonic coefficients.
//!
//! Implements the closed-form expansion of a real solid harmonic of degree
//! $`l`$ in raw Cartesian powers $`x^{l_x} y^{l_y} z^{l_z}`$, following
//! Equation 23 of Pickard, F. C., Schaefer, H. F. & Brooks, B. R.
//! *J. Chem. Phys.* **140**, 184101 (2014),
//! [DOI](https://doi.org/10.1063/1.4873020).

use super::precision::{ExactScalar, PrecisionScalar};

#[cfg(test)]
#[path = "generate_tests.rs"]
mod generate_tests;

/// Derives the solid-harmonic expansion coefficients for angular momentum `l`
/// with the default arbitrary-precision backend.
///
/// See [`solid_harmonic_terms_with`].
pub fn solid_harmonic_terms(l: u32) -> Vec<Vec<((u32, u32, u32), f64)>> {
    solid_harmonic_terms_with::<ExactScalar>(l)
}

/// Derives the solid-harmonic expansion coefficients for angular momentum `l`.
///
/// For each magnetic number $`m = 0, \ldots, l`$, every Cartesian power
/// triple $`(l_x, l_y, l_z)`$ with $`l_x + l_y + l_z = l`$ receives a scalar
/// contribution
///
/// ```math
/// p = \frac{m!}{2^l} \sqrt{\frac{(l-m)!}{(l+m)!}\,(2 - \delta_{m0})}
///     \sum_{i=j}^{\lfloor (l-m)/2 \rfloor}
///         \frac{(-1)^i\,(2l-2i)!}{(l-i)!\,(i-j)!\,(l-m-2i)!}
///     \sum_{k=0}^{j}
///         \frac{(-1)^k}{(j-k)!\,k!\,(l_x-2k)!\,(m-l_x+2k)!},
/// ```
///
/// with $`j = (l_x + l_y - m)/2`$; the triple is skipped when $`j`$ is
/// half-integral or negative, and summands whose factorial arguments would be
/// negative are omitted. The parity of $`m - l_x`$ decides whether $`p`$
/// enters the cosine or the sine combination of the $`\pm m`$ harmonics, with
/// an alternating sign.
///
/// # Arguments
///
/// * `l` - The angular momentum of the shell.
///
/// # Returns
///
/// One term list per spherical component, ordered $`m = 0`$, then cosine and
/// sine for each $`m = 1, \ldots, l`$ — `2l + 1` lists in total. Each list
/// pairs a Cartesian power triple with its double-precision coefficient;
/// triples whose contribution cancels exactly are absent.
///
/// # Panics
///
/// Panics when a required factorial cannot be computed or a coefficient does
/// not fit a double.
pub fn solid_harmonic_terms_with<P: PrecisionScalar>(l: u32) -> Vec<Vec<((u32, u32, u32), f64)>> {
    let mut entries = Vec::with_capacity(2 * l as usize + 1);
    for m in 0..=l {
        let mi32 = i32::try_from(m).unwrap_or_else(|_| panic!("Cannot convert `{m}` to `i32`."));

        // Normalisation: m!/2^l × √((l−m)!/(l+m)! × 2^{δ}), the doubling
        // accounting for the real combination of the ±m harmonics.
        let prefactor = P::factorial(m) / P::pow2(l);
        let mut radicand = P::factorial(l - m) / P::factorial(l + m);
        if m > 0 {
            radicand = radicand * P::from_u32(2);
        }
        let root = radicand
            .sqrt()
            .expect("The normalisation radicand is non-negative.");

        let mut cosine_terms: Vec<((u32, u32, u32), P)> = Vec::new();
        let mut sine_terms: Vec<((u32, u32, u32), P)> = Vec::new();
        for lz in 0..=l {
            for ly in 0..=(l - lz) {
                let lx = l - ly - lz;
                let lxi32 =
                    i32::try_from(lx).unwrap_or_else(|_| panic!("Cannot convert `{lx}` to `i32`."));
                let jj = lxi32 + i32::try_from(ly).expect("Unable to convert `ly` to `i32`.")
                    - mi32;
                if jj < 0 || jj.rem_euclid(2) == 1 {
                    continue;
                }
                let j = u32::try_from(jj.div_euclid(2)).expect("`j` is non-negative.");

                // First alternating factorial sum.
                let mut si = P::zero();
                for i in 0..=((l - m).div_euclid(2)) {
                    if i >= j {
                        let term = P::factorial(2 * l - 2 * i)
                            / (P::factorial(l - i)
                                * P::factorial(i - j)
                                * P::factorial(l - m - 2 * i));
                        si = if i % 2 == 1 { si - term } else { si + term };
                    }
                }

                // Second alternating factorial sum.
                let mut sk = P::zero();
                for k in 0..=j {
                    if lx >= 2 * k && m + 2 * k >= lx {
                        let term = P::one()
                            / (P::factorial(j - k)
                                * P::factorial(k)
                                * P::factorial(lx - 2 * k)
                                * P::factorial(m + 2 * k - lx));
                        sk = if k % 2 == 1 { sk - term } else { sk + term };
                    }
                }

                let p = prefactor.clone() * si * sk;
                if p.is_zero() {
                    continue;
                }

                // The parity of m − lx separates the cosine (real) and sine
                // (imaginary) combinations.
                let delta = mi32 - lxi32;
                if delta.rem_euclid(2) == 1 {
                    let alternation = (delta - 1).div_euclid(2);
                    let signed = if alternation.rem_euclid(2) == 1 { -p } else { p };
                    sine_terms.push(((lx, ly, lz), signed));
                } else {
                    let alternation = delta.div_euclid(2);
                    let signed = if alternation.rem_euclid(2) == 1 { -p } else { p };
                    cosine_terms.push(((lx, ly, lz), signed));
                }
            }
        }

        debug_assert!(
            m > 0 || sine_terms.is_empty(),
            "The m = 0 component has no sine combination."
        );
        entries.push(collapse(cosine_terms, &root));
        if m > 0 {
            entries.push(collapse(sine_terms, &root));
        }
    }
    entries
}

/// Folds the normalisation root into each accumulated term and casts to
/// double precision.
fn collapse<P: PrecisionScalar>(
    terms: Vec<((u32, u32, u32), P)>,
    root: &P,
) -> Vec<((u32, u32, u32), f64)> {
    terms
        .into_iter()
        .map(|(cart_tuple, value)| {
            let coef = (value * root.clone())
                .to_f64()
                .expect("A solid-harmonic coefficient fits a double.");
            (cart_tuple, coef)
        })
        .collect()
}
