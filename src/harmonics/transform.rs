//! Runtime application of the Cartesian → spherical transformation.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use crate::basis::{ncartesian, nspherical, CartOrder};
use crate::error::SolharmError;

use super::cache::{CoefficientCache, CoefficientSet};

#[cfg(test)]
#[path = "transform_tests.rs"]
mod transform_tests;

/// Transforms a Cartesian-components × points matrix into a
/// spherical-components × points matrix.
///
/// Equivalent to [`cart_to_spherical_with`] on the process-wide cache.
pub fn cart_to_spherical(
    data: ArrayView2<f64>,
    l: u32,
    cart_order: &CartOrder,
) -> Result<Array2<f64>, SolharmError> {
    cart_to_spherical_with(CoefficientCache::global(), data, l, cart_order)
}

/// Transforms a Cartesian-components × points matrix into a
/// spherical-components × points matrix using an explicit cache handle.
///
/// # Arguments
///
/// * `cache` - The coefficient cache to draw the expansion from.
/// * `data` - A matrix with one row per Cartesian component of rank `l`,
/// arranged as `cart_order` prescribes, and one column per point.
/// * `l` - The angular momentum of the shell.
/// * `cart_order` - The ordering of the rows of `data`.
///
/// # Returns
///
/// A newly allocated $`(2l + 1) \times P`$ matrix of spherical components in
/// canonical order. `data` is not modified.
///
/// # Errors
///
/// Errors when `data` has the wrong number of rows or the coefficients for
/// `l` are not available.
pub fn cart_to_spherical_with(
    cache: &CoefficientCache,
    data: ArrayView2<f64>,
    l: u32,
    cart_order: &CartOrder,
) -> Result<Array2<f64>, SolharmError> {
    if data.nrows() != ncartesian(l) {
        return Err(SolharmError::CartesianShapeMismatch {
            l,
            expected: ncartesian(l),
            found: data.nrows(),
        });
    }
    let coefs = cache.get(l, false, false)?;
    let mut out = Array2::<f64>::zeros((nspherical(l), data.ncols()));
    apply(&coefs, data, cart_order, out.view_mut());
    Ok(out)
}

/// Transforms into a caller-supplied output buffer.
///
/// The buffer must have shape $`(2l + 1) \times P`$ where `data` has $`P`$
/// columns; it is zeroed before accumulation. All shape validation happens
/// before any computation begins.
///
/// # Errors
///
/// Errors when `data` or `out` has the wrong shape, or the coefficients for
/// `l` are not available.
pub fn cart_to_spherical_into(
    data: ArrayView2<f64>,
    mut out: ArrayViewMut2<f64>,
    l: u32,
    cart_order: &CartOrder,
) -> Result<(), SolharmError> {
    if data.nrows() != ncartesian(l) {
        return Err(SolharmError::CartesianShapeMismatch {
            l,
            expected: ncartesian(l),
            found: data.nrows(),
        });
    }
    if out.dim() != (nspherical(l), data.ncols()) {
        return Err(SolharmError::SphericalShapeMismatch {
            expected_rows: nspherical(l),
            expected_cols: data.ncols(),
            found_rows: out.nrows(),
            found_cols: out.ncols(),
        });
    }
    let coefs = CoefficientCache::global().get(l, false, false)?;
    out.fill(0.0);
    apply(&coefs, data, cart_order, out);
    Ok(())
}

/// Accumulates `out[s] += scale * data[row(cart_tuple)]` over every term of
/// every spherical component.
fn apply(
    coefs: &CoefficientSet,
    data: ArrayView2<f64>,
    cart_order: &CartOrder,
    mut out: ArrayViewMut2<f64>,
) {
    assert_eq!(cart_order.lcart, coefs.l(), "Mismatched Cartesian ranks.");
    let index_map = cart_order.index_map();
    for (spherical, terms) in coefs.iter().enumerate() {
        let mut row = out.row_mut(spherical);
        for &(cart_tuple, scale) in terms {
            let index = *index_map.get(&cart_tuple).unwrap_or_else(|| {
                panic!("Cartesian component {cart_tuple:?} is absent from the supplied ordering.")
            });
            row.scaled_add(scale, &data.row(index));
        }
    }
}
