//! Emission of `ndarray`-oriented transformation functions.

use crate::basis::CartOrder;
use crate::harmonics::CoefficientSet;

use super::writer::CodeWriter;
use super::coef_literal;

#[cfg(test)]
#[path = "array_fn_tests.rs"]
mod array_fn_tests;

/// Emits a Rust function applying the Cartesian → spherical transformation of
/// one fixed angular momentum to an `ndarray` matrix.
///
/// The emitted function is named `{function_name}_l{L}` and takes
/// `(data: ArrayView2<f64>, out: Option<Array2<f64>>)`, allocating a zeroed
/// output of shape $`(2l + 1) \times P`$ when `out` is absent. For each
/// spherical component one statement is emitted per contributing term: the
/// first term assigns, subsequent terms accumulate, and unit coefficients
/// carry no multiplication. The emitted code expects `Array2` and
/// `ArrayView2` in scope.
///
/// # Arguments
///
/// * `cg` - The sink receiving the emitted source.
/// * `coefs` - The coefficient set of the target angular momentum.
/// * `cart_order` - The ordering of the rows of the Cartesian input.
/// * `function_name` - An optional base name; `cart_to_spherical` by default.
///
/// # Panics
///
/// Panics when `cart_order` and `coefs` disagree on the angular momentum.
#[allow(clippy::float_cmp)]
pub fn write_array_transform<W: CodeWriter>(
    cg: &mut W,
    coefs: &CoefficientSet,
    cart_order: &CartOrder,
    function_name: Option<&str>,
) {
    assert_eq!(cart_order.lcart, coefs.l(), "Mismatched Cartesian ranks.");
    let l = coefs.l();
    let name = format!("{}_l{l}", function_name.unwrap_or("cart_to_spherical"));
    let nspherical = coefs.nspherical();
    let index_map = cart_order.index_map();

    cg.begin_block(&format!(
        "pub fn {name}(data: ArrayView2<f64>, out: Option<Array2<f64>>) -> Array2<f64>"
    ));
    cg.write_line(&format!(
        "let mut out = out.unwrap_or_else(|| Array2::<f64>::zeros(({nspherical}, data.ncols())));"
    ));
    cg.blank_line();
    cg.write_line("// contraction over Cartesian components");
    for (spherical, terms) in coefs.iter().enumerate() {
        cg.begin_block("");
        cg.write_line(&format!("let mut row = out.row_mut({spherical});"));
        let mut first = true;
        for &(cart_tuple, scale) in terms {
            let index = *index_map.get(&cart_tuple).unwrap_or_else(|| {
                panic!("Cartesian component {cart_tuple:?} is absent from the supplied ordering.")
            });
            let line = match (first, scale == 1.0) {
                (true, true) => format!("row.assign(&data.row({index}));"),
                (true, false) => format!(
                    "row.assign(&(&data.row({index}) * {}));",
                    coef_literal(scale)
                ),
                (false, true) => format!("row += &data.row({index});"),
                (false, false) => format!(
                    "row.scaled_add({}, &data.row({index}));",
                    coef_literal(scale)
                ),
            };
            cg.write_line(&line);
            first = false;
        }
        cg.end_block();
    }
    cg.blank_line();
    cg.write_line("out");
    cg.end_block();
}
