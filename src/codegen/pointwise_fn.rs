//! Emission of pointwise transformation functions over raw strided buffers.

use std::collections::HashMap;

use crate::basis::CartOrder;
use crate::harmonics::CoefficientSet;

use super::writer::CodeWriter;
use super::coef_literal;

#[cfg(test)]
#[path = "pointwise_fn_tests.rs"]
mod pointwise_fn_tests;

/// Emits a Rust function applying the Cartesian → spherical transformation of
/// one fixed angular momentum point by point over contiguous buffers.
///
/// The emitted function is named `{function_name}_l{L}` and takes the point
/// count, the Cartesian buffer with its row stride, and the spherical buffer
/// with its row stride; component `k` of a buffer starts at offset
/// `k * stride`. One counted loop is emitted per spherical component, with
/// the same assign-then-accumulate statements and unit-coefficient elision as
/// the `ndarray` backend. Offsets for component indices 0 and 1 are
/// simplified to `buf[i]` and `buf[stride + i]` on both buffers.
///
/// # Arguments
///
/// * `cg` - The sink receiving the emitted source.
/// * `coefs` - The coefficient set of the target angular momentum.
/// * `cart_order` - The ordering of the components of the Cartesian buffer.
/// * `function_name` - An optional base name; `cart_to_spherical` by default.
///
/// # Returns
///
/// The signature of the emitted function.
///
/// # Panics
///
/// Panics when `cart_order` and `coefs` disagree on the angular momentum.
pub fn write_pointwise_transform<W: CodeWriter>(
    cg: &mut W,
    coefs: &CoefficientSet,
    cart_order: &CartOrder,
    function_name: Option<&str>,
) -> String {
    assert_eq!(cart_order.lcart, coefs.l(), "Mismatched Cartesian ranks.");
    let l = coefs.l();
    let name = format!("{}_l{l}", function_name.unwrap_or("cart_to_spherical"));
    let index_map = cart_order.index_map();

    let signature = format!(
        "pub fn {name}(size: usize, cart: &[f64], cart_stride: usize, \
         spherical: &mut [f64], spherical_stride: usize)"
    );
    cg.begin_block(&signature);
    cg.write_line(&format!("// R_{l}0"));
    write_component(cg, coefs, &index_map, 0);
    for m in 1..=l {
        cg.blank_line();
        cg.write_line(&format!("// R_{l}{m}c"));
        write_component(cg, coefs, &index_map, (2 * m - 1) as usize);
        cg.write_line(&format!("// R_{l}{m}s"));
        write_component(cg, coefs, &index_map, (2 * m) as usize);
    }
    cg.end_block();
    signature
}

/// Emits the counted loop accumulating one spherical component.
#[allow(clippy::float_cmp)]
fn write_component<W: CodeWriter>(
    cg: &mut W,
    coefs: &CoefficientSet,
    index_map: &HashMap<(u32, u32, u32), usize>,
    spherical: usize,
) {
    cg.begin_block("for i in 0..size");
    let lhs = match spherical {
        0 => "spherical[i]".to_string(),
        1 => "spherical[spherical_stride + i]".to_string(),
        _ => format!("spherical[{spherical} * spherical_stride + i]"),
    };
    let mut op = "=";
    for &(cart_tuple, scale) in coefs.spherical_terms(spherical) {
        let index = *index_map.get(&cart_tuple).unwrap_or_else(|| {
            panic!("Cartesian component {cart_tuple:?} is absent from the supplied ordering.")
        });
        let rhs = match index {
            0 => "cart[i]".to_string(),
            1 => "cart[cart_stride + i]".to_string(),
            _ => format!("cart[{index} * cart_stride + i]"),
        };
        if scale == 1.0 {
            cg.write_line(&format!("{lhs} {op} {rhs};"));
        } else {
            cg.write_line(&format!("{lhs} {op} {} * {rhs};", coef_literal(scale)));
        }
        op = "+=";
    }
    cg.end_block();
}
