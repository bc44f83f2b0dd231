use approx;
use ndarray::{array, Array2};

use crate::basis::{ncartesian, nspherical, CartOrder};
use crate::error::SolharmError;
use crate::harmonics::cache::CoefficientCache;
use crate::harmonics::transform::{
    cart_to_spherical, cart_to_spherical_into, cart_to_spherical_with,
};

#[test]
fn test_transform_l1_reorders_components() {
    // For L = 1 the transformation is the permutation (x, y, z) → (z, x, y).
    let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
    let spherical = cart_to_spherical(data.view(), 1, &CartOrder::lex(1)).unwrap();
    assert_eq!(
        spherical,
        array![[5.0, 6.0], [1.0, 2.0], [3.0, 4.0]]
    );
}

#[test]
fn test_transform_identity_reproduces_coefficients() {
    // Feeding the identity matrix recovers the stored coefficients in the
    // columns assigned by the ordering.
    for l in [2u32, 3, 5] {
        let cart_order = CartOrder::lex(l);
        let index_map = cart_order.index_map();
        let data = Array2::<f64>::eye(ncartesian(l));
        let spherical = cart_to_spherical(data.view(), l, &cart_order).unwrap();
        assert_eq!(spherical.dim(), (nspherical(l), ncartesian(l)));

        let coefs = CoefficientCache::global().get(l, false, false).unwrap();
        let mut expected = Array2::<f64>::zeros((nspherical(l), ncartesian(l)));
        for (s, terms) in coefs.iter().enumerate() {
            for &(cart_tuple, scale) in terms {
                expected[(s, index_map[&cart_tuple])] = scale;
            }
        }
        assert_eq!(spherical, expected);
    }
}

#[test]
fn test_transform_ordering_consistency() {
    // Transforming qchem-ordered data with the qchem ordering must agree with
    // transforming lex-ordered data with the lex ordering.
    let l = 3;
    let lex = CartOrder::lex(l);
    let qchem = CartOrder::qchem(l);
    let npoints = 4;

    let mut lex_data = Array2::<f64>::zeros((ncartesian(l), npoints));
    for (row, cart_tuple) in lex.iter().enumerate() {
        for col in 0..npoints {
            let (lx, ly, lz) = *cart_tuple;
            lex_data[(row, col)] =
                0.1 + f64::from(lx) - 0.5 * f64::from(ly) + 0.25 * f64::from(lz) + col as f64;
        }
    }
    let lex_index = lex.index_map();
    let mut qchem_data = Array2::<f64>::zeros((ncartesian(l), npoints));
    for (row, cart_tuple) in qchem.iter().enumerate() {
        let lex_row = lex_index[cart_tuple];
        for col in 0..npoints {
            qchem_data[(row, col)] = lex_data[(lex_row, col)];
        }
    }

    let from_lex = cart_to_spherical(lex_data.view(), l, &lex).unwrap();
    let from_qchem = cart_to_spherical(qchem_data.view(), l, &qchem).unwrap();
    assert_eq!(from_lex.dim(), from_qchem.dim());
    for (value_lex, value_qchem) in from_lex.iter().zip(from_qchem.iter()) {
        assert!(approx::relative_eq!(
            *value_lex,
            *value_qchem,
            max_relative = 1e-14,
            epsilon = 1e-14
        ));
    }
}

#[test]
fn test_transform_into_matches_allocating() {
    let l = 2;
    let cart_order = CartOrder::lex(l);
    let data = array![
        [0.5, -1.0],
        [1.5, 2.0],
        [-0.5, 0.25],
        [2.5, -2.0],
        [0.75, 1.0],
        [-1.5, 3.0],
    ];
    let allocated = cart_to_spherical(data.view(), l, &cart_order).unwrap();

    // The supplied buffer is zeroed before accumulation.
    let mut out = Array2::<f64>::from_elem((5, 2), 7.7);
    cart_to_spherical_into(data.view(), out.view_mut(), l, &cart_order).unwrap();
    assert_eq!(out, allocated);
}

#[test]
fn test_transform_explicit_cache_handle() {
    let cache = CoefficientCache::bundled().unwrap();
    let data = Array2::<f64>::eye(ncartesian(1));
    let with_handle =
        cart_to_spherical_with(&cache, data.view(), 1, &CartOrder::lex(1)).unwrap();
    let with_global = cart_to_spherical(data.view(), 1, &CartOrder::lex(1)).unwrap();
    assert_eq!(with_handle, with_global);
}

#[test]
fn test_transform_input_shape_validation() {
    let data = Array2::<f64>::zeros((4, 3));
    let result = cart_to_spherical(data.view(), 2, &CartOrder::lex(2));
    assert!(matches!(
        result,
        Err(SolharmError::CartesianShapeMismatch {
            l: 2,
            expected: 6,
            found: 4,
        })
    ));
}

#[test]
fn test_transform_output_shape_validation() {
    let data = Array2::<f64>::zeros((6, 3));
    let mut out = Array2::<f64>::zeros((5, 2));
    let result = cart_to_spherical_into(data.view(), out.view_mut(), 2, &CartOrder::lex(2));
    assert!(matches!(
        result,
        Err(SolharmError::SphericalShapeMismatch {
            expected_rows: 5,
            expected_cols: 3,
            found_rows: 5,
            found_cols: 2,
        })
    ));
}
