//! Shell structure and component-ordering conventions.

pub mod cart_order;

pub use cart_order::CartOrder;

/// The number of spherical components of a shell of angular momentum `l`,
/// $`2l + 1`$.
pub fn nspherical(l: u32) -> usize {
    2 * l as usize + 1
}

/// The number of Cartesian components of a shell of angular momentum `l`,
/// $`(l + 1)(l + 2)/2`$.
pub fn ncartesian(l: u32) -> usize {
    let lusize = l as usize;
    ((lusize + 1) * (lusize + 2)).div_euclid(2)
}
