//! Solid-harmonic coefficient derivation, caching, and runtime
//! transformation.

pub mod asset;
pub mod cache;
#[cfg(feature = "generate")]
pub mod generate;
#[cfg(feature = "generate")]
pub mod precision;
pub mod transform;

pub use asset::MAX_TABULATED_L;
pub use cache::{CoefficientCache, CoefficientSet};
pub use transform::{cart_to_spherical, cart_to_spherical_into, cart_to_spherical_with};
