//! # Solharm: Cartesian to real solid-harmonic transformations
//!
//! Solharm computes, caches, and emits the linear transformation that
//! converts the Cartesian components of a Gaussian-type basis shell into its
//! real solid-harmonic (spherical) components, for arbitrary angular
//! momentum $`L`$. It serves grid-evaluation codes that need this transform
//! both as a runtime operation on numeric data and as specialised procedural
//! source code for a fixed $`L`$:
//! - the expansion coefficients are derived exactly from the closed-form
//!   combinatorial identity for real solid harmonics, with
//!   arbitrary-precision intermediates so that the near-cancelling
//!   alternating factorial sums survive intact,
//! - coefficients for $`L < 17`$ ship precomputed in a bundled table and are
//!   decoded once per process; higher $`L`$ is derived on demand and
//!   memoised,
//! - [`harmonics::cart_to_spherical`] applies a coefficient set to a
//!   components × points matrix,
//! - [`codegen`] lowers a coefficient set into standalone Rust functions,
//!   either over `ndarray` views or over raw strided buffers.
//!
//! ## Features
//!
//! - `generate` (default): compiles the arbitrary-precision derivation used
//!   for $`L \geq 17`$. Without it only the bundled table is available.
//!
//! ## Example
//!
//! ```
//! use ndarray::Array2;
//! use solharm::basis::{ncartesian, CartOrder};
//! use solharm::harmonics::cart_to_spherical;
//!
//! let l = 2;
//! let data = Array2::<f64>::ones((ncartesian(l), 4));
//! let spherical = cart_to_spherical(data.view(), l, &CartOrder::lex(l))?;
//! assert_eq!(spherical.nrows(), 5);
//! # Ok::<(), solharm::error::SolharmError>(())
//! ```

pub mod basis;
pub mod codegen;
pub mod error;
pub mod harmonics;
