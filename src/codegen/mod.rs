//! Emission of specialised transformation source code.
//!
//! Both backends walk a [`crate::harmonics::CoefficientSet`] together with a
//! [`crate::basis::CartOrder`] and lower the transformation for one fixed
//! angular momentum into procedural Rust: [`array_fn`] targets `ndarray`
//! views, [`pointwise_fn`] targets raw strided buffers with explicit point
//! loops. The emitters only produce text against the [`CodeWriter`] sink and
//! perform no I/O themselves.

pub mod array_fn;
pub mod pointwise_fn;
pub mod writer;

pub use writer::{CodeWriter, SourceWriter};

/// Formats a coefficient as a literal with 16 fractional digits, enough to
/// round-trip a double.
pub(crate) fn coef_literal(scale: f64) -> String {
    format!("{scale:.16}")
}
