//! Error kinds surfaced by the public API.
//!
//! Every error is a deterministic function of its inputs; none is transient,
//! so no retry policy exists anywhere in the crate.

use thiserror::Error;

/// Errors produced by coefficient access, transformation, and emission.
#[derive(Debug, Error)]
pub enum SolharmError {
    /// On-the-fly derivation was requested but the arbitrary-precision
    /// machinery is not compiled in.
    #[error("on-the-fly coefficient generation requires the `generate` feature")]
    GenerationUnavailable,

    /// The requested angular momentum lies beyond the bundled table and
    /// on-the-fly generation was not permitted. Recoverable by opting into
    /// generation.
    #[error(
        "solid-harmonic coefficients are only tabulated for L < {max_tabulated}; \
         request on-the-fly generation for L = {l}"
    )]
    NotTabulated { l: u32, max_tabulated: u32 },

    /// The Cartesian input matrix has the wrong number of rows for the
    /// requested angular momentum.
    #[error(
        "input matrix has {found} rows but L = {l} requires {expected} Cartesian components"
    )]
    CartesianShapeMismatch { l: u32, expected: usize, found: usize },

    /// A caller-supplied output buffer does not match the required spherical
    /// shape.
    #[error(
        "output matrix has shape ({found_rows}, {found_cols}) but \
         ({expected_rows}, {expected_cols}) is required"
    )]
    SphericalShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    /// A caller-supplied Cartesian ordering is not a valid arrangement of the
    /// components of its rank.
    #[error("invalid Cartesian ordering: {0}")]
    InvalidOrdering(String),

    /// The bundled coefficient table failed to decode.
    #[error("corrupted bundled coefficient table: {0}")]
    MalformedTable(String),
}
