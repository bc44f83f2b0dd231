//! Schema of the bundled coefficient table.
//!
//! The table is produced offline by the build script from the same derivation
//! sources as the runtime generator, serialised with `bincode`, and embedded
//! in the library. Each `(L, spherical index)` pair owns one record of two
//! parallel arrays under a deterministic key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Highest angular momentum (exclusive) covered by the bundled table.
///
/// Extending the range requires rebuilding the crate; it is not a runtime
/// capability.
pub const MAX_TABULATED_L: u32 = 17;

/// Parallel arrays describing one spherical component's contributing terms.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableRecord {
    /// The Cartesian power triples $`(l_x, l_y, l_z)`$.
    pub cart_powers: Vec<(u32, u32, u32)>,

    /// The matching expansion coefficients.
    pub coefs: Vec<f64>,
}

/// The serialised form of the bundled table.
pub type CoefficientTable = BTreeMap<String, TableRecord>;

/// Builds the deterministic record key for angular momentum `l` and spherical
/// index `spherical`.
pub fn record_key(l: u32, spherical: usize) -> String {
    format!("l{l}_s{spherical}")
}
