//! Tabulated and memoised access to solid-harmonic coefficient sets.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

use crate::basis::nspherical;
use crate::error::SolharmError;

use super::asset::{record_key, CoefficientTable, MAX_TABULATED_L};

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;

/// The bundled coefficient table, produced offline by the build script.
static BUNDLED_TABLE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/coefficient_table.bin"));

/// The solid-harmonic expansion coefficients of one angular momentum.
///
/// A `CoefficientSet` maps each spherical component — index 0 for $`m = 0`$,
/// then cosine index $`2m - 1`$ and sine index $`2m`$ for
/// $`m = 1, \ldots, l`$ — to the Cartesian power triples that contribute to
/// it, with their scale factors. Sets are immutable once constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientSet {
    l: u32,
    entries: Vec<Vec<((u32, u32, u32), f64)>>,
}

impl CoefficientSet {
    pub(crate) fn new(l: u32, entries: Vec<Vec<((u32, u32, u32), f64)>>) -> Self {
        debug_assert_eq!(entries.len(), nspherical(l));
        Self { l, entries }
    }

    /// The angular momentum of this set.
    pub fn l(&self) -> u32 {
        self.l
    }

    /// The number of spherical components, $`2l + 1`$.
    pub fn nspherical(&self) -> usize {
        self.entries.len()
    }

    /// The contributing terms of the spherical component `spherical`.
    pub fn spherical_terms(&self, spherical: usize) -> &[((u32, u32, u32), f64)] {
        &self.entries[spherical]
    }

    /// Iterates over the term lists in canonical spherical order.
    pub fn iter(&self) -> impl Iterator<Item = &[((u32, u32, u32), f64)]> + '_ {
        self.entries.iter().map(|terms| terms.as_slice())
    }
}

lazy_static! {
    static ref GLOBAL_CACHE: CoefficientCache = CoefficientCache::bundled()
        .expect("The bundled coefficient table decodes.");
}

/// The sole entry point for obtaining [`CoefficientSet`]s.
///
/// A cache holds the decoded bundled table for all `L` below
/// [`MAX_TABULATED_L`] together with a memoisation map for sets derived on
/// the fly. Insertion into the map is mutex-guarded, so a cache may be shared
/// across threads; each key is written at most once per cache.
pub struct CoefficientCache {
    table: Vec<Arc<CoefficientSet>>,
    memo: Mutex<HashMap<u32, Arc<CoefficientSet>>>,
}

impl CoefficientCache {
    /// Decodes the bundled table into a fresh, independent cache.
    ///
    /// # Errors
    ///
    /// Errors when the bundled table does not decode or is internally
    /// inconsistent.
    pub fn bundled() -> Result<Self, SolharmError> {
        let raw: CoefficientTable = bincode::deserialize(BUNDLED_TABLE)
            .map_err(|err| SolharmError::MalformedTable(err.to_string()))?;
        let mut table = Vec::with_capacity(MAX_TABULATED_L as usize);
        for l in 0..MAX_TABULATED_L {
            let mut entries = Vec::with_capacity(nspherical(l));
            for spherical in 0..nspherical(l) {
                let key = record_key(l, spherical);
                let record = raw.get(&key).ok_or_else(|| {
                    SolharmError::MalformedTable(format!("missing record `{key}`"))
                })?;
                if record.cart_powers.len() != record.coefs.len() {
                    return Err(SolharmError::MalformedTable(format!(
                        "record `{key}` has {} triples but {} coefficients",
                        record.cart_powers.len(),
                        record.coefs.len()
                    )));
                }
                entries.push(
                    record
                        .cart_powers
                        .iter()
                        .copied()
                        .zip(record.coefs.iter().copied())
                        .collect(),
                );
            }
            table.push(Arc::new(CoefficientSet::new(l, entries)));
        }
        log::debug!(
            "Decoded {} tabulated coefficient sets (L < {MAX_TABULATED_L}).",
            table.len()
        );
        Ok(Self {
            table,
            memo: Mutex::new(HashMap::new()),
        })
    }

    /// The process-wide cache, decoded once on first use and read-only
    /// thereafter.
    ///
    /// # Panics
    ///
    /// Panics when the bundled table does not decode.
    pub fn global() -> &'static Self {
        &GLOBAL_CACHE
    }

    /// The angular momentum bound (exclusive) of the tabulated sets.
    pub fn max_tabulated(&self) -> u32 {
        u32::try_from(self.table.len()).expect("The table length fits a `u32`.")
    }

    /// Retrieves the coefficient set for angular momentum `l`.
    ///
    /// Tabulated sets are returned directly. Beyond the table,
    /// `allow_generate` opts into on-the-fly derivation, memoised per `l`;
    /// `force_recompute` additionally bypasses both the table and the
    /// memoisation map so that a freshly derived set can be compared against
    /// the tabulated one.
    ///
    /// # Errors
    ///
    /// Errors when `l` is not tabulated and `allow_generate` is `false`, or
    /// when derivation is requested but not compiled in.
    pub fn get(
        &self,
        l: u32,
        allow_generate: bool,
        force_recompute: bool,
    ) -> Result<Arc<CoefficientSet>, SolharmError> {
        if (l as usize) < self.table.len() && !force_recompute {
            return Ok(Arc::clone(&self.table[l as usize]));
        }
        if !allow_generate {
            return Err(SolharmError::NotTabulated {
                l,
                max_tabulated: self.max_tabulated(),
            });
        }
        if force_recompute {
            return Self::derive(l);
        }
        let mut memo = self.memo.lock().expect("The memoisation map is not poisoned.");
        if let Some(set) = memo.get(&l) {
            return Ok(Arc::clone(set));
        }
        let set = Self::derive(l)?;
        memo.insert(l, Arc::clone(&set));
        Ok(set)
    }

    #[cfg(feature = "generate")]
    fn derive(l: u32) -> Result<Arc<CoefficientSet>, SolharmError> {
        log::debug!("Deriving solid-harmonic coefficients for L = {l} on the fly.");
        Ok(Arc::new(CoefficientSet::new(
            l,
            super::generate::solid_harmonic_terms(l),
        )))
    }

    #[cfg(not(feature = "generate"))]
    fn derive(_l: u32) -> Result<Arc<CoefficientSet>, SolharmError> {
        Err(SolharmError::GenerationUnavailable)
    }
}
