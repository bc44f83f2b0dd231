//! Produces the bundled solid-harmonic coefficient table.
//!
//! The table covers every angular momentum below `MAX_TABULATED_L` and is
//! written into `OUT_DIR`, from which the library embeds it. This build step
//! is the only place the table is ever (re)generated; the library itself only
//! reads it.

use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[path = "src/harmonics/precision.rs"]
mod precision;

#[path = "src/harmonics/generate.rs"]
mod generate;

#[path = "src/harmonics/asset.rs"]
mod asset;

fn main() {
    println!("cargo:rerun-if-changed=src/harmonics/precision.rs");
    println!("cargo:rerun-if-changed=src/harmonics/generate.rs");
    println!("cargo:rerun-if-changed=src/harmonics/asset.rs");

    let mut table = asset::CoefficientTable::new();
    for l in 0..asset::MAX_TABULATED_L {
        let entries = generate::solid_harmonic_terms(l);
        for (spherical, terms) in entries.iter().enumerate() {
            let record = asset::TableRecord {
                cart_powers: terms.iter().map(|(cart_tuple, _)| *cart_tuple).collect(),
                coefs: terms.iter().map(|(_, coef)| *coef).collect(),
            };
            table.insert(asset::record_key(l, spherical), record);
        }
    }

    let out_dir = env::var("OUT_DIR").expect("`OUT_DIR` is set by cargo.");
    let table_path = Path::new(&out_dir).join("coefficient_table.bin");
    let file = File::create(&table_path)
        .unwrap_or_else(|err| panic!("Unable to create {}: {err}.", table_path.display()));
    bincode::serialize_into(BufWriter::new(file), &table)
        .expect("Unable to serialise the coefficient table.");
}
