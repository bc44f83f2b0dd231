//! Orderings of the Cartesian components of a shell.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::slice::Iter;

use derive_builder::Builder;
use itertools::Itertools;

use crate::error::SolharmError;

#[cfg(test)]
#[path = "cart_order_tests.rs"]
mod cart_order_tests;

/// A struct to contain information about the ordering of Cartesian Gaussians
/// of a certain rank.
///
/// The transformation routines and code emitters consume a `CartOrder` to
/// resolve each canonical $`(l_x, l_y, l_z)`$ triple to its row index in the
/// data they operate on; any arrangement of the components can be supplied
/// through [`CartOrder::new`].
#[derive(Clone, Builder, PartialEq, Eq, Hash)]
pub struct CartOrder {
    /// A sequence of $`(l_x, l_y, l_z)`$ tuples giving the ordering of the
    /// Cartesian Gaussians.
    #[builder(setter(custom))]
    cart_tuples: Vec<(u32, u32, u32)>,

    /// The rank of the Cartesian Gaussians.
    pub lcart: u32,
}

impl CartOrderBuilder {
    fn cart_tuples(&mut self, cart_tuples: &[(u32, u32, u32)]) -> &mut Self {
        let lcart = self.lcart.expect("`lcart` has not been set.");
        assert!(cart_tuples
            .iter()
            .all(|(lx, ly, lz)| lx + ly + lz == lcart));
        assert_eq!(
            cart_tuples.len(),
            ((lcart + 1) * (lcart + 2)).div_euclid(2) as usize
        );
        self.cart_tuples = Some(cart_tuples.to_vec());
        self
    }
}

impl CartOrder {
    /// Returns a builder to construct a new `CartOrder` struct.
    fn builder() -> CartOrderBuilder {
        CartOrderBuilder::default()
    }

    /// Constructs a new `CartOrder` struct for a specified rank with
    /// lexicographic order.
    ///
    /// # Arguments
    ///
    /// * `lcart` - The required Cartesian Gaussian rank.
    ///
    /// # Returns
    ///
    /// A `CartOrder` struct for a specified rank with lexicographic order.
    #[must_use]
    pub fn lex(lcart: u32) -> Self {
        let mut cart_tuples =
            Vec::with_capacity(((lcart + 1) * (lcart + 2)).div_euclid(2) as usize);
        for lx in (0..=lcart).rev() {
            for ly in (0..=(lcart - lx)).rev() {
                cart_tuples.push((lx, ly, lcart - lx - ly));
            }
        }
        Self::builder()
            .lcart(lcart)
            .cart_tuples(&cart_tuples)
            .build()
            .expect("Unable to construct a `CartOrder` structure with lexicographic order.")
    }

    /// Constructs a new `CartOrder` struct for a specified rank with Q-Chem
    /// order.
    ///
    /// # Arguments
    ///
    /// * `lcart` - The required Cartesian Gaussian rank.
    ///
    /// # Returns
    ///
    /// A `CartOrder` struct for a specified rank with Q-Chem order.
    #[must_use]
    pub fn qchem(lcart: u32) -> Self {
        let mut cart_tuples =
            Vec::with_capacity(((lcart + 1) * (lcart + 2)).div_euclid(2) as usize);
        for lz in 0..=lcart {
            for lx in (0..=(lcart - lz)).rev() {
                cart_tuples.push((lx, lcart - lz - lx, lz));
            }
        }
        Self::builder()
            .lcart(lcart)
            .cart_tuples(&cart_tuples)
            .build()
            .expect("Unable to construct a `CartOrder` structure with Q-Chem order.")
    }

    /// Constructs a new `CartOrder` struct from a caller-supplied arrangement
    /// of the components of rank `lcart`.
    ///
    /// # Arguments
    ///
    /// * `cart_tuples` - The desired arrangement of all $`(l_x, l_y, l_z)`$
    /// tuples of rank `lcart`.
    /// * `lcart` - The required Cartesian Gaussian rank.
    ///
    /// # Errors
    ///
    /// Errors when the supplied tuples are not exactly the distinct
    /// components of rank `lcart`.
    pub fn new(cart_tuples: &[(u32, u32, u32)], lcart: u32) -> Result<Self, SolharmError> {
        let ncomps = ((lcart + 1) * (lcart + 2)).div_euclid(2) as usize;
        if cart_tuples.len() != ncomps {
            return Err(SolharmError::InvalidOrdering(format!(
                "rank {lcart} has {ncomps} components, but {} were supplied",
                cart_tuples.len()
            )));
        }
        if let Some(bad) = cart_tuples
            .iter()
            .find(|(lx, ly, lz)| lx + ly + lz != lcart)
        {
            return Err(SolharmError::InvalidOrdering(format!(
                "{bad:?} is not a component of rank {lcart}"
            )));
        }
        if cart_tuples.iter().collect::<HashSet<_>>().len() != ncomps {
            return Err(SolharmError::InvalidOrdering(
                "duplicate components supplied".to_string(),
            ));
        }
        Ok(Self::builder()
            .lcart(lcart)
            .cart_tuples(cart_tuples)
            .build()
            .expect("Unable to construct a custom `CartOrder` structure."))
    }

    /// Verifies if this `CartOrder` struct is valid.
    ///
    /// # Returns
    ///
    /// A boolean indicating if this `CartOrder` struct is valid.
    #[must_use]
    pub fn verify(&self) -> bool {
        let cart_tuples_set = self.cart_tuples.iter().collect::<HashSet<_>>();
        let lcart = self.lcart;
        cart_tuples_set.len() == self.ncomps()
            && cart_tuples_set
                .iter()
                .all(|(lx, ly, lz)| lx + ly + lz == lcart)
    }

    /// Iterates over the ordered component tuples.
    pub fn iter(&self) -> Iter<(u32, u32, u32)> {
        self.cart_tuples.iter()
    }

    /// The number of components of this rank.
    pub fn ncomps(&self) -> usize {
        let lcart = usize::try_from(self.lcart).unwrap_or_else(|_| {
            panic!(
                "Unable to convert the Cartesian degree {} to `usize`.",
                self.lcart
            )
        });
        ((lcart + 1) * (lcart + 2)).div_euclid(2)
    }

    /// The mapping from each component tuple to its positional index under
    /// this ordering.
    pub fn index_map(&self) -> HashMap<(u32, u32, u32), usize> {
        self.cart_tuples
            .iter()
            .enumerate()
            .map(|(index, cart_tuple)| (*cart_tuple, index))
            .collect()
    }
}

impl fmt::Display for CartOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cartesian rank: {}", self.lcart)?;
        writeln!(f, "Order:")?;
        for cart_tuple in self.iter() {
            writeln!(f, "  {}", cart_tuple_to_str(cart_tuple, true))?;
        }
        Ok(())
    }
}

impl fmt::Debug for CartOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cartesian rank: {}", self.lcart)?;
        writeln!(f, "Order:")?;
        for cart_tuple in self.iter() {
            writeln!(f, "  {cart_tuple:?}")?;
        }
        Ok(())
    }
}

/// Translates a Cartesian exponent tuple to a human-understandable string.
///
/// # Arguments
///
/// * `cart_tuple` - A tuple of $`(l_x, l_y, l_z)`$ specifying the exponents of
/// the Cartesian components of the Cartesian Gaussian.
/// * `flat` - A flag indicating if the string representation is flat (*e.g.*
/// `xxyz`) or compact (*e.g.* `x^2yz`).
///
/// # Returns
///
/// The string representation of the Cartesian exponent tuple.
fn cart_tuple_to_str(cart_tuple: &(u32, u32, u32), flat: bool) -> String {
    if cart_tuple.0 + cart_tuple.1 + cart_tuple.2 == 0u32 {
        "1".to_string()
    } else {
        let cart_array = [cart_tuple.0, cart_tuple.1, cart_tuple.2];
        let carts = ["x", "y", "z"];
        Itertools::intersperse(
            cart_array.iter().enumerate().map(|(i, &l)| {
                if flat {
                    carts[i].repeat(l as usize)
                } else {
                    match l.cmp(&1) {
                        Ordering::Greater => format!("{}^{l}", carts[i]),
                        Ordering::Equal => carts[i].to_string(),
                        Ordering::Less => String::new(),
                    }
                }
            }),
            String::new(),
        )
        .collect::<String>()
    }
}
