//! Likes
//!
//! Per-product like state kept beside the catalog. Catalog entries are never
//! mutated; readers get a copy of the product with the ledger's state overlaid.

use rustc_hash::FxHashMap;

use crate::{
    catalog::Catalog,
    products::{Product, ProductId},
};

/// Like counter and flag for a single product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeState {
    /// Like counter
    pub likes: u32,

    /// Whether the current visitor likes the product
    pub is_liked: bool,
}

impl LikeState {
    /// Like state embedded in a catalog entry.
    pub fn of(product: &Product) -> Self {
        Self {
            likes: product.likes,
            is_liked: product.is_liked,
        }
    }

    /// The state after one toggle: +1 on like, -1 floored at zero on unlike.
    #[must_use]
    pub fn toggled(self) -> Self {
        if self.is_liked {
            Self {
                likes: self.likes.saturating_sub(1),
                is_liked: false,
            }
        } else {
            Self {
                likes: self.likes.saturating_add(1),
                is_liked: true,
            }
        }
    }
}

/// Like ledger keyed by product id.
#[derive(Debug, Clone, Default)]
pub struct Likes {
    states: FxHashMap<ProductId, LikeState>,
}

impl Likes {
    /// Seed the ledger from the catalog's embedded defaults.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let states = catalog
            .iter()
            .map(|product| (product.id, LikeState::of(product)))
            .collect();

        Self { states }
    }

    /// Current state for a product, if the ledger has an entry.
    pub fn get(&self, id: ProductId) -> Option<LikeState> {
        self.states.get(&id).copied()
    }

    /// Flip the like flag for a product and return the new state.
    ///
    /// Ids without an entry start from zero likes, not liked.
    pub fn toggle(&mut self, id: ProductId) -> LikeState {
        let state = self.states.entry(id).or_default();

        *state = state.toggled();

        *state
    }

    /// Copy of the product with the ledger's like state applied.
    pub fn overlay(&self, product: &Product) -> Product {
        let state = self.get(product.id).unwrap_or_else(|| LikeState::of(product));

        Product {
            likes: state.likes,
            is_liked: state.is_liked,
            ..product.clone()
        }
    }

    /// Every catalog product with like state applied, in catalog order.
    pub fn overlay_all(&self, catalog: &Catalog) -> Vec<Product> {
        catalog.iter().map(|product| self.overlay(product)).collect()
    }

    /// Number of products with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if the ledger has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
