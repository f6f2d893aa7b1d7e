use serde::Serialize;

use crate::catalog::{CategoryPath, ProductId};

/// A retrieved product with its resolved category and embedding distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub product_id: ProductId,
    /// Empty when the product was not found in the category store.
    pub category: CategoryPath,
    /// In `[0, 1]`, 0 being the closest match.
    pub distance: f32,
}
