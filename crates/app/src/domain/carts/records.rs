//! Cart Records

use crate::domain::products::records::{ProductRecord, ProductUuid, Variation};

/// A cart entry with its product resolved against the live catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCartEntry {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub variation: Variation,
    /// `None` when the product no longer exists.
    pub product: Option<CartProduct>,
}

/// Live catalog snapshot shown alongside a cart entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartProduct {
    pub title: String,
    pub price: u64,
    pub images: Vec<String>,
    pub stock_quantity: u32,
}

impl From<ProductRecord> for CartProduct {
    fn from(product: ProductRecord) -> Self {
        Self {
            title: product.title,
            price: product.price,
            images: product.images,
            stock_quantity: product.stock_quantity,
        }
    }
}
