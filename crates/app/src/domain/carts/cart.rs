//! Cart aggregate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::products::records::{ProductUuid, Variation};

/// A user's cart: at most one entry per product, each with a quantity of at
/// least one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: ProductUuid,
    pub quantity: u32,
    #[serde(default)]
    pub variation: Variation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("quantity overflows for product {0}")]
    QuantityOverflow(ProductUuid),

    #[error("product {0} is not in the cart")]
    EntryNotFound(ProductUuid),
}

impl Cart {
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, product: ProductUuid) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.product == product)
    }

    /// Add `quantity` of `product`.
    ///
    /// A product already in the cart has its quantity incremented and, when a
    /// variation is supplied, its variation replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero quantity and
    /// [`CartError::QuantityOverflow`] when the merged quantity does not fit.
    pub fn add(
        &mut self,
        product: ProductUuid,
        quantity: u32,
        variation: Option<Variation>,
    ) -> Result<&CartEntry, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let index = match self.position(product) {
            Some(index) => {
                let entry = &mut self.entries[index];

                entry.quantity = entry
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartError::QuantityOverflow(product))?;

                if let Some(variation) = variation {
                    entry.variation = variation;
                }

                index
            }
            None => {
                self.entries.push(CartEntry {
                    product,
                    quantity,
                    variation: variation.unwrap_or_default(),
                });

                self.entries.len() - 1
            }
        };

        Ok(&self.entries[index])
    }

    /// Set the quantity and/or variation of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EntryNotFound`] when `product` is not in the cart
    /// and [`CartError::InvalidQuantity`] for a zero quantity.
    pub fn update(
        &mut self,
        product: ProductUuid,
        quantity: Option<u32>,
        variation: Option<Variation>,
    ) -> Result<&CartEntry, CartError> {
        let index = self
            .position(product)
            .ok_or(CartError::EntryNotFound(product))?;

        if quantity == Some(0) {
            return Err(CartError::InvalidQuantity);
        }

        let entry = &mut self.entries[index];

        if let Some(quantity) = quantity {
            entry.quantity = quantity;
        }

        if let Some(variation) = variation {
            entry.variation = variation;
        }

        Ok(&self.entries[index])
    }

    /// Remove the entry for `product`. Returns `false` if there was none.
    pub fn remove(&mut self, product: ProductUuid) -> bool {
        let before = self.entries.len();

        self.entries.retain(|entry| entry.product != product);

        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, product: ProductUuid) -> Option<usize> {
        self.entries.iter().position(|entry| entry.product == product)
    }
}
