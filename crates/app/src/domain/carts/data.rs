//! Cart Data

use crate::domain::products::records::{ProductUuid, Variation};

/// Quantity added when the caller does not supply one.
pub const DEFAULT_ADD_QUANTITY: u32 = 1;

/// Add Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemAdd {
    pub product: ProductUuid,
    pub quantity: Option<u32>,
    pub variation: Option<Variation>,
}

impl CartItemAdd {
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(DEFAULT_ADD_QUANTITY)
    }
}

/// Update Cart Item Data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartItemUpdate {
    pub quantity: Option<u32>,
    pub variation: Option<Variation>,
}
