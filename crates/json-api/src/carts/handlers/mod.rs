//! Cart Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::{Cart, CartEntry};

use crate::schemas::VariationBody;

pub(crate) mod add_item;
pub(crate) mod clear;
pub(crate) mod get;
pub(crate) mod remove_item;
pub(crate) mod update_item;

/// A cart entry as stored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEntryResponse {
    pub product: Uuid,
    pub quantity: u32,
    pub variation: VariationBody,
}

impl From<&CartEntry> for CartEntryResponse {
    fn from(entry: &CartEntry) -> Self {
        CartEntryResponse {
            product: entry.product.into(),
            quantity: entry.quantity,
            variation: entry.variation.clone().into(),
        }
    }
}

/// The caller's cart after a change.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub items: Vec<CartEntryResponse>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            items: cart.entries().iter().map(Into::into).collect(),
        }
    }
}
