//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::records::{CartProduct, ResolvedCartEntry};

use crate::{
    carts::errors::into_status_error, extensions::*, schemas::VariationBody, state::State,
};

/// Live catalog details for a cart entry.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartProductResponse {
    pub title: String,

    /// Current price in pence/cents
    pub price: u64,

    pub images: Vec<String>,

    pub stock_quantity: u32,
}

impl From<CartProduct> for CartProductResponse {
    fn from(product: CartProduct) -> Self {
        CartProductResponse {
            title: product.title,
            price: product.price,
            images: product.images,
            stock_quantity: product.stock_quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ResolvedCartEntryResponse {
    pub product_uuid: Uuid,

    pub quantity: u32,

    pub variation: VariationBody,

    /// Null when the product has been removed from the catalog
    pub product: Option<CartProductResponse>,
}

impl From<ResolvedCartEntry> for ResolvedCartEntryResponse {
    fn from(entry: ResolvedCartEntry) -> Self {
        ResolvedCartEntryResponse {
            product_uuid: entry.product_uuid.into(),
            quantity: entry.quantity,
            variation: entry.variation.into(),
            product: entry.product.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ResolvedCartResponse {
    pub items: Vec<ResolvedCartEntryResponse>,
}

/// Get Cart Handler
///
/// Returns the caller's cart with each entry resolved against the live catalog.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ResolvedCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let entries = state
        .app
        .carts
        .get_cart(principal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ResolvedCartResponse {
        items: entries.into_iter().map(Into::into).collect(),
    }))
}
