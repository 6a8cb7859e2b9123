//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::data::CartItemAdd;

use crate::{
    carts::{errors::into_status_error, handlers::CartResponse},
    extensions::*,
    schemas::VariationBody,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product: Uuid,

    /// Defaults to 1
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Replaces the entry's variation when supplied
    #[serde(default)]
    pub variation: Option<VariationBody>,
}

impl From<AddCartItemRequest> for CartItemAdd {
    fn from(request: AddCartItemRequest) -> Self {
        CartItemAdd {
            product: request.product.into(),
            quantity: request.quantity,
            variation: request.variation.map(Into::into),
        }
    }
}

/// Add Cart Item Handler
///
/// Adds a product to the caller's cart, merging with any existing entry.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.add_item",
    skip(json, depot),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("product_uuid", tracing::field::display(request.product));

    let cart = state
        .app
        .carts
        .add_item(principal, request.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
