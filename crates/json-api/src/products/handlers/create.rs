//! Create Product Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::products::{
    data::{DEFAULT_LOW_STOCK_ALERT_THRESHOLD, NewProduct, generated_sku},
    records::ProductUuid,
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    schemas::ProductVariationBody,
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub videos: Vec<String>,

    /// The price of the product in pence/cents
    pub price: u64,

    #[serde(default)]
    pub variations: Vec<ProductVariationBody>,

    /// Defaults to `SKU-<unix millis>`
    #[serde(default)]
    pub sku: Option<String>,

    pub stock_quantity: u32,

    #[serde(default)]
    pub low_stock_alert_threshold: Option<u32>,
}

impl CreateProductRequest {
    fn into_new_product(self, now: Timestamp) -> NewProduct {
        NewProduct {
            uuid: self.uuid.map_or_else(ProductUuid::new, Into::into),
            title: self.title,
            description: self.description,
            images: self.images,
            videos: self.videos,
            price: self.price,
            variations: self.variations.into_iter().map(Into::into).collect(),
            sku: self.sku.unwrap_or_else(|| generated_sku(now)),
            stock_quantity: self.stock_quantity,
            low_stock_alert_threshold: self
                .low_stock_alert_threshold
                .unwrap_or(DEFAULT_LOW_STOCK_ALERT_THRESHOLD),
        }
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid token"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;
    let product = json.into_inner().into_new_product(Timestamp::now());

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(principal.user));
    span.record("product_uuid", tracing::field::display(product.uuid));

    let product = state
        .app
        .products
        .create_product(principal, product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
