//! Shared request and response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    products::records::{ProductVariation, Variation},
    users::records::Address,
};

/// A selected combination of product attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariationBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl From<VariationBody> for Variation {
    fn from(body: VariationBody) -> Self {
        Variation {
            size: body.size,
            color: body.color,
            material: body.material,
        }
    }
}

impl From<Variation> for VariationBody {
    fn from(variation: Variation) -> Self {
        VariationBody {
            size: variation.size,
            color: variation.color,
            material: variation.material,
        }
    }
}

/// A variation offered by a product, optionally with its own stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductVariationBody {
    #[serde(flatten)]
    pub attributes: VariationBody,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
}

impl From<ProductVariationBody> for ProductVariation {
    fn from(body: ProductVariationBody) -> Self {
        ProductVariation {
            attributes: body.attributes.into(),
            stock_quantity: body.stock_quantity,
        }
    }
}

impl From<ProductVariation> for ProductVariationBody {
    fn from(variation: ProductVariation) -> Self {
        ProductVariationBody {
            attributes: variation.attributes.into(),
            stock_quantity: variation.stock_quantity,
        }
    }
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl From<AddressBody> for Address {
    fn from(body: AddressBody) -> Self {
        Address {
            street: body.street,
            city: body.city,
            state: body.state,
            zip: body.zip,
            country: body.country,
        }
    }
}

impl From<Address> for AddressBody {
    fn from(address: Address) -> Self {
        AddressBody {
            street: address.street,
            city: address.city,
            state: address.state,
            zip: address.zip,
            country: address.country,
        }
    }
}
