//! Products Data

use jiff::Timestamp;

use crate::domain::products::records::{ProductRecord, ProductUuid, ProductVariation};

/// Stock level at or below which a product is reported as running low.
pub const DEFAULT_LOW_STOCK_ALERT_THRESHOLD: u32 = 5;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub price: u64,
    pub variations: Vec<ProductVariation>,
    pub sku: String,
    pub stock_quantity: u32,
    pub low_stock_alert_threshold: u32,
}

impl NewProduct {
    /// A product with no media or variations, a generated SKU and the default
    /// low-stock threshold.
    #[must_use]
    pub fn new(
        uuid: ProductUuid,
        title: impl Into<String>,
        description: impl Into<String>,
        price: u64,
        stock_quantity: u32,
    ) -> Self {
        Self {
            uuid,
            title: title.into(),
            description: description.into(),
            images: Vec::new(),
            videos: Vec::new(),
            price,
            variations: Vec::new(),
            sku: generated_sku(Timestamp::now()),
            stock_quantity,
            low_stock_alert_threshold: DEFAULT_LOW_STOCK_ALERT_THRESHOLD,
        }
    }
}

/// SKU assigned when the caller does not supply one.
#[must_use]
pub fn generated_sku(now: Timestamp) -> String {
    format!("SKU-{}", now.as_millisecond())
}

/// Product Update Data
///
/// Only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub price: Option<u64>,
    pub variations: Option<Vec<ProductVariation>>,
    pub sku: Option<String>,
    pub stock_quantity: Option<u32>,
    pub low_stock_alert_threshold: Option<u32>,
}

impl ProductUpdate {
    /// Apply the supplied fields to a record in place.
    pub fn apply_to(self, product: &mut ProductRecord) {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(images) = self.images {
            product.images = images;
        }
        if let Some(videos) = self.videos {
            product.videos = videos;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(variations) = self.variations {
            product.variations = variations;
        }
        if let Some(sku) = self.sku {
            product.sku = sku;
        }
        if let Some(stock_quantity) = self.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if let Some(threshold) = self.low_stock_alert_threshold {
            product.low_stock_alert_threshold = threshold;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_sku_uses_unix_millis() -> Result<(), jiff::Error> {
        let now: Timestamp = "2026-02-21T12:00:00Z".parse()?;

        assert_eq!(generated_sku(now), "SKU-1771675200000");

        Ok(())
    }

    #[test]
    fn new_product_uses_default_threshold() {
        let product = NewProduct::new(ProductUuid::new(), "Mug", "A mug", 10_00, 3);

        assert_eq!(product.low_stock_alert_threshold, 5);
        assert!(product.sku.starts_with("SKU-"));
        assert!(product.variations.is_empty());
    }
}
