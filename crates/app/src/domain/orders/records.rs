//! Order Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        products::records::{ProductUuid, Variation},
        users::records::{Address, UserUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
///
/// Amounts are fixed at creation. Only `status` and `payment_status` change
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user: UserUuid,
    pub items: Vec<OrderLineItem>,
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total_amount: u64,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: Address,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A purchased line, with the product price copied at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product: ProductUuid,
    pub quantity: u32,
    #[serde(default)]
    pub variation: Variation,
    pub price_at_purchase: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// The label stored in the database and used on the wire.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($label => Ok(Self::$variant),)+
                    other => Err(UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

labelled_enum! {
    /// Fulfilment state of an order.
    OrderStatus ("order status") {
        Pending => "Pending",
        Processing => "Processing",
        Shipped => "Shipped",
        Delivered => "Delivered",
        Cancelled => "Cancelled",
    }
}

labelled_enum! {
    PaymentStatus ("payment status") {
        Pending => "Pending",
        Paid => "Paid",
        Failed => "Failed",
        Refunded => "Refunded",
    }
}

labelled_enum! {
    /// How the customer intends to pay. A label only; no gateway is involved.
    PaymentMethod ("payment method") {
        Stripe => "Stripe",
        PayPal => "PayPal",
        Cod => "COD",
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn payment_method_uses_storefront_labels() -> TestResult {
        assert_eq!(PaymentMethod::Cod.as_str(), "COD");
        assert_eq!("PayPal".parse::<PaymentMethod>()?, PaymentMethod::PayPal);
        assert_eq!(serde_json::to_value(PaymentMethod::Cod)?, "COD");

        Ok(())
    }

    #[test]
    fn unknown_status_names_its_kind() {
        let error = "Lost".parse::<OrderStatus>().err();

        assert_eq!(
            error.map(|e| e.to_string()),
            Some("unknown order status `Lost`".to_string())
        );
    }
}
