//! Order totals.

use thiserror::Error;

use crate::domain::orders::records::OrderLineItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("order amount overflows")]
pub struct AmountOverflow;

/// Amounts fixed on an order at creation, in minor currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub shipping_cost: u64,
    pub tax: u64,
    pub total_amount: u64,
}

impl OrderTotals {
    /// `subtotal` is the sum of `price_at_purchase * quantity`; `total_amount`
    /// adds shipping and tax.
    ///
    /// # Errors
    ///
    /// Returns [`AmountOverflow`] when any intermediate amount does not fit.
    pub fn compute(
        items: &[OrderLineItem],
        shipping_cost: u64,
        tax: u64,
    ) -> Result<Self, AmountOverflow> {
        let subtotal = items.iter().try_fold(0_u64, |subtotal, item| {
            item.price_at_purchase
                .checked_mul(u64::from(item.quantity))
                .and_then(|line| subtotal.checked_add(line))
                .ok_or(AmountOverflow)
        })?;

        let total_amount = subtotal
            .checked_add(shipping_cost)
            .and_then(|total| total.checked_add(tax))
            .ok_or(AmountOverflow)?;

        Ok(Self {
            subtotal,
            shipping_cost,
            tax,
            total_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::products::records::{ProductUuid, Variation};

    use super::*;

    fn line(price: u64, quantity: u32) -> OrderLineItem {
        OrderLineItem {
            product: ProductUuid::new(),
            quantity,
            variation: Variation::default(),
            price_at_purchase: price,
        }
    }

    #[test]
    fn totals_add_shipping_and_tax_to_subtotal() -> TestResult {
        let totals = OrderTotals::compute(&[line(10_00, 3)], 2_00, 1_00)?;

        assert_eq!(totals.subtotal, 30_00);
        assert_eq!(totals.total_amount, 33_00);

        Ok(())
    }

    #[test]
    fn subtotal_sums_every_line() -> TestResult {
        let totals = OrderTotals::compute(&[line(4_99, 2), line(1_50, 4), line(20_00, 1)], 0, 0)?;

        assert_eq!(totals.subtotal, 9_98 + 6_00 + 20_00);
        assert_eq!(totals.total_amount, totals.subtotal);

        Ok(())
    }

    #[test]
    fn overflowing_line_is_rejected() {
        assert_eq!(
            OrderTotals::compute(&[line(u64::MAX, 2)], 0, 0),
            Err(AmountOverflow)
        );
    }

    #[test]
    fn overflowing_total_is_rejected() {
        assert_eq!(
            OrderTotals::compute(&[line(u64::MAX, 1)], 1, 0),
            Err(AmountOverflow)
        );
    }
}
