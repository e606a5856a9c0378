//! Pricing derivation — pure computation over the server-reported subtotal
//! and screen-local selections (tip, coupon).
//!
//! The server total is authoritative for the cart itself; everything here is
//! the checkout-side arithmetic layered on top of it.

mod tip;

pub use tip::{CouponEntry, TipSelection};

use crate::shared::fmt::rupees;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Current fee policy: delivery and handling are unconditionally free.
pub const DELIVERY_FEE: Decimal = dec!(0);
pub const HANDLING_FEE: Decimal = dec!(0);

/// Flat discount applied while a coupon is entered. Placeholder policy —
/// the backend does not validate codes yet.
pub const COUPON_FLAT_DISCOUNT: Decimal = dec!(50);

/// Subtotal at which the free-delivery banner stops showing. Messaging
/// only; the delivery fee is 0 either way under the current policy.
pub const FREE_DELIVERY_THRESHOLD: Decimal = dec!(199);

/// A derived price breakdown for the checkout summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub handling_fee: Decimal,
    pub discount: Decimal,
    pub tip: Decimal,
    pub total: Decimal,
}

impl Quote {
    /// Derive the payable total:
    /// `subtotal + delivery + handling − discount + tip`.
    ///
    /// The discount is clamped so it can never exceed what is being paid;
    /// the total therefore never goes negative regardless of input
    /// combinations.
    pub fn compute(subtotal: Decimal, tip: &TipSelection, coupon_applied: bool) -> Self {
        let tip_amount = tip.amount();
        let payable_before_discount = subtotal + DELIVERY_FEE + HANDLING_FEE + tip_amount;
        let discount = if coupon_applied {
            COUPON_FLAT_DISCOUNT.min(payable_before_discount)
        } else {
            Decimal::ZERO
        };

        Quote {
            subtotal,
            delivery_fee: DELIVERY_FEE,
            handling_fee: HANDLING_FEE,
            discount,
            tip: tip_amount,
            total: payable_before_discount - discount,
        }
    }
}

/// How much more must be added to the cart before the free-delivery banner
/// goes away: `max(0, threshold − subtotal)`. Purely informational — it
/// never affects the quote.
pub fn free_delivery_gap(subtotal: Decimal) -> Decimal {
    (FREE_DELIVERY_THRESHOLD - subtotal).max(Decimal::ZERO)
}

/// Banner text for the free-delivery hint, or `None` once the threshold is
/// met (the banner is suppressed, not rendered as zero).
pub fn free_delivery_hint(subtotal: Decimal) -> Option<String> {
    let gap = free_delivery_gap(subtotal);
    if gap.is_zero() {
        None
    } else {
        Some(format!("Add {} more to qualify for free delivery", rupees(gap)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_quote() {
        // subtotal 150, tip 20, coupon applied → 150 + 0 + 0 − 50 + 20 = 120
        let quote = Quote::compute(dec!(150), &TipSelection::Preset(dec!(20)), true);
        assert_eq!(quote.discount, dec!(50));
        assert_eq!(quote.total, dec!(120));
    }

    #[test]
    fn test_no_coupon_no_discount() {
        let quote = Quote::compute(dec!(150), &TipSelection::None, false);
        assert_eq!(quote.discount, Decimal::ZERO);
        assert_eq!(quote.total, dec!(150));
    }

    #[test]
    fn test_discount_clamped_to_payable() {
        // Tiny order: the flat ₹50 cannot push the total below zero.
        let quote = Quote::compute(dec!(30), &TipSelection::None, true);
        assert_eq!(quote.discount, dec!(30));
        assert_eq!(quote.total, Decimal::ZERO);

        // Tip counts toward what the discount can consume.
        let quote = Quote::compute(dec!(30), &TipSelection::Custom(dec!(10)), true);
        assert_eq!(quote.discount, dec!(40));
        assert_eq!(quote.total, Decimal::ZERO);
    }

    #[test]
    fn test_free_delivery_gap() {
        assert_eq!(free_delivery_gap(dec!(80)), dec!(119));
        assert_eq!(free_delivery_gap(dec!(250)), Decimal::ZERO);
        assert_eq!(free_delivery_gap(dec!(199)), Decimal::ZERO);
    }

    #[test]
    fn test_hint_suppressed_past_threshold() {
        assert_eq!(
            free_delivery_hint(dec!(80)).as_deref(),
            Some("Add ₹119 more to qualify for free delivery")
        );
        assert!(free_delivery_hint(dec!(250)).is_none());
    }
}
