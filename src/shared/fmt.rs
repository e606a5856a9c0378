//! Money formatting for human-readable display.
//!
//! Prices come back from the backend as decimal strings; apps render them as
//! rupee amounts with the paise dropped when they are whole.

use rust_decimal::Decimal;

/// Format a decimal amount as a rupee string: `₹45`, `₹45.50`.
///
/// Whole amounts drop the fractional part entirely; everything else is
/// rendered with two decimal places.
pub fn rupees(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("₹{}", normalized)
    } else {
        format!("₹{:.2}", normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_amounts_drop_paise() {
        assert_eq!(rupees(dec!(45)), "₹45");
        assert_eq!(rupees(dec!(45.00)), "₹45");
    }

    #[test]
    fn test_fractional_amounts_keep_two_places() {
        assert_eq!(rupees(dec!(45.5)), "₹45.50");
        assert_eq!(rupees(dec!(120.25)), "₹120.25");
    }

    #[test]
    fn test_zero() {
        assert_eq!(rupees(Decimal::ZERO), "₹0");
    }
}
