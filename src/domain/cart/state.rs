//! Cart state container — app-owned, SDK-provided update logic.

use super::CartLine;
use crate::shared::ProductId;
use rust_decimal::Decimal;

/// The local projection of the remote cart: line list plus the
/// server-computed total.
///
/// Replaced wholesale by [`apply`](Self::apply) after every successful fetch;
/// nothing in the SDK patches it from partial responses. The total is the
/// server's figure and is authoritative for checkout — the per-line math in
/// [`CartLine::line_total`] is display-only.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    lines: Vec<CartLine>,
    total: Decimal,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot atomically with a freshly fetched one.
    pub fn apply(&mut self, lines: Vec<CartLine>, total: Decimal) {
        self.lines = lines;
        self.total = total;
    }

    /// Drop everything. Called on logout so no cart leaks across accounts.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Decimal::ZERO;
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Server-computed cart total.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Badge count: the sum of line quantities, not the number of lines.
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of a product in the cart, 0 when absent. O(n) scan; carts
    /// are small.
    pub fn item_quantity(&self, product_id: &ProductId) -> u32 {
        self.line_for_product(product_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    pub fn line_for_product(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Product;
    use crate::shared::{CartLineId, CategoryId};
    use rust_decimal_macros::dec;

    fn line(id: &str, product_id: &str, quantity: u32, price: Decimal) -> CartLine {
        CartLine {
            id: CartLineId::from(id),
            product_id: ProductId::from(product_id),
            quantity,
            product: Product {
                id: ProductId::from(product_id),
                sub_category_id: CategoryId::from("c2"),
                name: format!("product {product_id}"),
                description: None,
                price,
                stock_quantity: 10,
                image_url: None,
            },
        }
    }

    #[test]
    fn test_count_sums_quantities_not_lines() {
        let mut state = CartState::new();
        state.apply(
            vec![line("l1", "p1", 2, dec!(45)), line("l2", "p2", 3, dec!(65))],
            dec!(285),
        );
        assert_eq!(state.count(), 5);
        assert_eq!(state.lines().len(), 2);
    }

    #[test]
    fn test_apply_replaces_wholesale() {
        let mut state = CartState::new();
        state.apply(vec![line("l1", "p1", 2, dec!(45))], dec!(90));
        state.apply(vec![line("l2", "p2", 1, dec!(65))], dec!(65));
        assert_eq!(state.lines().len(), 1);
        assert_eq!(state.item_quantity(&ProductId::from("p1")), 0);
        assert_eq!(state.total(), dec!(65));
    }

    #[test]
    fn test_lookups() {
        let mut state = CartState::new();
        state.apply(vec![line("l1", "p1", 2, dec!(45))], dec!(90));
        assert_eq!(state.item_quantity(&ProductId::from("p1")), 2);
        assert_eq!(
            state
                .line_for_product(&ProductId::from("p1"))
                .map(|l| l.id.clone()),
            Some(CartLineId::from("l1"))
        );
        assert!(state.line_for_product(&ProductId::from("p9")).is_none());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut state = CartState::new();
        state.apply(vec![line("l1", "p1", 4, dec!(45))], dec!(180));
        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.count(), 0);
        assert_eq!(state.total(), Decimal::ZERO);
    }

    #[test]
    fn test_line_total_is_price_times_quantity() {
        let l = line("l1", "p1", 3, dec!(65));
        assert_eq!(l.line_total(), dec!(195));
    }
}
