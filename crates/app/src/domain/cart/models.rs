//! Cart Models

use serde::{Deserialize, Serialize};

use crate::domain::cart::errors::CartError;

/// Lowest quantity a cart line may carry.
pub const MIN_LINE_QUANTITY: i32 = 1;

/// Highest quantity a cart line may carry. Also caps the merged total when
/// the same (product, size) pair is added twice.
pub const MAX_LINE_QUANTITY: i32 = 100;

/// One (product, size, quantity) entry a shopper intends to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: i32,
    #[serde(default)]
    pub size_id: Option<i32>,
    pub quantity: i32,
}

/// An ordered sequence of cart lines, unique per (product, size).
///
/// Serialises transparently as the line-item array carried in the `Cart`
/// cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw line items, merging duplicate (product, size)
    /// pairs and enforcing quantity bounds on every line and merged total.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] when any line, or any merged
    /// pair, falls outside `[MIN_LINE_QUANTITY, MAX_LINE_QUANTITY]`.
    pub fn from_lines(lines: &[CartLineItem]) -> Result<Self, CartError> {
        let mut cart = Self::new();

        for line in lines {
            cart.upsert(line.product_id, line.size_id, line.quantity)?;
        }

        Ok(cart)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Merge `quantity` into an existing (product, size) line or append a
    /// new one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] when `quantity` is out of
    /// bounds or the merged total would exceed [`MAX_LINE_QUANTITY`].
    pub fn upsert(
        &mut self,
        product_id: i32,
        size_id: Option<i32>,
        quantity: i32,
    ) -> Result<(), CartError> {
        check_bounds(quantity)?;

        if let Some(existing) = self.find_mut(product_id, size_id) {
            let merged = existing.quantity + quantity;

            if merged > MAX_LINE_QUANTITY {
                return Err(CartError::InvalidQuantity);
            }

            existing.quantity = merged;

            return Ok(());
        }

        self.lines.push(CartLineItem {
            product_id,
            size_id,
            quantity,
        });

        Ok(())
    }

    /// Replace the quantity of an existing (product, size) line, or append
    /// a new line when none exists.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] when `quantity` is out of
    /// bounds.
    pub fn set_quantity(
        &mut self,
        product_id: i32,
        size_id: Option<i32>,
        quantity: i32,
    ) -> Result<(), CartError> {
        check_bounds(quantity)?;

        if let Some(existing) = self.find_mut(product_id, size_id) {
            existing.quantity = quantity;

            return Ok(());
        }

        self.lines.push(CartLineItem {
            product_id,
            size_id,
            quantity,
        });

        Ok(())
    }

    /// Drop the (product, size) line if present. Removing an absent line is
    /// not an error.
    pub fn remove(&mut self, product_id: i32, size_id: Option<i32>) {
        self.lines
            .retain(|line| !(line.product_id == product_id && line.size_id == size_id));
    }

    /// Current quantity of the (product, size) line, zero when absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: i32, size_id: Option<i32>) -> i32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id && line.size_id == size_id)
            .map_or(0, |line| line.quantity)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn find_mut(&mut self, product_id: i32, size_id: Option<i32>) -> Option<&mut CartLineItem> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id && line.size_id == size_id)
    }
}

fn check_bounds(quantity: i32) -> Result<(), CartError> {
    if !(MIN_LINE_QUANTITY..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(CartError::InvalidQuantity);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_merges_same_product_and_size() {
        let mut cart = Cart::new();

        cart.upsert(5, Some(2), 3).expect("first add should succeed");
        cart.upsert(5, Some(2), 4).expect("second add should succeed");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(5, Some(2)), 7);
    }

    #[test]
    fn upsert_keeps_distinct_sizes_apart() {
        let mut cart = Cart::new();

        cart.upsert(5, Some(2), 3).expect("add should succeed");
        cart.upsert(5, Some(3), 4).expect("add should succeed");
        cart.upsert(5, None, 1).expect("add should succeed");

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.quantity_of(5, Some(3)), 4);
        assert_eq!(cart.quantity_of(5, None), 1);
    }

    #[test]
    fn upsert_rejects_out_of_bounds_quantities() {
        let mut cart = Cart::new();

        for quantity in [0, -1, 101] {
            assert_eq!(
                cart.upsert(1, None, quantity),
                Err(CartError::InvalidQuantity),
                "quantity {quantity} should be rejected"
            );
        }

        assert!(cart.is_empty());
    }

    #[test]
    fn upsert_accepts_boundary_quantities() {
        let mut cart = Cart::new();

        cart.upsert(1, None, MIN_LINE_QUANTITY)
            .expect("quantity 1 should be accepted");
        cart.upsert(2, None, MAX_LINE_QUANTITY)
            .expect("quantity 100 should be accepted");

        assert_eq!(cart.quantity_of(2, None), MAX_LINE_QUANTITY);
    }

    #[test]
    fn upsert_rejects_merge_past_the_cap() {
        let mut cart = Cart::new();

        cart.upsert(1, Some(1), 60).expect("add should succeed");

        assert_eq!(
            cart.upsert(1, Some(1), 41),
            Err(CartError::InvalidQuantity)
        );

        // The existing line is untouched by the rejected merge.
        assert_eq!(cart.quantity_of(1, Some(1)), 60);
    }

    #[test]
    fn set_quantity_replaces_instead_of_merging() {
        let mut cart = Cart::new();

        cart.upsert(1, Some(1), 10).expect("add should succeed");
        cart.set_quantity(1, Some(1), 2)
            .expect("update should succeed");

        assert_eq!(cart.quantity_of(1, Some(1)), 2);
    }

    #[test]
    fn set_quantity_appends_missing_line() {
        let mut cart = Cart::new();

        cart.set_quantity(9, None, 5).expect("update should succeed");

        assert_eq!(cart.quantity_of(9, None), 5);
    }

    #[test]
    fn remove_drops_only_the_matching_line() {
        let mut cart = Cart::new();

        cart.upsert(1, Some(1), 2).expect("add should succeed");
        cart.upsert(1, Some(2), 3).expect("add should succeed");

        cart.remove(1, Some(1));
        cart.remove(7, None);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(1, Some(2)), 3);
    }

    #[test]
    fn from_lines_merges_duplicates() {
        let cart = Cart::from_lines(&[
            CartLineItem {
                product_id: 5,
                size_id: Some(2),
                quantity: 3,
            },
            CartLineItem {
                product_id: 5,
                size_id: Some(2),
                quantity: 4,
            },
        ])
        .expect("lines should validate");

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(5, Some(2)), 7);
    }

    #[test]
    fn from_lines_rejects_invalid_quantity() {
        let result = Cart::from_lines(&[CartLineItem {
            product_id: 5,
            size_id: None,
            quantity: 0,
        }]);

        assert_eq!(result, Err(CartError::InvalidQuantity));
    }

    #[test]
    fn cookie_wire_format_round_trips() {
        let cart = Cart::from_lines(&[CartLineItem {
            product_id: 5,
            size_id: Some(2),
            quantity: 3,
        }])
        .expect("lines should validate");

        let encoded = serde_json::to_string(&cart).expect("cart should serialise");

        assert_eq!(encoded, r#"[{"productId":5,"sizeId":2,"quantity":3}]"#);

        let decoded: Cart = serde_json::from_str(&encoded).expect("cart should deserialise");

        assert_eq!(decoded, cart);
    }
}
