//! Cart storage capability.

use crate::domain::cart::models::Cart;

/// Read/write access to one client's cart.
///
/// Implementations only need read-your-writes within a session and an expiry
/// policy. The HTTP layer backs this with the `Cart` cookie; tests use
/// [`MemoryCartStore`].
pub trait CartStore: Send {
    /// Snapshot of the cart as currently stored.
    fn get(&self) -> Cart;

    /// Replace the stored cart.
    fn put(&mut self, cart: Cart);

    /// Discard the stored cart entirely.
    fn clear(&mut self);
}

/// In-memory cart store.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    cart: Cart,
}

impl MemoryCartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cart(cart: Cart) -> Self {
        Self { cart }
    }
}

impl CartStore for MemoryCartStore {
    fn get(&self) -> Cart {
        self.cart.clone()
    }

    fn put(&mut self, cart: Cart) {
        self.cart = cart;
    }

    fn clear(&mut self) {
        self.cart.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_reads_its_writes() {
        let mut store = MemoryCartStore::new();
        let mut cart = Cart::new();

        cart.upsert(1, None, 2).expect("add should succeed");
        store.put(cart.clone());

        assert_eq!(store.get(), cart);

        store.clear();

        assert!(store.get().is_empty());
    }
}
