//! Cookie-backed cart store.

use salvo::{
    Request, Response,
    http::cookie::{Cookie, time::Duration},
};

use vitrine_app::domain::cart::{Cart, CartStore};

/// Name of the cart cookie.
pub(crate) const CART_COOKIE: &str = "Cart";

/// Adapts the `Cart` cookie to the application-level [`CartStore`].
///
/// Mutations stay buffered until [`apply`](Self::apply); a handler that
/// fails before applying leaves the client's cookie exactly as it was.
pub(crate) struct CookieCartStore {
    cart: Cart,
    dirty: bool,
    cleared: bool,
}

impl CookieCartStore {
    /// Read the cart from the request cookie. A missing or undecodable
    /// cookie reads as an empty cart.
    pub(crate) fn from_request(req: &Request) -> Self {
        let cart = req
            .cookie(CART_COOKIE)
            .and_then(|cookie| serde_json::from_str::<Cart>(cookie.value()).ok())
            .unwrap_or_default();

        Self::with_cart(cart)
    }

    #[must_use]
    pub(crate) fn with_cart(cart: Cart) -> Self {
        Self {
            cart,
            dirty: false,
            cleared: false,
        }
    }

    /// Write the buffered cookie mutation, if any, to the response.
    pub(crate) fn apply(self, res: &mut Response, ttl_days: i64) {
        if self.cleared {
            let removal = Cookie::build((CART_COOKIE, ""))
                .path("/")
                .http_only(true)
                .max_age(Duration::ZERO)
                .build();

            res.add_cookie(removal);
        } else if self.dirty {
            let Ok(value) = serde_json::to_string(&self.cart) else {
                return;
            };

            let cookie = Cookie::build((CART_COOKIE, value))
                .path("/")
                .http_only(true)
                .max_age(Duration::days(ttl_days))
                .build();

            res.add_cookie(cookie);
        }
    }
}

impl CartStore for CookieCartStore {
    fn get(&self) -> Cart {
        self.cart.clone()
    }

    fn put(&mut self, cart: Cart) {
        self.cart = cart;
        self.dirty = true;
    }

    fn clear(&mut self) {
        self.cart.clear();
        self.cleared = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_apply_writes_an_http_only_cookie() {
        let mut store = CookieCartStore::with_cart(Cart::new());
        let mut cart = Cart::new();

        cart.upsert(5, Some(2), 3).expect("add should succeed");
        store.put(cart);

        let mut res = Response::new();

        store.apply(&mut res, 3);

        let cookie = res.cookies().get(CART_COOKIE).expect("cookie should be set");

        assert_eq!(cookie.value(), r#"[{"productId":5,"sizeId":2,"quantity":3}]"#);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(Duration::days(3)));
    }

    #[test]
    fn clear_then_apply_expires_the_cookie() {
        let mut cart = Cart::new();

        cart.upsert(5, Some(2), 3).expect("add should succeed");

        let mut store = CookieCartStore::with_cart(cart);

        store.clear();

        let mut res = Response::new();

        store.apply(&mut res, 3);

        let cookie = res.cookies().get(CART_COOKIE).expect("cookie should be set");

        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert!(cookie.value().is_empty());
    }

    #[test]
    fn untouched_store_applies_nothing() {
        let store = CookieCartStore::with_cart(Cart::new());
        let mut res = Response::new();

        store.apply(&mut res, 3);

        assert!(res.cookies().get(CART_COOKIE).is_none());
    }
}
