use std::sync::Arc;
use std::time::Instant;

use models::cart::{validate_add_item, validate_user_id};
use models::Cart;
use tracing::{debug, instrument, warn};

use crate::errors::CartStoreError;
use crate::metrics;
use crate::storage::{CartStore, CartStoreProvider};

/// Application service in front of the selected cart store.
/// Validates arguments, logs and meters every call, then delegates.
pub struct CartService<S: CartStore = CartStoreProvider> {
    store: Arc<S>,
}

impl<S: CartStore> Clone for CartService<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: CartStore> CartService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    #[instrument(skip(self), fields(provider = self.store.provider_name()))]
    pub async fn add_item(&self, user_id: &str, product_id: &str, quantity: i32) -> Result<(), CartStoreError> {
        let started = Instant::now();
        let result = match validate_add_item(user_id, product_id, quantity) {
            Ok(()) => self.store.add_item(user_id, product_id, quantity).await,
            Err(e) => Err(e.into()),
        };
        observe("add_item", &result, started);
        result
    }

    #[instrument(skip(self), fields(provider = self.store.provider_name()))]
    pub async fn get_cart(&self, user_id: &str) -> Result<Cart, CartStoreError> {
        let started = Instant::now();
        let result = match validate_user_id(user_id) {
            Ok(()) => self.store.get_cart(user_id).await,
            Err(e) => Err(e.into()),
        };
        if let Ok(cart) = &result {
            debug!(items = cart.items.len(), total_quantity = cart.total_quantity(), "cart loaded");
        }
        observe("get_cart", &result, started);
        result
    }

    #[instrument(skip(self), fields(provider = self.store.provider_name()))]
    pub async fn empty_cart(&self, user_id: &str) -> Result<(), CartStoreError> {
        let started = Instant::now();
        let result = match validate_user_id(user_id) {
            Ok(()) => self.store.empty_cart(user_id).await,
            Err(e) => Err(e.into()),
        };
        observe("empty_cart", &result, started);
        result
    }

    /// Health of the backing store, as reported by `/health`.
    pub async fn is_serving(&self) -> bool {
        let serving = self.store.ping().await;
        if !serving {
            warn!(provider = self.store.provider_name(), "cart store is not serving");
        }
        serving
    }
}

fn observe<T>(operation: &'static str, result: &Result<T, CartStoreError>, started: Instant) {
    let elapsed = started.elapsed();
    metrics::record(operation, result, elapsed);
    match result {
        Ok(_) => debug!(operation, elapsed_ms = elapsed.as_millis() as u64, "cart call completed"),
        Err(e) => warn!(operation, error = %e, kind = e.kind(), "cart call failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalCartStore;

    fn service() -> CartService<LocalCartStore> {
        CartService::new(Arc::new(LocalCartStore::new()))
    }

    #[tokio::test]
    async fn rejects_invalid_arguments_before_touching_store() {
        let store = Arc::new(LocalCartStore::new());
        let svc = CartService::new(Arc::clone(&store));
        assert!(matches!(svc.add_item("", "soap", 1).await, Err(CartStoreError::InvalidArgument(_))));
        assert!(matches!(svc.add_item("u1", "", 1).await, Err(CartStoreError::InvalidArgument(_))));
        assert!(matches!(svc.add_item("u1", "soap", 0).await, Err(CartStoreError::InvalidArgument(_))));
        assert!(matches!(svc.get_cart(" ").await, Err(CartStoreError::InvalidArgument(_))));
        assert!(matches!(svc.empty_cart("").await, Err(CartStoreError::InvalidArgument(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delegates_to_store() {
        let svc = service();
        svc.add_item("u1", "soap", 2).await.unwrap();
        svc.add_item("u1", "soap", 3).await.unwrap();
        assert_eq!(svc.get_cart("u1").await.unwrap().quantity_of("soap"), Some(5));

        svc.empty_cart("u1").await.unwrap();
        assert_eq!(svc.get_cart("u1").await.unwrap(), Cart::empty("u1"));
        assert!(svc.is_serving().await);
    }

    #[tokio::test]
    async fn records_metrics_per_outcome() {
        let svc = service();
        let invalid = metrics::STORE_OPERATIONS_TOTAL.with_label_values(&["add_item", "invalid_argument"]);
        let before = invalid.get();
        let _ = svc.add_item("u1", "soap", -1).await;
        assert!(invalid.get() > before);
    }
}
