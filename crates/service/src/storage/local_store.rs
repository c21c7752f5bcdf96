use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use models::Cart;
use tracing::{debug, info};

use crate::errors::CartStoreError;
use crate::storage::cart_store::CartStore;

/// In-process cart store keyed by user id.
///
/// Each mutation runs under the shard lock of its key, so concurrent adds for
/// the same user never lose updates while different users rarely contend.
/// Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct LocalCartStore {
    carts: Arc<DashMap<String, Cart>>,
}

impl LocalCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of carts currently held.
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}

#[async_trait]
impl CartStore for LocalCartStore {
    async fn initialize(&self) -> Result<(), CartStoreError> {
        info!(provider = "local", "local cart store initialized");
        Ok(())
    }

    async fn add_item(&self, user_id: &str, product_id: &str, quantity: i32) -> Result<(), CartStoreError> {
        self.carts
            .entry(user_id.to_string())
            .and_modify(|cart| cart.add_item(product_id, quantity))
            .or_insert_with(|| Cart::with_item(user_id, product_id, quantity));
        debug!(user_id, product_id, quantity, carts = self.len(), "local add_item");
        Ok(())
    }

    async fn empty_cart(&self, user_id: &str) -> Result<(), CartStoreError> {
        self.carts.insert(user_id.to_string(), Cart::empty(user_id));
        debug!(user_id, "local empty_cart");
        Ok(())
    }

    async fn get_cart(&self, user_id: &str) -> Result<Cart, CartStoreError> {
        let cart = match self.carts.get(user_id) {
            Some(entry) => entry.value().clone(),
            None => {
                debug!(user_id, "no cart stored for user");
                Cart::empty(user_id)
            }
        };
        Ok(cart)
    }

    async fn ping(&self) -> bool {
        true
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }
}
