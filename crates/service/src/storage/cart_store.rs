use async_trait::async_trait;
use models::Cart;

use crate::errors::CartStoreError;

/// Contract shared by every cart backend.
/// Implementations must tolerate arbitrary concurrent calls across users.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Prepare the backend. Must complete before any other call.
    async fn initialize(&self) -> Result<(), CartStoreError>;

    /// Add `quantity` of `product_id`, merging with an existing line for that product.
    async fn add_item(&self, user_id: &str, product_id: &str, quantity: i32) -> Result<(), CartStoreError>;

    /// Reset the cart to zero items whether or not it existed.
    async fn empty_cart(&self, user_id: &str) -> Result<(), CartStoreError>;

    /// Stored cart, or an empty cart for `user_id` when nothing is stored.
    async fn get_cart(&self, user_id: &str) -> Result<Cart, CartStoreError>;

    /// Liveness of the backing dependency. Never fails; errors read as `false`.
    async fn ping(&self) -> bool;

    fn provider_name(&self) -> &'static str;
}
