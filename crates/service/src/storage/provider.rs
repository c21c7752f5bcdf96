//! Cart store selection
//!
//! The backend is chosen once at startup from configuration and held behind
//! an `Arc` for the life of the process. Dispatch goes through the enum, not
//! a trait object.

use async_trait::async_trait;
use configs::CartStoreConfig;
use models::Cart;
use tracing::info;

use crate::errors::CartStoreError;
use crate::storage::cart_store::CartStore;
use crate::storage::local_store::LocalCartStore;
use crate::storage::redis_store::RedisCartStore;

#[derive(Debug)]
pub enum CartStoreProvider {
    /// In-process store, used when no cache address is configured
    Local(LocalCartStore),
    /// Redis-backed store (boxed to reduce enum size)
    Redis(Box<RedisCartStore>),
}

impl CartStoreProvider {
    /// Select the backend and initialize it.
    ///
    /// An initialization failure is returned to the caller; the process is
    /// expected to stop rather than serve traffic without its configured backend.
    pub async fn from_config(config: &CartStoreConfig) -> Result<Self, CartStoreError> {
        let provider = Self::select(config);
        provider.initialize().await?;
        info!(
            provider = provider.provider_name(),
            distributed = provider.is_distributed(),
            "cart store initialization completed"
        );
        Ok(provider)
    }

    /// Pick the backend without connecting.
    pub fn select(config: &CartStoreConfig) -> Self {
        match config.redis_addr.as_deref() {
            Some(addr) => Self::Redis(Box::new(RedisCartStore::from_config(addr, config))),
            None => {
                info!(
                    "redis address was not specified (REDIS_ADDR or cart_store.redis_addr); \
                     starting with the local in-memory cart store"
                );
                Self::Local(LocalCartStore::new())
            }
        }
    }

    /// Whether carts are shared with other replicas of the service.
    pub fn is_distributed(&self) -> bool {
        matches!(self, Self::Redis(_))
    }
}

#[async_trait]
impl CartStore for CartStoreProvider {
    async fn initialize(&self) -> Result<(), CartStoreError> {
        match self {
            Self::Local(s) => s.initialize().await,
            Self::Redis(s) => s.initialize().await,
        }
    }

    async fn add_item(&self, user_id: &str, product_id: &str, quantity: i32) -> Result<(), CartStoreError> {
        match self {
            Self::Local(s) => s.add_item(user_id, product_id, quantity).await,
            Self::Redis(s) => s.add_item(user_id, product_id, quantity).await,
        }
    }

    async fn empty_cart(&self, user_id: &str) -> Result<(), CartStoreError> {
        match self {
            Self::Local(s) => s.empty_cart(user_id).await,
            Self::Redis(s) => s.empty_cart(user_id).await,
        }
    }

    async fn get_cart(&self, user_id: &str) -> Result<Cart, CartStoreError> {
        match self {
            Self::Local(s) => s.get_cart(user_id).await,
            Self::Redis(s) => s.get_cart(user_id).await,
        }
    }

    async fn ping(&self) -> bool {
        match self {
            Self::Local(s) => s.ping().await,
            Self::Redis(s) => s.ping().await,
        }
    }

    fn provider_name(&self) -> &'static str {
        match self {
            Self::Local(s) => s.provider_name(),
            Self::Redis(s) => s.provider_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn no_address_selects_local_store() {
        let provider = CartStoreProvider::from_config(&CartStoreConfig::default()).await.unwrap();
        assert_eq!(provider.provider_name(), "local");
        assert!(!provider.is_distributed());
        assert!(provider.ping().await);

        provider.add_item("u1", "soap", 2).await.unwrap();
        assert_eq!(provider.get_cart("u1").await.unwrap().quantity_of("soap"), Some(2));
    }

    #[test]
    fn address_selects_redis_store() {
        let config = CartStoreConfig { redis_addr: Some("redis-cart:6379".into()), ..Default::default() };
        let provider = CartStoreProvider::select(&config);
        assert_eq!(provider.provider_name(), "redis");
        assert!(provider.is_distributed());
    }

    #[tokio::test]
    async fn unreachable_redis_is_fatal() {
        let config = CartStoreConfig {
            redis_addr: Some("127.0.0.1:1".into()),
            connect_timeout_ms: 300,
            response_timeout_ms: 300,
        };
        let started = std::time::Instant::now();
        let err = CartStoreProvider::from_config(&config).await.unwrap_err();
        assert!(matches!(err, CartStoreError::Connection(_)), "got {err:?}");
        // bounded by the connect timeout (plus the PING guard), never retried forever
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
