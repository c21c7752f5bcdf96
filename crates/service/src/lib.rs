//! Service layer of the cart service.
//! - `storage` holds the cart store contract and its in-memory and Redis backends.
//! - `cart_service` is the facade the request adapter talks to.
//! - Errors are reported through `errors::CartStoreError`.

pub mod cart_service;
pub mod errors;
pub mod metrics;
pub mod storage;

pub use cart_service::CartService;
pub use errors::CartStoreError;
pub use storage::{CartStore, CartStoreProvider, LocalCartStore, RedisCartStore};
