//! Cart storage abstractions
//!
//! One contract (`CartStore`) with an in-process backend and a Redis backend.
//! `CartStoreProvider` picks one of them once at startup.

pub mod cart_store;
pub mod codec;
pub mod local_store;
pub mod provider;
pub mod redis_store;

pub use cart_store::CartStore;
pub use local_store::LocalCartStore;
pub use provider::CartStoreProvider;
pub use redis_store::RedisCartStore;
