//! Domain types of the cart service.

pub mod cart;
pub mod errors;

pub use cart::{Cart, CartItem};
