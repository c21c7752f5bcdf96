//! Pieces shared by every crate of the cart service: response types and
//! logging bootstrap.

pub mod types;
pub mod utils;
