use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A single line of a cart. `product_id` is unique within its cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: i32,
}

/// The one cart held per user. A user without a stored cart is treated as
/// owning `Cart::empty(user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), items: Vec::new() }
    }

    /// Cart holding exactly one line, as created by the first add for a user.
    pub fn with_item(user_id: impl Into<String>, product_id: impl Into<String>, quantity: i32) -> Self {
        Self {
            user_id: user_id.into(),
            items: vec![CartItem { product_id: product_id.into(), quantity }],
        }
    }

    /// Merge-on-add: bump the existing line for `product_id` or append a new one.
    pub fn add_item(&mut self, product_id: &str, quantity: i32) {
        match self.items.iter_mut().find(|item| item.product_id == product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(CartItem { product_id: product_id.to_string(), quantity }),
        }
    }

    pub fn quantity_of(&self, product_id: &str) -> Option<i32> {
        self.items.iter().find(|item| item.product_id == product_id).map(|item| item.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }

    /// Same user and same set of lines, ignoring line order.
    pub fn same_contents(&self, other: &Cart) -> bool {
        self.user_id == other.user_id
            && self.items.len() == other.items.len()
            && self.items.iter().all(|item| other.quantity_of(&item.product_id) == Some(item.quantity))
    }
}

pub fn validate_user_id(user_id: &str) -> Result<(), ModelError> {
    if user_id.trim().is_empty() {
        return Err(ModelError::Validation("user_id must not be empty".into()));
    }
    Ok(())
}

pub fn validate_add_item(user_id: &str, product_id: &str, quantity: i32) -> Result<(), ModelError> {
    validate_user_id(user_id)?;
    if product_id.trim().is_empty() {
        return Err(ModelError::Validation("product_id must not be empty".into()));
    }
    if quantity <= 0 {
        return Err(ModelError::Validation(format!("quantity must be positive, got {quantity}")));
    }
    Ok(())
}
