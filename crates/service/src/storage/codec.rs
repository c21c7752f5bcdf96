//! Wire format of carts persisted in an external cache: UTF-8 JSON.

use models::Cart;

use crate::errors::CartStoreError;

pub fn encode_cart(cart: &Cart) -> Result<Vec<u8>, CartStoreError> {
    serde_json::to_vec(cart)
        .map_err(|e| CartStoreError::StorageUnavailable(format!("failed to encode cart: {e}")))
}

/// Decode a stored cart. Anything `Cart::add_item` could never have produced,
/// such as a non-positive quantity, is treated as corruption too.
pub fn decode_cart(bytes: &[u8]) -> Result<Cart, CartStoreError> {
    let cart: Cart = serde_json::from_slice(bytes)
        .map_err(|e| CartStoreError::DataCorruption(format!("stored cart is not decodable: {e}")))?;
    if let Some(item) = cart.items.iter().find(|item| item.quantity < 1) {
        return Err(CartStoreError::DataCorruption(format!(
            "stored cart has quantity {} for product {}",
            item.quantity, item.product_id
        )));
    }
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoded_cart_keeps_user_and_items() {
        let mut cart = Cart::with_item("u1", "soap", 5);
        cart.add_item("towel", 1);

        let decoded = decode_cart(&encode_cart(&cart).unwrap()).unwrap();
        assert!(decoded.same_contents(&cart));
    }

    #[test]
    fn encoding_is_stable() {
        let cart = Cart::with_item("u1", "soap", 2);
        let first = encode_cart(&cart).unwrap();
        let second = encode_cart(&decode_cart(&first).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            String::from_utf8(first).unwrap(),
            r#"{"user_id":"u1","items":[{"product_id":"soap","quantity":2}]}"#
        );
    }

    #[test]
    fn accepts_reordered_fields() {
        // Layout written by the server-side merge script
        let raw = br#"{"items":[{"quantity":3,"product_id":"soap"}],"user_id":"u1"}"#;
        let cart = decode_cart(raw).unwrap();
        assert_eq!(cart.quantity_of("soap"), Some(3));
    }

    #[test]
    fn garbage_is_data_corruption() {
        let err = decode_cart(b"\x08\x01garbage").unwrap_err();
        assert!(matches!(err, CartStoreError::DataCorruption(_)));
        assert_eq!(err.kind(), "data_corruption");
    }

    #[test]
    fn malformed_items_are_data_corruption() {
        for raw in [
            &br#"{"user_id":"u1","items":"oops"}"#[..],
            br#"{"user_id":"u1","items":null}"#,
            br#"{"user_id":"u1","items":[{"product_id":"soap","quantity":0}]}"#,
            br#"{"user_id":"u1","items":[{"product_id":"soap","quantity":1.5}]}"#,
            br#"{"items":[]}"#,
        ] {
            assert!(
                matches!(decode_cart(raw), Err(CartStoreError::DataCorruption(_))),
                "accepted {}",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn missing_items_decodes_as_empty() {
        let cart = decode_cart(br#"{"user_id":"u1"}"#).unwrap();
        assert!(cart.is_empty());
    }
}
