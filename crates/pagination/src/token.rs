//! Opaque page tokens.
//!
//! A token is the hex encoded borsh form of [`Pagination`] and is meant
//! to be handed to clients of a stateless service, which send it back
//! to request the next page. The anchor key is not part of the token,
//! so a decoded page only ever resumes from its own `last_key`.

use crate::pagination::Pagination;
use crate::util::borsh_serialize;
use anyhow::{ensure, Context};


pub const MAX_PAGE_TOKEN_LEN: usize = 8 * 1024;


pub fn encode_page_token(page: &Pagination) -> String {
    hex::encode(borsh_serialize(page))
}


pub fn decode_page_token(token: &str) -> anyhow::Result<Pagination> {
    let token = token.trim();
    ensure!(!token.is_empty(), "page token is empty");
    ensure!(
        token.len() <= MAX_PAGE_TOKEN_LEN,
        "page token exceeds max length: {} chars (max {})",
        token.len(),
        MAX_PAGE_TOKEN_LEN
    );
    let bytes = hex::decode(token).context("page token is not a valid hex string")?;
    let page = borsh::from_slice(&bytes).context("invalid page token")?;
    Ok(page)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Order;

    #[test]
    fn token_drops_anchor_key() {
        let page = Pagination::new(Some(b"anchor".to_vec()), 10, Order::Descending);
        let decoded = decode_page_token(&encode_page_token(&page)).unwrap();
        assert_eq!(decoded.anchor_key(), None);
        assert_eq!(decoded.limit, 10);
        assert_eq!(decoded.order, Order::Descending);
        assert!(decoded.exclude_first);
        assert_eq!(decoded.last_key, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode_page_token("").is_err());
        assert!(decode_page_token("   ").is_err());
        assert!(decode_page_token("xyz").is_err());
        assert!(decode_page_token("00").is_err());
        assert!(decode_page_token(&"0".repeat(MAX_PAGE_TOKEN_LEN + 2)).is_err());
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let page = Pagination::first_page(5, Order::Ascending);
        let token = format!("{}00", encode_page_token(&page));
        assert!(decode_page_token(&token).is_err());
    }
}
