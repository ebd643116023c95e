//! Resumable pagination over ordered key-value cursors.
//!
//! A [`Pagination`] describes one page request: where to start, in which
//! order to walk and how many records to accept. After
//! [`Pagination::for_each`] it remembers the key the traversal stopped at,
//! which seeds the next page via [`Pagination::next_page`].

pub mod db;
pub mod kv;
pub mod mem;
mod pagination;
mod token;
mod util;


pub use pagination::*;
pub use token::*;
