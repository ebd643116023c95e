#![allow(dead_code)]

use sqd_pagination::kv::KvReadCursor;
use sqd_pagination::mem::MemStore;
use sqd_pagination::{Pagination, Visit};


pub const LETTERS: [&str; 5] = ["a", "b", "c", "d", "e"];


pub fn letters_store() -> MemStore {
    LETTERS.iter().map(|k| (*k, format!("value-{}", k))).collect()
}


pub fn keys(records: &[(Vec<u8>, Vec<u8>)]) -> Vec<String> {
    records.iter()
        .map(|(k, _)| String::from_utf8(k.clone()).unwrap())
        .collect()
}


pub fn key(s: &str) -> Option<Vec<u8>> {
    Some(s.as_bytes().to_vec())
}


/// Runs the page and returns visited keys along with callback outcomes
pub fn trace_page<C, F>(
    page: &mut Pagination,
    cursor: &mut C,
    mut decide: F
) -> Vec<(Vec<u8>, Visit)>
where
    C: KvReadCursor,
    F: FnMut(&[u8]) -> Visit
{
    let mut visits = Vec::new();
    page.for_each(cursor, |key, _value| {
        let visit = decide(&key);
        visits.push((key, visit));
        Ok(visit)
    }).unwrap();
    visits
}
