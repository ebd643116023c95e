//! In-memory ordered key-value store.
//!
//! Mostly useful for tests. The cursor keeps a single pair of key/value
//! buffers and overwrites them on every positioning call, the same way
//! cursors of embedded stores recycle their buffers.

use crate::kv::{KvRead, KvReadCursor, KvWrite};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::ops::Deref;


#[derive(Debug, Clone, Default)]
pub struct MemStore {
    map: BTreeMap<Vec<u8>, Vec<u8>>
}


impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn delete(&mut self, key: &[u8]) -> bool {
        self.map.remove(key).is_some()
    }

    pub fn cursor(&self) -> MemCursor<'_> {
        MemCursor::new(&self.map)
    }
}


impl <K: AsRef<[u8]>, V: AsRef<[u8]>> FromIterator<(K, V)> for MemStore {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let map = iter.into_iter()
            .map(|(k, v)| (k.as_ref().to_vec(), v.as_ref().to_vec()))
            .collect();
        Self {
            map
        }
    }
}


impl KvWrite for MemStore {
    fn put(&mut self, key: &[u8], value: &[u8]) -> anyhow::Result<()> {
        self.map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}


impl <'a> KvRead for &'a MemStore {
    type Cursor = MemCursor<'a>;

    fn get(&self, key: &[u8]) -> anyhow::Result<Option<impl Deref<Target=[u8]>>> {
        Ok(self.map.get(key).map(|value| value.as_slice()))
    }

    fn new_cursor(&self) -> Self::Cursor {
        let store: &'a MemStore = *self;
        store.cursor()
    }
}


pub struct MemCursor<'a> {
    map: &'a BTreeMap<Vec<u8>, Vec<u8>>,
    key: Vec<u8>,
    value: Vec<u8>,
    valid: bool
}


impl <'a> MemCursor<'a> {
    fn new(map: &'a BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            map,
            key: Vec::new(),
            value: Vec::new(),
            valid: false
        }
    }

    fn set_position(&mut self, entry: Option<(&'a Vec<u8>, &'a Vec<u8>)>) {
        self.key.clear();
        self.value.clear();
        if let Some((key, value)) = entry {
            self.key.extend_from_slice(key);
            self.value.extend_from_slice(value);
            self.valid = true;
        } else {
            self.valid = false;
        }
    }
}


impl <'a> KvReadCursor for MemCursor<'a> {
    fn seek_first(&mut self) -> anyhow::Result<()> {
        let map = self.map;
        self.set_position(map.iter().next());
        Ok(())
    }

    fn seek_last(&mut self) -> anyhow::Result<()> {
        let map = self.map;
        self.set_position(map.iter().next_back());
        Ok(())
    }

    fn seek(&mut self, key: &[u8]) -> anyhow::Result<()> {
        let map = self.map;
        let entry = map.range::<[u8], _>((Bound::Included(key), Bound::Unbounded)).next();
        self.set_position(entry);
        Ok(())
    }

    fn seek_prev(&mut self, key: &[u8]) -> anyhow::Result<()> {
        let map = self.map;
        let entry = map.range::<[u8], _>((Bound::Unbounded, Bound::Included(key))).next_back();
        self.set_position(entry);
        Ok(())
    }

    fn next(&mut self) -> anyhow::Result<()> {
        if !self.valid {
            return Ok(())
        }
        let map = self.map;
        let entry = map.range::<[u8], _>((Bound::Excluded(self.key.as_slice()), Bound::Unbounded)).next();
        self.set_position(entry);
        Ok(())
    }

    fn prev(&mut self) -> anyhow::Result<()> {
        if !self.valid {
            return Ok(())
        }
        let map = self.map;
        let entry = map.range::<[u8], _>((Bound::Unbounded, Bound::Excluded(self.key.as_slice()))).next_back();
        self.set_position(entry);
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn key(&self) -> &[u8] {
        &self.key
    }

    fn value(&self) -> &[u8] {
        &self.value
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemStore {
        ["b", "d", "f"].into_iter().map(|k| (k, k.to_uppercase())).collect()
    }

    #[test]
    fn seek_lands_on_next_key() {
        let store = store();
        let mut cursor = store.cursor();

        cursor.seek(b"c").unwrap();
        assert!(cursor.is_valid());
        assert_eq!(cursor.key(), b"d");
        assert_eq!(cursor.value(), b"D");

        cursor.seek(b"g").unwrap();
        assert!(!cursor.is_valid());
        assert_eq!(cursor.key(), b"");
    }

    #[test]
    fn seek_prev_lands_on_previous_key() {
        let store = store();
        let mut cursor = store.cursor();

        cursor.seek_prev(b"e").unwrap();
        assert_eq!(cursor.key(), b"d");

        cursor.seek_prev(b"a").unwrap();
        assert!(!cursor.is_valid());
    }

    #[test]
    fn walk_both_directions() {
        let store = store();
        let mut cursor = store.cursor();

        let mut keys = Vec::new();
        cursor.seek_first().unwrap();
        while cursor.is_valid() {
            keys.push(cursor.key().to_vec());
            cursor.next().unwrap();
        }
        assert_eq!(keys, vec![b"b".to_vec(), b"d".to_vec(), b"f".to_vec()]);

        keys.clear();
        cursor.seek_last().unwrap();
        while cursor.is_valid() {
            keys.push(cursor.key().to_vec());
            cursor.prev().unwrap();
        }
        assert_eq!(keys, vec![b"f".to_vec(), b"d".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let store = store();
        let mut cursor = store.cursor();
        cursor.seek_last().unwrap();
        cursor.next().unwrap();
        assert!(!cursor.is_valid());
        cursor.prev().unwrap();
        assert!(!cursor.is_valid());
    }

    #[test]
    fn put_and_delete() {
        let mut store = MemStore::new();
        assert!(store.is_empty());
        store.put(b"k", b"v1").unwrap();
        store.put(b"k", b"v2").unwrap();
        assert_eq!(store.len(), 1);

        let mut cursor = store.cursor();
        cursor.seek_first().unwrap();
        assert_eq!(cursor.value(), b"v2");

        assert!(store.delete(b"k"));
        assert!(!store.delete(b"k"));
        assert!(store.is_empty());
    }

    #[test]
    fn get_through_kv_read() {
        let store = store();
        let read = &store;
        assert_eq!(read.get(b"d").unwrap().as_deref(), Some(&b"D"[..]));
        assert!(read.get(b"c").unwrap().is_none());
    }
}
