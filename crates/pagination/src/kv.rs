use std::ops::Deref;


pub trait KvWrite {
    fn put(&mut self, key: &[u8], value: &[u8]) -> anyhow::Result<()>;
}


/// An ordered key-value range (a bucket) that can hand out cursors.
pub trait KvRead {
    type Cursor: KvReadCursor;

    fn get(&self, key: &[u8]) -> anyhow::Result<Option<impl Deref<Target=[u8]>>>;

    fn new_cursor(&self) -> Self::Cursor;
}


/// Positionable iterator over an ordered key-value range.
///
/// An exhausted cursor reports `is_valid() == false`. Slices returned by
/// [`key`](KvReadCursor::key) and [`value`](KvReadCursor::value) are only
/// valid until the next positioning call.
pub trait KvReadCursor {
    fn seek_first(&mut self) -> anyhow::Result<()>;

    fn seek_last(&mut self) -> anyhow::Result<()>;

    /// Position at the first key greater than or equal to `key`.
    fn seek(&mut self, key: &[u8]) -> anyhow::Result<()>;

    /// Position at the last key less than or equal to `key`.
    fn seek_prev(&mut self, key: &[u8]) -> anyhow::Result<()>;

    fn next(&mut self) -> anyhow::Result<()>;

    fn prev(&mut self) -> anyhow::Result<()>;

    fn is_valid(&self) -> bool;

    fn key(&self) -> &[u8];

    fn value(&self) -> &[u8];
}

