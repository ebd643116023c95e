use crate::kv::KvReadCursor;
use borsh::{BorshDeserialize, BorshSerialize};
use tracing::{debug, trace};


/// Record retrieval order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Order {
    Ascending,
    Descending
}


/// Outcome of a successful [`Pagination::for_each`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// The record counts against the page limit.
    Accept,
    /// The record was visited, but doesn't count against the page limit.
    Exclude
}


/// Serializable state of a single page request.
///
/// The anchor key a traversal starts from is never serialized.
/// A resumed page derives its anchor from the persisted `last_key`
/// via [`Pagination::next_page`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pagination {
    #[borsh(skip)]
    #[cfg_attr(feature = "serde", serde(skip))]
    anchor_key: Option<Vec<u8>>,
    /// Key under the cursor when the last traversal stopped,
    /// `None` if the cursor was exhausted or no traversal was made yet.
    pub last_key: Option<Vec<u8>>,
    /// Max number of accepted records
    pub limit: usize,
    /// Skip the record located by seeking to the anchor key
    pub exclude_first: bool,
    pub order: Order
}


impl Pagination {
    pub fn new(key: Option<Vec<u8>>, limit: usize, order: Order) -> Self {
        Self {
            anchor_key: key,
            last_key: None,
            limit,
            exclude_first: true,
            order
        }
    }

    pub fn first_page(limit: usize, order: Order) -> Self {
        Self::new(None, limit, order)
    }

    pub fn with_exclude_first(mut self, yes: bool) -> Self {
        self.exclude_first = yes;
        self
    }

    pub fn anchor_key(&self) -> Option<&[u8]> {
        self.anchor_key.as_deref()
    }

    /// Whether the last traversal stopped before the end of the range.
    ///
    /// A continuation of a page without `last_key` starts over
    /// from the range boundary.
    pub fn has_next_page(&self) -> bool {
        self.last_key.is_some()
    }

    /// Pagination anchored at `last_key` of this page.
    ///
    /// `last_key` is the first key the traversal didn't hand out, and the
    /// continuation skips it as well. Turn `exclude_first` off to get
    /// a continuation that starts exactly at that key.
    pub fn next_page(&self, limit: usize, order: Order) -> Self {
        Self {
            anchor_key: self.last_key.clone(),
            last_key: None,
            limit,
            exclude_first: true,
            order
        }
    }

    /// Walks the cursor from the anchor key in page order, handing out
    /// owned copies of at most `limit` accepted records to `cb`.
    ///
    /// Callback errors abort the traversal and are returned as is.
    /// In that case `last_key` points to the record the callback failed on.
    /// Cursor errors leave `last_key` unset.
    pub fn for_each<C, F>(&mut self, cursor: &mut C, mut cb: F) -> anyhow::Result<()>
    where
        C: KvReadCursor + ?Sized,
        F: FnMut(Vec<u8>, Vec<u8>) -> anyhow::Result<Visit>
    {
        let mut accepted: usize = 0;
        let mut visited: usize = 0;

        self.last_key = None;
        self.seek_to_first(cursor)?;

        while cursor.is_valid() && accepted < self.limit {
            let key = cursor.key().to_vec();
            let value = cursor.value().to_vec();
            visited += 1;
            match cb(key, value) {
                Ok(Visit::Accept) => accepted += 1,
                Ok(Visit::Exclude) => {},
                Err(err) => {
                    self.last_key = Some(cursor.key().to_vec());
                    return Err(err)
                }
            }
            self.advance(cursor)?;
        }

        self.last_key = if cursor.is_valid() {
            Some(cursor.key().to_vec())
        } else {
            None
        };

        debug!(
            visited,
            accepted,
            limit = self.limit,
            exhausted = self.last_key.is_none(),
            "page traversal finished"
        );

        Ok(())
    }

    /// Collects accepted records of the page
    pub fn collect<C>(&mut self, cursor: &mut C) -> anyhow::Result<Vec<(Vec<u8>, Vec<u8>)>>
    where
        C: KvReadCursor + ?Sized
    {
        let mut records = Vec::with_capacity(self.limit.min(1024));
        self.for_each(cursor, |key, value| {
            records.push((key, value));
            Ok(Visit::Accept)
        })?;
        Ok(records)
    }

    fn seek_to_first<C: KvReadCursor + ?Sized>(&self, cursor: &mut C) -> anyhow::Result<()> {
        let Some(anchor) = self.anchor_key.as_deref() else {
            trace!(order = ?self.order, "seeking to the range boundary");
            return match self.order {
                Order::Ascending => cursor.seek_first(),
                Order::Descending => cursor.seek_last()
            }
        };

        trace!(order = ?self.order, exclude_first = self.exclude_first, "seeking to the anchor key");
        cursor.seek(anchor)?;

        if !self.exclude_first {
            return Ok(())
        }

        match self.order {
            Order::Ascending => self.advance(cursor),
            // every key is below the anchor, the step back lands on the last one
            Order::Descending if !cursor.is_valid() => cursor.seek_last(),
            Order::Descending => self.advance(cursor)
        }
    }

    fn advance<C: KvReadCursor + ?Sized>(&self, cursor: &mut C) -> anyhow::Result<()> {
        if !cursor.is_valid() {
            return Ok(())
        }
        match self.order {
            Order::Ascending => cursor.next(),
            Order::Descending => cursor.prev()
        }
    }
}
