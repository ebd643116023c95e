use crate::db::db::{RocksDB, RocksSnapshot, RocksSnapshotIterator};
use crate::kv::KvRead;
use crate::pagination::{Pagination, Visit};
use anyhow::anyhow;
use rocksdb::{ColumnFamily, ReadOptions};
use std::ops::Deref;


/// Consistent point-in-time view of the database
pub struct ReadSnapshot<'a> {
    db: &'a RocksDB,
    snapshot: RocksSnapshot<'a>
}


impl <'a> ReadSnapshot<'a> {
    pub fn new(db: &'a RocksDB) -> Self {
        Self {
            db,
            snapshot: db.snapshot()
        }
    }

    pub fn bucket(&self, name: &str) -> anyhow::Result<SnapshotBucket<'_>> {
        let cf = self.db.cf_handle(name).ok_or_else(|| {
            anyhow!("bucket `{}` does not exist", name)
        })?;
        Ok(SnapshotBucket {
            snapshot: self,
            cf
        })
    }

    /// Runs a single page traversal over the given bucket
    pub fn paginate<F>(
        &self,
        bucket: &str,
        page: &mut Pagination,
        cb: F
    ) -> anyhow::Result<()>
    where
        F: FnMut(Vec<u8>, Vec<u8>) -> anyhow::Result<Visit>
    {
        let mut cursor = self.bucket(bucket)?.new_cursor();
        page.for_each(&mut cursor, cb)
    }

    fn new_options(&self) -> ReadOptions {
        let mut options = ReadOptions::default();
        options.set_snapshot(&self.snapshot);
        options
    }
}


pub struct SnapshotBucket<'a> {
    snapshot: &'a ReadSnapshot<'a>,
    cf: &'a ColumnFamily
}


impl <'a> KvRead for SnapshotBucket<'a> {
    type Cursor = RocksSnapshotIterator<'a>;

    fn get(&self, key: &[u8]) -> anyhow::Result<Option<impl Deref<Target=[u8]>>> {
        Ok(self.snapshot.db.get_pinned_cf_opt(
            self.cf,
            key,
            &self.snapshot.new_options()
        )?)
    }

    fn new_cursor(&self) -> Self::Cursor {
        self.snapshot.db.raw_iterator_cf_opt(
            self.cf,
            self.snapshot.new_options()
        )
    }
}
