use crate::db::snapshot::ReadSnapshot;
use anyhow::{anyhow, ensure};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Options as RocksOptions};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;


pub(super) type RocksDB = rocksdb::OptimisticTransactionDB;
pub(super) type RocksSnapshot<'a> = rocksdb::SnapshotWithThreadMode<'a, RocksDB>;
pub(super) type RocksSnapshotIterator<'a> = rocksdb::DBRawIteratorWithThreadMode<'a, RocksDB>;


#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    cache_size: usize,
    block_size: usize,
    rocksdb_stats: bool,
    create_if_missing: bool,
    buckets: BTreeSet<String>
}


impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            cache_size: 256 * 1024 * 1024,
            block_size: 64 * 1024,
            rocksdb_stats: false,
            create_if_missing: true,
            buckets: BTreeSet::new()
        }
    }
}


impl DatabaseSettings {
    /// Block cache size in bytes
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// Size of a data block in bytes
    pub fn with_block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    pub fn with_rocksdb_stats(mut self, yes: bool) -> Self {
        self.rocksdb_stats = yes;
        self
    }

    /// When disabled, opening a non-existent database fails
    /// instead of creating an empty one
    pub fn with_create_if_missing(mut self, yes: bool) -> Self {
        self.create_if_missing = yes;
        self
    }

    /// Register a bucket (column family) to be created if it doesn't exist
    pub fn with_bucket(mut self, name: impl Into<String>) -> Self {
        self.buckets.insert(name.into());
        self
    }

    pub fn open(&self, path: impl AsRef<Path>) -> anyhow::Result<Database> {
        let path = path.as_ref();
        // every rocksdb database has a CURRENT file
        let exists = path.join("CURRENT").exists();

        ensure!(
            exists || self.create_if_missing,
            "database {} does not exist",
            path.display()
        );

        let mut options = RocksOptions::default();
        options.create_if_missing(self.create_if_missing);
        options.create_missing_column_families(true);
        options.set_wal_compression_type(rocksdb::DBCompressionType::Zstd);

        if self.rocksdb_stats {
            options.enable_statistics();
        }

        let cache = rocksdb::Cache::new_lru_cache(self.cache_size);
        let mut block_based_table_factory = rocksdb::BlockBasedOptions::default();
        block_based_table_factory.set_block_cache(&cache);
        block_based_table_factory.set_block_size(self.block_size);
        options.set_block_based_table_factory(&block_based_table_factory);

        // all existing column families must be opened
        let mut buckets = self.buckets.clone();
        if exists {
            buckets.extend(rocksdb::DB::list_cf(&options, path)?);
        }

        let db = RocksDB::open_cf_descriptors(
            &options,
            path,
            buckets.iter().map(|name| {
                ColumnFamilyDescriptor::new(name, RocksOptions::default())
            })
        )?;

        info!(
            path = %path.display(),
            buckets = buckets.len(),
            "opened database"
        );

        Ok(Database {
            db,
            options
        })
    }
}


pub struct Database {
    db: RocksDB,
    options: RocksOptions
}


impl Database {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        DatabaseSettings::default().open(path)
    }

    pub fn put(&self, bucket: &str, key: &[u8], value: &[u8]) -> anyhow::Result<()> {
        self.put_all(bucket, [(key, value)])
    }

    /// Writes all records in a single transaction
    pub fn put_all<K, V>(
        &self,
        bucket: &str,
        records: impl IntoIterator<Item = (K, V)>
    ) -> anyhow::Result<()>
    where
        K: AsRef<[u8]>,
        V: AsRef<[u8]>
    {
        let cf = self.cf_handle(bucket)?;
        let tx = self.db.transaction();
        for (key, value) in records {
            tx.put_cf(cf, key, value)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn delete(&self, bucket: &str, key: &[u8]) -> anyhow::Result<()> {
        let tx = self.db.transaction();
        tx.delete_cf(self.cf_handle(bucket)?, key)?;
        tx.commit()?;
        Ok(())
    }

    pub fn snapshot(&self) -> ReadSnapshot<'_> {
        ReadSnapshot::new(&self.db)
    }

    pub fn get_statistics(&self) -> Option<String> {
        self.options.get_statistics()
    }

    fn cf_handle(&self, name: &str) -> anyhow::Result<&ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            anyhow!("bucket `{}` does not exist", name)
        })
    }
}
