use crate::kv::KvReadCursor;
use rocksdb::{DBAccess, DBRawIteratorWithThreadMode};


impl <'a, D: DBAccess> KvReadCursor for DBRawIteratorWithThreadMode<'a, D> {
    fn seek_first(&mut self) -> anyhow::Result<()> {
        self.seek_to_first();
        self.status()?;
        Ok(())
    }

    fn seek_last(&mut self) -> anyhow::Result<()> {
        self.seek_to_last();
        self.status()?;
        Ok(())
    }

    fn seek(&mut self, key: &[u8]) -> anyhow::Result<()> {
        self.seek(key);
        self.status()?;
        Ok(())
    }

    fn seek_prev(&mut self, key: &[u8]) -> anyhow::Result<()> {
        self.seek_for_prev(key);
        self.status()?;
        Ok(())
    }

    fn next(&mut self) -> anyhow::Result<()> {
        self.next();
        self.status()?;
        Ok(())
    }

    fn prev(&mut self) -> anyhow::Result<()> {
        self.prev();
        self.status()?;
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.valid()
    }

    fn key(&self) -> &[u8] {
        self.key().unwrap_or_default()
    }

    fn value(&self) -> &[u8] {
        self.value().unwrap_or_default()
    }
}
