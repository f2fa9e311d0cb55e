//! Embedded redb backend - the production key-value store.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, TableDefinition};

use crate::kv::KvBackend;

const RECORDS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("records");

/// Key-value backend over a redb database file.
#[derive(Debug, Clone)]
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Open (or create) the database at `path` and initialize the records table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Arc::new(Database::create(path)?);
        let write_txn = db.begin_write()?;
        write_txn.open_table(RECORDS_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Wrap an already-open database handle.
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(RECORDS_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }
}

#[async_trait]
impl KvBackend for RedbBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;

        if let Some(value) = table.get(key)? {
            Ok(Some(value.value().to_string()))
        } else {
            Ok(None)
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
