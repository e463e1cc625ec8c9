use super::Store;
use crate::error::{EngineError, Result};
use crate::model::TableSet;
use std::path::PathBuf;
use std::sync::Mutex;

/// In-process store. Holds the last persisted table set; an empty store
/// behaves like a missing workbook.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Option<TableSet>>,
    fail_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(tables: TableSet) -> Self {
        Self {
            tables: Mutex::new(Some(tables)),
            fail_writes: Mutex::new(false),
        }
    }

    /// Make every subsequent `persist_tables` call fail with `StoreWrite`.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    /// Copy of the currently persisted tables, if any.
    pub fn snapshot(&self) -> Option<TableSet> {
        self.tables.lock().unwrap().clone()
    }
}

impl Store for MemoryStore {
    fn load_tables(&self) -> Result<TableSet> {
        self.tables
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| EngineError::StoreUnavailable {
                path: PathBuf::from("<memory>"),
                reason: "no tables have been stored".to_string(),
            })
    }

    fn persist_tables(&self, tables: &TableSet) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(EngineError::StoreWrite {
                path: PathBuf::from("<memory>"),
                reason: "writes disabled".to_string(),
            });
        }
        *self.tables.lock().unwrap() = Some(tables.clone());
        Ok(())
    }
}
