pub mod json;
pub mod memory;

pub use json::{JsonFileStore, WORKBOOK_VERSION};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::TableSet;

/// Table names as they appear in the workbook.
pub const PARTICIPANTS: &str = "Participants";
pub const SEGMENTS: &str = "Segments";
pub const SCORES: &str = "Scores";
pub const REVENUE: &str = "Revenue";
pub const EXPENSES: &str = "Expenses";
pub const TICKETS: &str = "Tickets";

/// Backing storage for the competition workbook.
///
/// Loads and persists are whole-set: every table is read together and every
/// table is rewritten together. There is no table-scoped write. Concurrent
/// writers race and the last full write wins.
pub trait Store {
    /// Read every table. Fails with `StoreUnavailable` when the backing
    /// resource is missing or unreadable and `Schema` when a table or column
    /// is absent.
    fn load_tables(&self) -> Result<TableSet>;

    /// Replace the stored set with `tables`. On error nothing is committed.
    fn persist_tables(&self, tables: &TableSet) -> Result<()>;
}

impl<S: Store + ?Sized> Store for &S {
    fn load_tables(&self) -> Result<TableSet> {
        (**self).load_tables()
    }

    fn persist_tables(&self, tables: &TableSet) -> Result<()> {
        (**self).persist_tables(tables)
    }
}
