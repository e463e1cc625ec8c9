use super::{Store, EXPENSES, PARTICIPANTS, REVENUE, SCORES, SEGMENTS, TICKETS};
use crate::error::{EngineError, Result};
use crate::model::{ExpenseItem, Participant, RevenueItem, ScoreEntry, Segment, TableSet};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const WORKBOOK_VERSION: u32 = 1;

/// Workbook stored as a single JSON file.
///
/// Writes go through a temporary file that replaces the workbook only once
/// it has been fully written, so a failed save leaves the previous contents
/// in place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[derive(Serialize)]
struct WorkbookOut<'a> {
    version: u32,
    saved_at: DateTime<Utc>,
    tables: TablesOut<'a>,
}

#[derive(Serialize)]
struct TablesOut<'a> {
    #[serde(rename = "Participants")]
    participants: &'a [Participant],
    #[serde(rename = "Segments")]
    segments: &'a [Segment],
    #[serde(rename = "Scores")]
    scores: &'a [ScoreEntry],
    #[serde(rename = "Revenue")]
    revenue: &'a [RevenueItem],
    #[serde(rename = "Expenses")]
    expenses: &'a [ExpenseItem],
    #[serde(rename = "Tickets")]
    tickets: &'a [Map<String, Value>],
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn unavailable(&self, reason: impl ToString) -> EngineError {
        EngineError::StoreUnavailable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn write_failed(&self, reason: impl ToString) -> EngineError {
        EngineError::StoreWrite {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Store for JsonFileStore {
    fn load_tables(&self) -> Result<TableSet> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        let root: Value =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| self.unavailable(e))?;
        let tables = parse_workbook(root)?;
        debug!(
            path = %self.path.display(),
            participants = tables.participants.len(),
            segments = tables.segments.len(),
            scores = tables.scores.len(),
            "loaded workbook"
        );
        Ok(tables)
    }

    fn persist_tables(&self, tables: &TableSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
            }
        }

        let workbook = WorkbookOut {
            version: WORKBOOK_VERSION,
            saved_at: Utc::now(),
            tables: TablesOut {
                participants: &tables.participants,
                segments: &tables.segments,
                scores: &tables.scores,
                revenue: &tables.revenue,
                expenses: &tables.expenses,
                tickets: &tables.tickets,
            },
        };

        let mut file = AtomicWriteFile::open(&self.path).map_err(|e| self.write_failed(e))?;
        serde_json::to_writer_pretty(&mut file, &workbook).map_err(|e| self.write_failed(e))?;
        file.write_all(b"\n").map_err(|e| self.write_failed(e))?;
        file.commit().map_err(|e| self.write_failed(e))?;

        debug!(path = %self.path.display(), scores = tables.scores.len(), "persisted workbook");
        Ok(())
    }
}

/// Turn a decoded workbook document into tables, checking the version and
/// that every required table is present with the expected columns.
pub(crate) fn parse_workbook(root: Value) -> Result<TableSet> {
    let Value::Object(mut root) = root else {
        return Err(EngineError::Schema("workbook must be a JSON object".to_string()));
    };

    let version = root
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| EngineError::Schema("workbook has no version".to_string()))?;
    if version != u64::from(WORKBOOK_VERSION) {
        return Err(EngineError::Schema(format!(
            "unsupported workbook version: {}",
            version
        )));
    }

    let mut tables = match root.remove("tables") {
        Some(Value::Object(tables)) => tables,
        _ => return Err(EngineError::Schema("workbook has no tables".to_string())),
    };

    Ok(TableSet {
        participants: take_table(&mut tables, PARTICIPANTS)?,
        segments: take_table(&mut tables, SEGMENTS)?,
        scores: take_table(&mut tables, SCORES)?,
        revenue: take_table(&mut tables, REVENUE)?,
        expenses: take_table(&mut tables, EXPENSES)?,
        tickets: match tables.remove(TICKETS) {
            Some(value) => decode_table(value, TICKETS)?,
            None => Vec::new(),
        },
    })
}

fn take_table<T: DeserializeOwned>(tables: &mut Map<String, Value>, name: &str) -> Result<Vec<T>> {
    let value = tables
        .remove(name)
        .ok_or_else(|| EngineError::Schema(format!("missing table '{}'", name)))?;
    decode_table(value, name)
}

fn decode_table<T: DeserializeOwned>(value: Value, name: &str) -> Result<Vec<T>> {
    serde_json::from_value(value)
        .map_err(|e| EngineError::Schema(format!("table '{}': {}", name, e)))
}
