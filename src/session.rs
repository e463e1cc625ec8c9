//! Owned, in-memory copy of the workbook and its load/mutate/persist cycle.

use crate::error::{EngineError, Result};
use crate::model::TableSet;
use crate::scoring::upsert::{replace_segment_rows, ReplaceOutcome};
use crate::scoring::validation::{validate_segment_scores, ScoreEdit};
use crate::store::Store;
use tracing::debug;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Tables match what was last read from the store.
    Loaded,
    /// Tables have edits that have not been persisted.
    Modified,
    /// Tables match what was last written to the store.
    Committed,
}

/// A table set read from a store, owned by one caller.
///
/// Only the Scores table is ever mutated, and only through
/// [`Session::replace_segment_scores`]. Edits reach the store when
/// [`Session::commit`] succeeds; a failed commit leaves the session
/// `Modified` so the caller can retry or [`Session::reload`].
pub struct Session<S: Store> {
    store: S,
    tables: TableSet,
    state: SessionState,
}

impl<S: Store> Session<S> {
    pub fn load(store: S) -> Result<Self> {
        let tables = store.load_tables()?;
        Ok(Self {
            store,
            tables,
            state: SessionState::Loaded,
        })
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Replace the segment's score rows in memory with `edits`.
    ///
    /// The segment must exist and the edits must pass
    /// [`validate_segment_scores`] against this session's participants.
    /// Averages are derived here. On any error the tables are unchanged.
    pub fn replace_segment_scores(
        &mut self,
        segment_id: u32,
        edits: &[ScoreEdit],
    ) -> Result<ReplaceOutcome> {
        if self.tables.segment(segment_id).is_none() {
            return Err(EngineError::UnknownSegment(segment_id.to_string()));
        }
        let rows = validate_segment_scores(segment_id, edits, &self.tables.participants)?;
        let outcome = replace_segment_rows(&mut self.tables.scores, segment_id, rows);
        self.state = SessionState::Modified;
        Ok(outcome)
    }

    /// Write the whole table set back to the store.
    pub fn commit(&mut self) -> Result<()> {
        if self.state != SessionState::Modified {
            debug!(state = ?self.state, "nothing to commit");
            return Ok(());
        }
        self.store.persist_tables(&self.tables)?;
        self.state = SessionState::Committed;
        Ok(())
    }

    /// Discard in-memory state and read the store again.
    pub fn reload(&mut self) -> Result<()> {
        self.tables = self.store.load_tables()?;
        self.state = SessionState::Loaded;
        Ok(())
    }
}
