use super::validation::ScoreEdit;
use crate::error::{EngineError, Result};
use crate::model::ScoreEntry;
use crate::session::Session;
use crate::store::Store;
use std::collections::HashSet;
use tracing::{info, warn};

/// What a segment replace did to the Scores table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub segment_id: u32,
    /// Rows for the segment that existed before the replace.
    pub removed: usize,
    /// Rows written for the segment.
    pub inserted: usize,
    /// Contestants that had a row for the segment and no longer do.
    pub dropped: Vec<u32>,
}

/// Replace every row of `segment_id` in `scores` with `rows`.
///
/// Rows belonging to other segments keep their order; the new rows are
/// appended, each stamped with `segment_id`. This is a full replace: a
/// contestant that had a row for the segment and is absent from `rows` ends
/// up with no row for it. Callers validate `rows` first.
pub(crate) fn replace_segment_rows(
    scores: &mut Vec<ScoreEntry>,
    segment_id: u32,
    rows: Vec<ScoreEntry>,
) -> ReplaceOutcome {
    let previous: Vec<u32> = scores
        .iter()
        .filter(|s| s.segment_id == segment_id)
        .map(|s| s.contestant_no)
        .collect();
    scores.retain(|s| s.segment_id != segment_id);

    let incoming: HashSet<u32> = rows.iter().map(|r| r.contestant_no).collect();
    let mut dropped: Vec<u32> = previous
        .iter()
        .copied()
        .filter(|c| !incoming.contains(c))
        .collect();
    dropped.sort_unstable();
    dropped.dedup();

    let inserted = rows.len();
    scores.extend(rows.into_iter().map(|mut row| {
        row.segment_id = segment_id;
        row
    }));

    ReplaceOutcome {
        segment_id,
        removed: previous.len(),
        inserted,
        dropped,
    }
}

/// Validate `edits` and save them as the complete score set of one segment.
///
/// `segment` is a segment name or id, resolved against the same fresh read
/// of the store that the save is applied to. The segment's rows are
/// replaced and the whole table set is written back. If validation or the
/// write fails, the stored workbook is left as it was.
pub fn save_segment_scores<S: Store>(
    store: S,
    segment: &str,
    edits: &[ScoreEdit],
) -> Result<ReplaceOutcome> {
    let mut session = Session::load(store)?;
    let segment_id = session
        .tables()
        .find_segment(segment)
        .map(|s| s.segment_id)
        .ok_or_else(|| EngineError::UnknownSegment(segment.to_string()))?;
    let outcome = session.replace_segment_scores(segment_id, edits)?;
    session.commit()?;

    if !outcome.dropped.is_empty() {
        warn!(
            segment_id,
            dropped = ?outcome.dropped,
            "contestants omitted from save no longer have scores for this segment"
        );
    }
    info!(
        segment_id,
        removed = outcome.removed,
        inserted = outcome.inserted,
        "saved segment scores"
    );
    Ok(outcome)
}
