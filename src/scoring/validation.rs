use crate::error::{EngineError, Judge, Result, ScoreIssue};
use crate::model::{Participant, ScoreEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MIN_JUDGE_SCORE: f64 = 0.0;
pub const MAX_JUDGE_SCORE: f64 = 10.0;

/// Scores are entered in tenths.
const STEPS_PER_POINT: f64 = 10.0;
const GRID_TOLERANCE: f64 = 1e-6;

/// One operator-edited row for a segment: a contestant and up to three
/// judge values. The average is never supplied; it is derived.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreEdit {
    pub contestant_no: u32,
    #[serde(default)]
    pub judge_1: Option<f64>,
    #[serde(default)]
    pub judge_2: Option<f64>,
    #[serde(default)]
    pub judge_3: Option<f64>,
}

impl ScoreEdit {
    pub fn new(contestant_no: u32, judges: [Option<f64>; 3]) -> Self {
        Self {
            contestant_no,
            judge_1: judges[0],
            judge_2: judges[1],
            judge_3: judges[2],
        }
    }

    pub fn judges(&self) -> [Option<f64>; 3] {
        [self.judge_1, self.judge_2, self.judge_3]
    }
}

/// Mean of the judge values that are present. `None` when none are.
pub fn average_score(judges: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = judges.iter().flatten().copied().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}

/// Check a single judge value: finite, within 0-10, on the 0.1 grid.
pub fn check_judge_value(contestant_no: u32, judge: Judge, value: f64) -> Option<ScoreIssue> {
    if !value.is_finite() {
        return Some(ScoreIssue::NotANumber { contestant_no, judge });
    }
    if !(MIN_JUDGE_SCORE..=MAX_JUDGE_SCORE).contains(&value) {
        return Some(ScoreIssue::OutOfRange { contestant_no, judge, value });
    }
    let steps = value * STEPS_PER_POINT;
    if (steps - steps.round()).abs() > GRID_TOLERANCE {
        return Some(ScoreIssue::OffGrid { contestant_no, judge, value });
    }
    None
}

/// Validate edited rows for one segment and derive each row's average.
///
/// Every row must name a known participant, at most once, and every judge
/// value present must pass [`check_judge_value`]. All problems are reported
/// together. Nothing is clamped or dropped: either every row is accepted or
/// the whole submission is rejected.
pub fn validate_segment_scores(
    segment_id: u32,
    edits: &[ScoreEdit],
    participants: &[Participant],
) -> Result<Vec<ScoreEntry>> {
    let known: HashSet<u32> = participants.iter().map(|p| p.contestant_no).collect();
    let mut seen = HashSet::new();
    let mut issues = Vec::new();

    for edit in edits {
        let contestant_no = edit.contestant_no;
        if !known.contains(&contestant_no) {
            issues.push(ScoreIssue::UnknownContestant { contestant_no });
        }
        if !seen.insert(contestant_no) {
            issues.push(ScoreIssue::DuplicateContestant { contestant_no });
        }
        for (judge, value) in Judge::ALL.into_iter().zip(edit.judges()) {
            if let Some(value) = value {
                issues.extend(check_judge_value(contestant_no, judge, value));
            }
        }
    }

    if !issues.is_empty() {
        return Err(EngineError::Validation { segment_id, issues });
    }

    Ok(edits
        .iter()
        .map(|edit| ScoreEntry {
            contestant_no: edit.contestant_no,
            segment_id,
            judge_1: edit.judge_1,
            judge_2: edit.judge_2,
            judge_3: edit.judge_3,
            average_score: average_score(&edit.judges()),
        })
        .collect())
}
