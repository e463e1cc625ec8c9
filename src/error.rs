//! Error taxonomy for the scoring engine.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Judge input rejected before anything was persisted
    #[error("invalid scores for segment {segment_id}: {}", join_issues(.issues))]
    Validation {
        segment_id: u32,
        issues: Vec<ScoreIssue>,
    },

    /// A reserved subtotal row is absent
    #[error("reserved row '{0}' is missing")]
    MissingTotal(&'static str),

    /// Backing store missing or unreadable
    #[error("store unavailable at {}: {reason}", .path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    /// Backing store could not be written; nothing was committed
    #[error("failed to write store at {}: {reason}", .path.display())]
    StoreWrite { path: PathBuf, reason: String },

    /// Expected table or column missing from loaded data
    #[error("schema error: {0}")]
    Schema(String),

    /// Segment id or name not present in the Segments table
    #[error("unknown segment: {0}")]
    UnknownSegment(String),
}

/// Which of the three judge columns a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judge {
    First,
    Second,
    Third,
}

impl Judge {
    pub const ALL: [Judge; 3] = [Judge::First, Judge::Second, Judge::Third];

    pub fn column(self) -> &'static str {
        match self {
            Judge::First => "Judge_1",
            Judge::Second => "Judge_2",
            Judge::Third => "Judge_3",
        }
    }
}

/// A single problem found in a submitted row.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreIssue {
    OutOfRange {
        contestant_no: u32,
        judge: Judge,
        value: f64,
    },
    OffGrid {
        contestant_no: u32,
        judge: Judge,
        value: f64,
    },
    NotANumber {
        contestant_no: u32,
        judge: Judge,
    },
    UnknownContestant {
        contestant_no: u32,
    },
    DuplicateContestant {
        contestant_no: u32,
    },
}

impl fmt::Display for ScoreIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreIssue::OutOfRange { contestant_no, judge, value } => write!(
                f,
                "contestant {}: {} = {} is outside 0-10",
                contestant_no,
                judge.column(),
                value
            ),
            ScoreIssue::OffGrid { contestant_no, judge, value } => write!(
                f,
                "contestant {}: {} = {} is not a multiple of 0.1",
                contestant_no,
                judge.column(),
                value
            ),
            ScoreIssue::NotANumber { contestant_no, judge } => write!(
                f,
                "contestant {}: {} is not a number",
                contestant_no,
                judge.column()
            ),
            ScoreIssue::UnknownContestant { contestant_no } => {
                write!(f, "contestant {} is not a participant", contestant_no)
            }
            ScoreIssue::DuplicateContestant { contestant_no } => {
                write!(f, "contestant {} appears more than once", contestant_no)
            }
        }
    }
}

fn join_issues(issues: &[ScoreIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
