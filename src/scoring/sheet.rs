use super::validation::ScoreEdit;
use crate::error::{EngineError, Result};
use crate::model::{Category, Segment, TableSet};

/// A participant alongside their current scores for one segment. Judge
/// values are empty when the participant has no entry yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub contestant_no: u32,
    pub name: String,
    pub judge_1: Option<f64>,
    pub judge_2: Option<f64>,
    pub judge_3: Option<f64>,
    pub average_score: Option<f64>,
}

impl SheetRow {
    pub fn judges(&self) -> [Option<f64>; 3] {
        [self.judge_1, self.judge_2, self.judge_3]
    }
}

/// The editable view of one segment, split by division.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSheet {
    pub segment: Segment,
    pub mr: Vec<SheetRow>,
    pub mrs: Vec<SheetRow>,
}

impl ScoringSheet {
    pub fn rows(&self, category: &Category) -> &[SheetRow] {
        match category {
            Category::Mr => &self.mr,
            Category::Mrs => &self.mrs,
            Category::Unclassified(_) => &[],
        }
    }

    /// Sheet contents as edits, Mr rows first. Saving these unchanged
    /// rewrites the segment with one row per ranked participant.
    pub fn to_edits(&self) -> Vec<ScoreEdit> {
        self.mr
            .iter()
            .chain(&self.mrs)
            .map(|row| ScoreEdit::new(row.contestant_no, row.judges()))
            .collect()
    }
}

/// Build the scoring sheet for a segment given by exact name or id.
///
/// Every Mr and Mrs participant appears once, in participant order, with
/// that segment's entry if one exists.
pub fn scoring_sheet(tables: &TableSet, segment_key: &str) -> Result<ScoringSheet> {
    let segment = tables
        .find_segment(segment_key)
        .cloned()
        .ok_or_else(|| EngineError::UnknownSegment(segment_key.to_string()))?;

    let mut sheet = ScoringSheet {
        segment,
        mr: Vec::new(),
        mrs: Vec::new(),
    };

    for participant in &tables.participants {
        let entry = tables
            .scores_for_segment(sheet.segment.segment_id)
            .find(|s| s.contestant_no == participant.contestant_no);
        let row = SheetRow {
            contestant_no: participant.contestant_no,
            name: participant.name.clone(),
            judge_1: entry.and_then(|e| e.judge_1),
            judge_2: entry.and_then(|e| e.judge_2),
            judge_3: entry.and_then(|e| e.judge_3),
            average_score: entry.and_then(|e| e.average_score),
        };
        match participant.category {
            Category::Mr => sheet.mr.push(row),
            Category::Mrs => sheet.mrs.push(row),
            Category::Unclassified(_) => {}
        }
    }

    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Participant, ScoreEntry};

    fn tables() -> TableSet {
        TableSet {
            participants: vec![
                Participant { contestant_no: 1, name: "Sam".to_string(), category: Category::Mr },
                Participant { contestant_no: 2, name: "Ada".to_string(), category: Category::Mrs },
                Participant { contestant_no: 3, name: "Kim".to_string(), category: "Other".into() },
                Participant { contestant_no: 4, name: "Lee".to_string(), category: Category::Mr },
            ],
            segments: vec![
                Segment { segment_id: 1, segment_name: "Talent".to_string() },
                Segment { segment_id: 2, segment_name: "Q&A".to_string() },
            ],
            scores: vec![
                ScoreEntry {
                    contestant_no: 4,
                    segment_id: 1,
                    judge_1: Some(6.0),
                    judge_2: Some(7.0),
                    judge_3: None,
                    average_score: Some(6.5),
                },
                ScoreEntry {
                    contestant_no: 1,
                    segment_id: 2,
                    judge_1: Some(9.0),
                    judge_2: None,
                    judge_3: None,
                    average_score: Some(9.0),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_sheet_left_joins_participants() {
        let sheet = scoring_sheet(&tables(), "Talent").unwrap();

        assert_eq!(sheet.segment.segment_id, 1);
        assert_eq!(sheet.mr.len(), 2);
        assert_eq!(sheet.mr[0].contestant_no, 1);
        assert_eq!(sheet.mr[0].average_score, None);
        assert_eq!(sheet.mr[1].judges(), [Some(6.0), Some(7.0), None]);
        assert_eq!(sheet.mrs.len(), 1);
        assert_eq!(sheet.mrs[0].name, "Ada");
    }

    #[test]
    fn test_sheet_skips_unclassified() {
        let sheet = scoring_sheet(&tables(), "1").unwrap();
        assert!(!sheet.mr.iter().chain(&sheet.mrs).any(|r| r.contestant_no == 3));
        assert!(sheet.rows(&Category::from("Other")).is_empty());
    }

    #[test]
    fn test_sheet_ignores_other_segments() {
        let sheet = scoring_sheet(&tables(), "1").unwrap();
        assert_eq!(sheet.rows(&Category::Mr)[0].judge_1, None);
    }

    #[test]
    fn test_unknown_segment() {
        let err = scoring_sheet(&tables(), "Swimwear").unwrap_err();
        assert!(matches!(err, EngineError::UnknownSegment(ref s) if s == "Swimwear"));
    }

    #[test]
    fn test_to_edits_orders_mr_first() {
        let edits = scoring_sheet(&tables(), "1").unwrap().to_edits();
        let order: Vec<u32> = edits.iter().map(|e| e.contestant_no).collect();
        assert_eq!(order, vec![1, 4, 2]);
        assert_eq!(edits[1].judges(), [Some(6.0), Some(7.0), None]);
    }
}
