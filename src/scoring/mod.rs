pub mod sheet;
pub mod upsert;
pub mod validation;

pub use sheet::{scoring_sheet, ScoringSheet, SheetRow};
pub use upsert::{save_segment_scores, ReplaceOutcome};
pub use validation::{average_score, check_judge_value, validate_segment_scores, ScoreEdit};
