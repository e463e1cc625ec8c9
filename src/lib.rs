pub mod config;
pub mod error;
pub mod finance;
pub mod leaderboard;
pub mod model;
pub mod output;
pub mod scoring;
pub mod session;
pub mod store;

pub use error::{EngineError, Result};
pub use session::{Session, SessionState};
pub use store::{JsonFileStore, MemoryStore, Store};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::{reconcile, NetOutcome};
    use crate::leaderboard::build_leaderboard;
    use crate::model::{Category, ExpenseItem, Participant, RevenueItem, Segment, TableSet};
    use crate::scoring::{save_segment_scores, ScoreEdit};

    fn workbook() -> TableSet {
        TableSet {
            participants: vec![
                Participant { contestant_no: 1, name: "Sam".to_string(), category: Category::Mr },
                Participant { contestant_no: 2, name: "Lee".to_string(), category: Category::Mr },
                Participant { contestant_no: 3, name: "Ada".to_string(), category: Category::Mrs },
                Participant { contestant_no: 4, name: "Kim".to_string(), category: "Other".into() },
            ],
            segments: vec![
                Segment { segment_id: 1, segment_name: "Talent".to_string() },
                Segment { segment_id: 2, segment_name: "Q&A".to_string() },
            ],
            revenue: vec![
                RevenueItem { source: "Total_Revenue".to_string(), amount: 1000.0 },
                RevenueItem { source: "Tickets".to_string(), amount: 700.0 },
                RevenueItem { source: "Sponsorship".to_string(), amount: 300.0 },
            ],
            expenses: vec![
                ExpenseItem { category: "Total_Expenses".to_string(), amount: 600.0 },
                ExpenseItem { category: "Venue".to_string(), amount: 400.0 },
                ExpenseItem { category: "Catering".to_string(), amount: 200.0 },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_scores_flow_from_save_to_leaderboard() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("workbook.json"));
        store.persist_tables(&workbook()).unwrap();

        save_segment_scores(
            &store,
            "Talent",
            &[
                ScoreEdit::new(1, [Some(7.0), Some(8.0), Some(9.0)]),
                ScoreEdit::new(2, [Some(9.0), Some(9.0), Some(9.0)]),
                ScoreEdit::new(3, [Some(5.0), None, None]),
                ScoreEdit::new(4, [Some(10.0), Some(10.0), Some(10.0)]),
            ],
        )
        .unwrap();
        save_segment_scores(
            &store,
            "Q&A",
            &[
                ScoreEdit::new(1, [Some(6.0), Some(6.0), Some(6.0)]),
                ScoreEdit::new(2, [Some(4.0), None, None]),
                ScoreEdit::new(3, [None, None, None]),
            ],
        )
        .unwrap();

        let board = build_leaderboard(&store.load_tables().unwrap());

        assert_eq!(board.mr.len(), 2);
        assert_eq!(board.mr[0].contestant_no, 1);
        assert_eq!(board.mr[0].cumulative_score, 14.0);
        assert_eq!(board.mr[0].rank, 1);
        assert_eq!(board.mr[1].contestant_no, 2);
        assert_eq!(board.mr[1].cumulative_score, 13.0);
        assert_eq!(board.mr[1].rank, 2);

        assert_eq!(board.mrs.len(), 1);
        assert_eq!(board.mrs[0].cumulative_score, 5.0);
        assert_eq!(board.excluded_rows, 1);
    }

    #[test]
    fn test_leaderboard_reflects_latest_save() {
        let store = MemoryStore::with_tables(workbook());
        save_segment_scores(&store, "1", &[ScoreEdit::new(1, [Some(8.0), None, None])]).unwrap();
        let before = build_leaderboard(&store.load_tables().unwrap());
        assert_eq!(before.mr[0].cumulative_score, 8.0);

        save_segment_scores(&store, "1", &[ScoreEdit::new(2, [Some(3.0), None, None])]).unwrap();
        let after = build_leaderboard(&store.load_tables().unwrap());
        assert_eq!(after.mr.len(), 1);
        assert_eq!(after.mr[0].contestant_no, 2);
    }

    #[test]
    fn test_finance_from_stored_workbook() {
        let store = MemoryStore::with_tables(workbook());
        let tables = store.load_tables().unwrap();
        let report = reconcile(&tables.revenue, &tables.expenses).unwrap();
        assert_eq!(report.net, NetOutcome::Profit(400.0));
    }
}
