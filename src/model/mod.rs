pub mod types;

pub use types::{
    Category, ExpenseItem, Participant, RevenueItem, ScoreEntry, Segment, TableSet,
    TOTAL_EXPENSES, TOTAL_REVENUE,
};
