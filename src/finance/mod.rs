pub mod reconcile;

pub use reconcile::{chart_slices, reconcile, ChartSlice, FinanceReport, LineItem, NetOutcome};
