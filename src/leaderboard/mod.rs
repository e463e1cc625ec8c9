pub mod ranker;

pub use ranker::{build_leaderboard, dense_ranks, Leaderboard, Standing, TIE_EPSILON};
