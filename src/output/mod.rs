pub mod formatter;

pub use formatter::{
    division_title, format_finance, format_leaderboard, format_replace_outcome, format_segments,
    format_sheet, should_use_colors, Style,
};
