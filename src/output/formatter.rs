use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::config::{DEFAULT_CURRENCY, DEFAULT_SCORE_DECIMALS};
use crate::finance::{ChartSlice, FinanceReport, LineItem, NetOutcome};
use crate::leaderboard::{Leaderboard, Standing};
use crate::model::{Category, Segment};
use crate::scoring::{ReplaceOutcome, ScoringSheet, SheetRow};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Display options shared by every formatter.
#[derive(Debug, Clone)]
pub struct Style {
    pub use_colors: bool,
    pub currency: String,
    pub score_decimals: usize,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            use_colors: false,
            currency: DEFAULT_CURRENCY.to_string(),
            score_decimals: DEFAULT_SCORE_DECIMALS,
        }
    }
}

impl Style {
    pub fn score(&self, value: f64) -> String {
        format!("{:.*}", self.score_decimals, value)
    }

    pub fn optional_score(&self, value: Option<f64>) -> String {
        value.map(|v| self.score(v)).unwrap_or_else(|| "-".to_string())
    }

    pub fn money(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency, amount)
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Heading used for a division.
pub fn division_title(category: &Category) -> String {
    format!("{} ASA", category)
}

fn medal(rank: u32) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

/// Format one standing as "{medal} {rank}. {name} — {score} ({n} segments)"
fn format_standing(standing: &Standing, style: &Style) -> String {
    let line = format!(
        "{}. {} — {} ({} segment{})",
        standing.rank,
        standing.name,
        style.score(standing.cumulative_score),
        standing.segments_scored,
        if standing.segments_scored == 1 { "" } else { "s" }
    );
    match medal(standing.rank) {
        Some(m) if style.use_colors => format!("{} {}", m, line.bold()),
        Some(m) => format!("{} {}", m, line),
        None => format!("   {}", line),
    }
}

/// Format both division leaderboards.
pub fn format_leaderboard(board: &Leaderboard, style: &Style) -> String {
    let mut sections = Vec::new();
    for category in Category::RANKED {
        let mut lines = vec![style.heading(&format!("{} Leaderboard", division_title(&category)))];
        let standings = board.standings(&category);
        if standings.is_empty() {
            lines.push("   No scores yet.".to_string());
        } else {
            lines.extend(standings.iter().map(|s| format_standing(s, style)));
        }
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

/// Format the segment list as "{id}  {name}".
pub fn format_segments(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "No segments defined.".to_string();
    }
    segments
        .iter()
        .map(|s| format!("{:>3}  {}", s.segment_id, s.segment_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_sheet_row(row: &SheetRow, style: &Style) -> String {
    format!(
        "{:>4}  {:<24} {:>6} {:>6} {:>6}   {:>6}",
        row.contestant_no,
        row.name,
        style.optional_score(row.judge_1),
        style.optional_score(row.judge_2),
        style.optional_score(row.judge_3),
        style.optional_score(row.average_score),
    )
}

/// Format the scoring sheet of one segment, one table per division.
pub fn format_sheet(sheet: &ScoringSheet, style: &Style) -> String {
    let mut sections = vec![style.heading(&format!(
        "Segment {}: {}",
        sheet.segment.segment_id, sheet.segment.segment_name
    ))];
    for category in Category::RANKED {
        let mut lines = vec![
            style.heading(&division_title(&category)),
            format!(
                "{:>4}  {:<24} {:>6} {:>6} {:>6}   {:>6}",
                "No", "Name", "J1", "J2", "J3", "Avg"
            ),
        ];
        let rows = sheet.rows(&category);
        if rows.is_empty() {
            lines.push("      (no participants)".to_string());
        } else {
            lines.extend(rows.iter().map(|r| format_sheet_row(r, style)));
        }
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

/// Summarize a segment save for the operator.
pub fn format_replace_outcome(outcome: &ReplaceOutcome, use_colors: bool) -> String {
    let mut out = format!(
        "Segment {}: replaced {} row(s) with {}.",
        outcome.segment_id, outcome.removed, outcome.inserted
    );
    if !outcome.dropped.is_empty() {
        let dropped = outcome
            .dropped
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let note = format!("No longer scored in this segment: {}", dropped);
        out.push('\n');
        if use_colors {
            out.push_str(&note.yellow().to_string());
        } else {
            out.push_str(&note);
        }
    }
    out
}

fn format_items(items: &[LineItem], style: &Style) -> Vec<String> {
    items
        .iter()
        .map(|i| format!("  {}: {}", i.label, style.money(i.amount)))
        .collect()
}

/// Flag a breakdown whose rows do not add up to the reserved total.
fn format_mismatch(total: f64, itemized: f64, style: &Style) -> Option<String> {
    if (total - itemized).abs() < 0.005 {
        return None;
    }
    let note = format!("  Itemized rows sum to {}", style.money(itemized));
    Some(if style.use_colors {
        note.yellow().to_string()
    } else {
        note
    })
}

fn format_chart(slices: &[ChartSlice]) -> Vec<String> {
    if slices.is_empty() {
        return vec!["  (nothing to chart)".to_string()];
    }
    slices
        .iter()
        .map(|s| format!("  {:<20} {:>5.1}%", s.label, s.percent))
        .collect()
}

/// Format the finance view: totals, itemized rows, chart shares, net result.
pub fn format_finance(report: &FinanceReport, style: &Style) -> String {
    let mut lines = vec![style.heading("Revenue")];
    lines.push(format!("  Total_Revenue: {}", style.money(report.total_revenue)));
    lines.extend(format_items(&report.revenue_items, style));
    lines.extend(format_mismatch(report.total_revenue, report.itemized_revenue(), style));
    lines.push("  Distribution:".to_string());
    lines.extend(format_chart(&report.revenue_chart()));

    lines.push(String::new());
    lines.push(style.heading("Expenses"));
    lines.push(format!("  Total_Expenses: {}", style.money(report.total_expenses)));
    lines.extend(format_items(&report.expense_items, style));
    lines.extend(format_mismatch(report.total_expenses, report.itemized_expenses(), style));
    lines.push("  Breakdown:".to_string());
    lines.extend(format_chart(&report.expense_chart()));

    lines.push(String::new());
    let net = format!("{}: {}", report.net.label(), style.money(report.net.magnitude()));
    lines.push(if style.use_colors {
        match report.net {
            NetOutcome::Profit(_) => net.green().bold().to_string(),
            NetOutcome::Loss(_) => net.red().bold().to_string(),
        }
    } else {
        net
    });
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::reconcile;
    use crate::model::{ExpenseItem, RevenueItem};

    fn standing(contestant_no: u32, name: &str, score: f64, rank: u32) -> Standing {
        Standing {
            contestant_no,
            name: name.to_string(),
            cumulative_score: score,
            rank,
            segments_scored: 2,
        }
    }

    #[test]
    fn test_leaderboard_medals_and_scores() {
        let board = Leaderboard {
            mr: vec![
                standing(1, "Sam", 18.3, 1),
                standing(2, "Lee", 15.0, 2),
                standing(3, "Max", 12.0, 3),
                standing(4, "Bo", 9.0, 4),
            ],
            mrs: Vec::new(),
            excluded_rows: 0,
        };
        let out = format_leaderboard(&board, &Style::default());

        assert!(out.contains("Mr ASA Leaderboard"));
        assert!(out.contains("🥇 1. Sam — 18.3 (2 segments)"));
        assert!(out.contains("🥉 3. Max — 12.0"));
        assert!(out.contains("   4. Bo — 9.0"));
        assert!(out.contains("Mrs ASA Leaderboard\n   No scores yet."));
    }

    #[test]
    fn test_finance_profit_and_loss_labels() {
        let report = reconcile(
            &[RevenueItem { source: "Total_Revenue".to_string(), amount: 100.0 }],
            &[ExpenseItem { category: "Total_Expenses".to_string(), amount: 150.5 }],
        )
        .unwrap();
        let out = format_finance(&report, &Style::default());
        assert!(out.contains("Net Loss: $50.50"));
        assert!(out.contains("(nothing to chart)"));
        assert!(out.contains("Itemized rows sum to $0.00"));
    }

    #[test]
    fn test_matching_items_not_flagged() {
        let report = reconcile(
            &[
                RevenueItem { source: "Total_Revenue".to_string(), amount: 50.0 },
                RevenueItem { source: "Tickets".to_string(), amount: 50.0 },
            ],
            &[
                ExpenseItem { category: "Total_Expenses".to_string(), amount: 20.0 },
                ExpenseItem { category: "Venue".to_string(), amount: 20.0 },
            ],
        )
        .unwrap();
        let out = format_finance(&report, &Style::default());
        assert!(!out.contains("Itemized rows sum to"));
    }

    #[test]
    fn test_default_style_follows_config_defaults() {
        let style = Style::default();
        assert_eq!(style.money(3.0), format!("{}3.00", DEFAULT_CURRENCY));
        assert_eq!(style.score(7.0), format!("{:.*}", DEFAULT_SCORE_DECIMALS, 7.0));
    }

    #[test]
    fn test_finance_chart_percent() {
        let report = reconcile(
            &[
                RevenueItem { source: "Total_Revenue".to_string(), amount: 1000.0 },
                RevenueItem { source: "Tickets".to_string(), amount: 700.0 },
                RevenueItem { source: "Sponsorship".to_string(), amount: 300.0 },
            ],
            &[ExpenseItem { category: "Total_Expenses".to_string(), amount: 600.0 }],
        )
        .unwrap();
        let out = format_finance(&report, &Style { currency: "€".to_string(), ..Style::default() });
        assert!(out.contains("Tickets: €700.00"));
        assert!(out.contains("70.0%"));
        assert!(out.contains("Net Profit: €400.00"));
    }

    #[test]
    fn test_replace_outcome_mentions_dropped() {
        let outcome = ReplaceOutcome {
            segment_id: 2,
            removed: 3,
            inserted: 2,
            dropped: vec![7],
        };
        let out = format_replace_outcome(&outcome, false);
        assert!(out.contains("replaced 3 row(s) with 2"));
        assert!(out.contains("No longer scored in this segment: 7"));
    }

    #[test]
    fn test_empty_segments() {
        assert_eq!(format_segments(&[]), "No segments defined.");
    }

    #[test]
    fn test_optional_score_dash() {
        let style = Style { score_decimals: 2, ..Style::default() };
        assert_eq!(style.optional_score(None), "-");
        assert_eq!(style.optional_score(Some(7.5)), "7.50");
    }
}
