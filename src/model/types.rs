use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved revenue row holding the authoritative total.
pub const TOTAL_REVENUE: &str = "Total_Revenue";

/// Reserved expense row holding the authoritative total.
pub const TOTAL_EXPENSES: &str = "Total_Expenses";

/// Competition division a participant is ranked in.
///
/// Anything other than `Mr` or `Mrs` lands in `Unclassified` and is kept
/// as-is so it round-trips through the store, but it never reaches a
/// leaderboard or a scoring sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Mr,
    Mrs,
    Unclassified(String),
}

impl Category {
    /// Divisions that are ranked, in display order.
    pub const RANKED: [Category; 2] = [Category::Mr, Category::Mrs];

    pub fn is_ranked(&self) -> bool {
        !matches!(self, Category::Unclassified(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Mr => "Mr",
            Category::Mrs => "Mrs",
            Category::Unclassified(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Mr" => Category::Mr,
            "Mrs" => Category::Mrs,
            _ => Category::Unclassified(raw),
        }
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        Category::from(raw.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Mr => "Mr".to_string(),
            Category::Mrs => "Mrs".to_string(),
            Category::Unclassified(raw) => raw,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "Contestant_No")]
    pub contestant_no: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Category")]
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "Segment_Id")]
    pub segment_id: u32,
    #[serde(rename = "Segment_Name")]
    pub segment_name: String,
}

/// One contestant's judged result for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(rename = "Contestant_No")]
    pub contestant_no: u32,
    #[serde(rename = "Segment_Id")]
    pub segment_id: u32,
    #[serde(rename = "Judge_1")]
    pub judge_1: Option<f64>,
    #[serde(rename = "Judge_2")]
    pub judge_2: Option<f64>,
    #[serde(rename = "Judge_3")]
    pub judge_3: Option<f64>,
    #[serde(rename = "Average_Score")]
    pub average_score: Option<f64>,
}

impl ScoreEntry {
    pub fn judges(&self) -> [Option<f64>; 3] {
        [self.judge_1, self.judge_2, self.judge_3]
    }

    /// Contribution of this entry to a cumulative total. A missing average
    /// counts as zero.
    pub fn contribution(&self) -> f64 {
        self.average_score.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueItem {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

/// The full set of tables the store loads and persists as one unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    pub participants: Vec<Participant>,
    pub segments: Vec<Segment>,
    pub scores: Vec<ScoreEntry>,
    pub revenue: Vec<RevenueItem>,
    pub expenses: Vec<ExpenseItem>,
    /// Ticket sales rows. No schema is defined for them; they are carried
    /// through untouched.
    pub tickets: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl TableSet {
    pub fn segment(&self, segment_id: u32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.segment_id == segment_id)
    }

    /// Look a segment up by its exact name or, failing that, by its id.
    pub fn find_segment(&self, key: &str) -> Option<&Segment> {
        let key = key.trim();
        self.segments
            .iter()
            .find(|s| s.segment_name == key)
            .or_else(|| key.parse::<u32>().ok().and_then(|id| self.segment(id)))
    }

    pub fn scores_for_segment(&self, segment_id: u32) -> impl Iterator<Item = &ScoreEntry> {
        self.scores.iter().filter(move |s| s.segment_id == segment_id)
    }
}
