use crate::model::{Category, Participant, TableSet};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Cumulative scores closer than this are treated as tied. Sums of values
/// entered in tenths can differ in the last binary digits depending on
/// the order they were added in.
pub const TIE_EPSILON: f64 = 1e-9;

/// A contestant's place on a division leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub contestant_no: u32,
    pub name: String,
    pub cumulative_score: f64,
    /// Dense rank, starting at 1.
    pub rank: u32,
    /// Number of segment entries that contributed to the total.
    pub segments_scored: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    pub mr: Vec<Standing>,
    pub mrs: Vec<Standing>,
    /// Score rows left out because their segment or contestant is unknown,
    /// or the contestant is not in a ranked division.
    pub excluded_rows: usize,
}

impl Leaderboard {
    pub fn standings(&self, category: &Category) -> &[Standing] {
        match category {
            Category::Mr => &self.mr,
            Category::Mrs => &self.mrs,
            Category::Unclassified(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mr.is_empty() && self.mrs.is_empty()
    }
}

struct Tally<'a> {
    participant: &'a Participant,
    total: f64,
    entries: usize,
}

/// Rank every contestant by the sum of their segment averages, per division.
///
/// Score rows are joined to Segments and then Participants; rows that match
/// neither are dropped, as are contestants outside Mr and Mrs. A missing
/// average contributes zero. Within a division standings are ordered by
/// rank, then by contestant number.
pub fn build_leaderboard(tables: &TableSet) -> Leaderboard {
    let segment_ids: HashSet<u32> = tables.segments.iter().map(|s| s.segment_id).collect();
    let mut participants: HashMap<u32, &Participant> = HashMap::new();
    for participant in &tables.participants {
        participants.entry(participant.contestant_no).or_insert(participant);
    }

    let mut tallies: BTreeMap<u32, Tally<'_>> = BTreeMap::new();
    let mut excluded_rows = 0;

    for score in &tables.scores {
        if !segment_ids.contains(&score.segment_id) {
            excluded_rows += 1;
            continue;
        }
        let Some(participant) = participants.get(&score.contestant_no).copied() else {
            excluded_rows += 1;
            continue;
        };
        if !participant.category.is_ranked() {
            excluded_rows += 1;
            continue;
        }

        let tally = tallies.entry(score.contestant_no).or_insert(Tally {
            participant,
            total: 0.0,
            entries: 0,
        });
        tally.total += score.contribution();
        tally.entries += 1;
    }

    if excluded_rows > 0 {
        debug!(excluded_rows, "score rows left out of the leaderboard");
    }

    let mut leaderboard = Leaderboard {
        excluded_rows,
        ..Default::default()
    };
    for category in Category::RANKED {
        let standings = rank_division(
            tallies
                .values()
                .filter(|t| t.participant.category == category),
        );
        match category {
            Category::Mr => leaderboard.mr = standings,
            Category::Mrs => leaderboard.mrs = standings,
            Category::Unclassified(_) => {}
        }
    }
    leaderboard
}

fn rank_division<'a, 'b: 'a>(tallies: impl Iterator<Item = &'a Tally<'b>>) -> Vec<Standing> {
    let mut standings: Vec<Standing> = tallies
        .map(|t| Standing {
            contestant_no: t.participant.contestant_no,
            name: t.participant.name.clone(),
            cumulative_score: t.total,
            rank: 0,
            segments_scored: t.entries,
        })
        .collect();

    // Primary: score descending. Tie-breaker: contestant number ascending.
    standings.sort_by(|a, b| {
        b.cumulative_score
            .partial_cmp(&a.cumulative_score)
            .unwrap_or(Ordering::Equal)
            .then(a.contestant_no.cmp(&b.contestant_no))
    });

    let scores: Vec<f64> = standings.iter().map(|s| s.cumulative_score).collect();
    for (standing, rank) in standings.iter_mut().zip(dense_ranks(&scores)) {
        standing.rank = rank;
    }

    // Near-equal totals may have sorted out of contestant order
    standings.sort_by(|a, b| a.rank.cmp(&b.rank).then(a.contestant_no.cmp(&b.contestant_no)));
    standings
}

/// Dense ranks for scores already sorted in descending order: ties share a
/// rank and the next distinct score gets the following rank.
///
/// A score ties with the first score of the current group, not with its
/// neighbour, so a run of near-equal values cannot chain into one tie.
pub fn dense_ranks(sorted_desc: &[f64]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted_desc.len());
    let mut rank = 0;
    let mut group_start: Option<f64> = None;

    for &score in sorted_desc {
        match group_start {
            Some(first) if (first - score).abs() <= TIE_EPSILON => {}
            _ => {
                rank += 1;
                group_start = Some(score);
            }
        }
        ranks.push(rank);
    }
    ranks
}
