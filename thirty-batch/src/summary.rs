//! Aggregation of playout results
//!
//! Level 2 - Phase-level implementation
//!
//! A [`Summary`] is a commutative monoid over result records: building it
//! from any ordering or any split of the records and combining the pieces
//! gives the same histogram and average.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use thirty_core::{ResultRecord, DRAW_TAG};

/// Winner histogram and turn totals
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Games counted
    pub games: u64,
    /// Sum of turn counts
    pub total_turns: u64,
    /// Winner tag -> games won; draws are counted under [`DRAW_TAG`]
    pub histogram: FxHashMap<char, u64>,
}

/// One row of the winner table
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Standing {
    /// Winner tag, or '*' for draws
    pub tag: char,
    pub count: u64,
    /// Share of all games, 0-100
    pub percentage: f64,
}

impl Summary {
    /// Create empty summary
    pub fn empty() -> Self {
        Self::default()
    }

    /// Summarize records sequentially
    pub fn from_records(records: &[ResultRecord]) -> Self {
        records.iter().fold(Self::empty(), |mut summary, record| {
            summary.add(record);
            summary
        })
    }

    /// Summarize records with per-worker partial summaries merged at the end
    pub fn from_records_parallel(records: &[ResultRecord]) -> Self {
        records
            .par_iter()
            .fold(Self::empty, |mut summary, record| {
                summary.add(record);
                summary
            })
            .reduce(Self::empty, |a, b| a.combine(&b))
    }

    /// Count one record
    pub fn add(&mut self, record: &ResultRecord) {
        self.games += 1;
        self.total_turns += u64::from(record.turns);
        *self.histogram.entry(record.winner_tag()).or_insert(0) += 1;
    }

    /// Combine two summaries
    pub fn combine(&self, other: &Summary) -> Summary {
        let mut histogram = self.histogram.clone();
        for (&tag, &count) in &other.histogram {
            *histogram.entry(tag).or_insert(0) += count;
        }

        Summary {
            games: self.games + other.games,
            total_turns: self.total_turns + other.total_turns,
            histogram,
        }
    }

    /// Games won by `tag`
    pub fn wins(&self, tag: char) -> u64 {
        self.histogram.get(&tag).copied().unwrap_or(0)
    }

    /// Games that ended in a draw
    pub fn draws(&self) -> u64 {
        self.wins(DRAW_TAG)
    }

    /// Average game length in turns
    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }

    /// Histogram rows ordered by tag, draws last
    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .histogram
            .iter()
            .map(|(&tag, &count)| Standing {
                tag,
                count,
                percentage: if self.games == 0 {
                    0.0
                } else {
                    count as f64 / self.games as f64 * 100.0
                },
            })
            .collect();

        rows.sort_by_key(|row| (row.tag == DRAW_TAG, row.tag));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use thirty_core::Outcome;

    fn win(tag: char, turns: u32) -> ResultRecord {
        ResultRecord { turns, outcome: Outcome::Winner(tag) }
    }

    fn draw(turns: u32) -> ResultRecord {
        ResultRecord { turns, outcome: Outcome::Draw }
    }

    fn sample() -> Vec<ResultRecord> {
        vec![win('A', 10), win('B', 20), win('A', 30), draw(40), win('C', 12), draw(8)]
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::empty();
        assert_eq!(summary.games, 0);
        assert_eq!(summary.average_turns(), 0.0);
        assert!(summary.standings().is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let summary = Summary::from_records(&sample());
        assert_eq!(summary.games, 6);
        assert_eq!(summary.wins('A'), 2);
        assert_eq!(summary.wins('B'), 1);
        assert_eq!(summary.wins('D'), 0);
        assert_eq!(summary.draws(), 2);
        assert!((summary.average_turns() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_standings_order_and_percentages() {
        let rows = Summary::from_records(&sample()).standings();
        let tags: Vec<char> = rows.iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec!['A', 'B', 'C', '*']);
        assert!((rows[0].percentage - 100.0 / 3.0).abs() < 1e-9);
        let total: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_is_idempotent() {
        let records = sample();
        assert_eq!(Summary::from_records(&records), Summary::from_records(&records));
    }

    #[test]
    fn test_summary_order_independent() {
        let mut records = sample();
        let expected = Summary::from_records(&records);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..10 {
            records.shuffle(&mut rng);
            let shuffled = Summary::from_records(&records);
            assert_eq!(shuffled, expected);
            assert_eq!(shuffled.average_turns(), expected.average_turns());
        }
    }

    #[test]
    fn test_summary_combine_matches_whole() {
        let records = sample();
        let (left, right) = records.split_at(2);
        let combined = Summary::from_records(left).combine(&Summary::from_records(right));
        assert_eq!(combined, Summary::from_records(&records));
        assert_eq!(Summary::from_records_parallel(&records), combined);
    }
}
