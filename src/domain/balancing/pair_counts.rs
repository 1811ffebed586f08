//! Recent-teammate pair counting.
//!
//! Counts, per unordered pair of participant ids, how many of the most recent
//! matches put both on the same team. Rebuilt from scratch for every balancing
//! run.

use crate::domain::history::MatchRecord;
use crate::domain::participant::Side;
use std::collections::HashMap;

/// Default number of most recent matches considered.
pub const DEFAULT_LOOKBACK: usize = 3;

/// Unordered pair of participant ids. The smaller id is always stored first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub fn ids(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

/// Same-team co-occurrence counts. Only non-zero counts are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCounts {
    counts: HashMap<PairKey, u32>,
}

impl PairCounts {
    /// Builds counts from the first `lookback` records of a newest-first history.
    ///
    /// Records without participant ids contribute nothing.
    pub fn build(history: &[MatchRecord], lookback: usize) -> Self {
        let mut counts = PairCounts::default();
        for record in history.iter().take(lookback) {
            for side in [Side::A, Side::B] {
                if let Some(ids) = record.team_ids(side) {
                    counts.add_team(ids);
                }
            }
        }
        counts
    }

    fn add_team(&mut self, ids: &[String]) {
        for (i, a) in ids.iter().enumerate() {
            // Skip repeats of an id already seen earlier in this team.
            if ids[..i].contains(a) {
                continue;
            }
            for (j, b) in ids.iter().enumerate().skip(i + 1) {
                if a == b || ids[i + 1..j].contains(b) {
                    continue;
                }
                self.increment(a, b);
            }
        }
    }

    /// Adds one co-occurrence for the pair.
    pub fn increment(&mut self, a: &str, b: &str) {
        *self.counts.entry(PairKey::new(a, b)).or_insert(0) += 1;
    }

    /// Count for the pair, 0 if never seen together.
    pub fn get(&self, a: &str, b: &str) -> u32 {
        self.counts.get(&PairKey::new(a, b)).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Builds pair counts over the most recent `lookback` records.
pub fn build_pair_counts(history: &[MatchRecord], lookback: usize) -> PairCounts {
    PairCounts::build(history, lookback)
}
