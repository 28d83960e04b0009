//! Leaderboard of finished runs
//!
//! Every run that ends in the ship's death is numbered. Runs that scored
//! are ranked by score, with longer survival breaking ties, and the best
//! [`TABLE_SIZE`] are kept for the lifetime of the process.

use serde::{Deserialize, Serialize};

pub const TABLE_SIZE: usize = 10;

/// One finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// 1-based run number within this process
    pub run: u32,
    pub score: u64,
    /// Simulated seconds the ship survived
    pub survival_secs: f32,
}

impl RunRecord {
    /// Strictly better: more points, or as many points for longer
    fn outranks(&self, other: &RunRecord) -> bool {
        self.score > other.score
            || (self.score == other.score && self.survival_secs > other.survival_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HighScores {
    /// Best first
    runs: Vec<RunRecord>,
    /// Runs finished so far, ranked or not
    finished: u32,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    pub fn finished(&self) -> u32 {
        self.finished
    }

    pub fn best(&self) -> Option<&RunRecord> {
        self.runs.first()
    }

    /// Index a run would be inserted at, if it makes the table. Scoreless
    /// runs never do; a run equal to a ranked one goes below it.
    fn slot(&self, candidate: &RunRecord) -> Option<usize> {
        if candidate.score == 0 {
            return None;
        }
        let slot = self.runs.partition_point(|r| !candidate.outranks(r));
        (slot < TABLE_SIZE).then_some(slot)
    }

    /// Record a finished run. Returns its 1-based rank when it made the
    /// table.
    pub fn record(&mut self, score: u64, survival_secs: f32) -> Option<usize> {
        self.finished += 1;
        let run = RunRecord {
            run: self.finished,
            score,
            survival_secs,
        };
        let slot = self.slot(&run)?;
        self.runs.insert(slot, run);
        self.runs.truncate(TABLE_SIZE);
        log::info!(
            "Run {} ranked #{}: {} points in {:.1}s",
            run.run,
            slot + 1,
            score,
            survival_secs
        );
        Some(slot + 1)
    }
}
