// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Counters accumulated across a solve. The solver increments them as it
//! runs; callers read them back through [`Statistics::get`] to see how
//! much work a solve did and whether any anomaly was hit.

use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Debug, Copy, Clone)]
#[repr(u8)]
pub enum Counters {
    /// Passes started (including the final non-improving one).
    Passes,
    /// Moves committed, before any rollback.
    MovesApplied,
    /// Moves undone by best-prefix rollback.
    MovesRolledBack,
    /// Candidates set aside by the balance check, counted per deferral.
    CandidatesDeferred,
    /// Locked cells popped from a bucket; each one aborts its pass.
    LockedCellAnomalies,
}

#[derive(Debug, Default)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Increment the specified counter by `n`.
    pub(crate) fn add(&mut self, counter: Counters, n: u64) {
        self.stats[counter as usize] += n;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}
