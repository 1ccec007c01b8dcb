//! `CohortTimers` — days-remaining histogram for one timed disease stage.
//!
//! # Why a histogram
//!
//! Individuals in a timed stage are interchangeable: only how many of them
//! have `k` days left matters.  Every entry enters with the same full stage
//! duration and loses exactly one day per simulated day, so the state fits in
//! a ring buffer of `duration` counters:
//!
//! ```text
//! slot (head + k - 1) % duration  =  individuals with k days remaining
//! ```
//!
//! Advancing a day pops the `k = 1` slot (those reach 0 and leave the stage)
//! and rotates `head`; the popped slot becomes the `k = duration` slot that
//! fresh entries are added to.  Both operations are O(1), versus an O(n)
//! filter over a list of per-individual counters.

/// Ring-buffer histogram of days remaining in a timed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortTimers {
    slots: Vec<u32>,
    head:  usize,
    /// Cached total for O(1) `len()`.
    total: u32,
}

impl CohortTimers {
    /// An empty cohort whose entries start with `duration` days remaining.
    ///
    /// `duration` must be at least 1 (checked by `StageDurations::validate`);
    /// a zero is treated as 1 so the buffer is never empty.
    pub fn new(duration: u32) -> Self {
        Self {
            slots: vec![0; duration.max(1) as usize],
            head:  0,
            total: 0,
        }
    }

    /// Full stage duration given to fresh entries.
    pub fn duration(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Add `n` fresh entries with the full stage duration remaining.
    #[inline]
    pub fn push_fresh(&mut self, n: u32) {
        if n == 0 {
            return;
        }
        let len = self.slots.len();
        let tail = (self.head + len - 1) % len;
        self.slots[tail] += n;
        self.total += n;
    }

    /// Decrement every timer by one day and remove those that reach zero.
    ///
    /// Returns the number of entries removed.
    #[inline]
    pub fn advance(&mut self) -> u32 {
        let done = std::mem::take(&mut self.slots[self.head]);
        self.head = (self.head + 1) % self.slots.len();
        self.total -= done;
        done
    }

    /// Number of entries currently in the stage.
    pub fn len(&self) -> u32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `counts[k - 1]` = entries with `k` days remaining, for `k` in
    /// `1..=duration`.
    pub fn remaining_counts(&self) -> Vec<u32> {
        let len = self.slots.len();
        (0..len).map(|k| self.slots[(self.head + k) % len]).collect()
    }
}
