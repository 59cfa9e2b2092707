// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Duration histogram.
//!
//! Two parallel, dense, growable accumulators indexed by the concurrent
//! registered/active count. Growth is on demand: the maximum concurrent
//! keepalive count in practice is small, so a dense `Vec` is preferable to
//! a sparse map.

/// Tracks, for every concurrency level *k*, the total milliseconds spent at
/// exactly that level since the last reset.
#[derive(Debug)]
pub struct DurationHistogram {
    reg_dur_ms: Vec<u64>,
    act_dur_ms: Vec<u64>,
    last_accrual_ms: u64,
}

impl DurationHistogram {
    /// Creates a histogram starting empty at `now`.
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self {
            reg_dur_ms: vec![0],
            act_dur_ms: vec![0],
            last_accrual_ms: now,
        }
    }

    /// Folds the elapsed time since the last accrual into the buckets for
    /// the *pre-event* concurrency levels `n_registered`/`n_active`, then
    /// advances the accrual clock to `now`.
    ///
    /// Must be called with the cursor values as they stood *before* the
    /// event being processed is applied.
    pub fn accrue(&mut self, now: u64, n_registered: usize, n_active: usize) {
        let delta = now.saturating_sub(self.last_accrual_ms);
        if delta > 0 {
            Self::add(&mut self.reg_dur_ms, n_registered, delta);
            Self::add(&mut self.act_dur_ms, n_active, delta);
        }
        self.last_accrual_ms = now;
    }

    fn add(buckets: &mut Vec<u64>, index: usize, delta: u64) {
        if index >= buckets.len() {
            buckets.resize(index + 1, 0);
        }
        buckets[index] += delta;
    }

    /// Returns `(registered, active)` buckets, padded with zeros to a common
    /// length.
    #[must_use]
    pub fn snapshot(&self) -> (Vec<u64>, Vec<u64>) {
        let len = self.reg_dur_ms.len().max(self.act_dur_ms.len());
        let mut reg = self.reg_dur_ms.clone();
        let mut act = self.act_dur_ms.clone();
        reg.resize(len, 0);
        act.resize(len, 0);
        (reg, act)
    }

    /// Zeros both accumulators and resets the accrual clock to `now`.
    ///
    /// Bucket widths (i.e. the largest concurrency level ever observed) are
    /// retained so a subsequent `accrue` at the current cursor values does
    /// not need to regrow the vectors.
    pub fn reset(&mut self, now: u64) {
        self.reg_dur_ms.iter_mut().for_each(|v| *v = 0);
        self.act_dur_ms.iter_mut().for_each(|v| *v = 0);
        self.last_accrual_ms = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_events_single_bucket() {
        let mut hist = DurationHistogram::new(0);
        hist.accrue(5000, 0, 0);
        let (reg, act) = hist.snapshot();
        assert_eq!(reg, vec![5000]);
        assert_eq!(act, vec![5000]);
    }

    #[test]
    fn growth_on_demand_pads_lower_indices_with_zero() {
        let mut hist = DurationHistogram::new(0);
        hist.accrue(1000, 0, 0);
        hist.accrue(5000, 1, 1);
        let (reg, act) = hist.snapshot();
        assert_eq!(reg, vec![1000, 4000]);
        assert_eq!(act, vec![1000, 4000]);
    }

    #[test]
    fn reset_retains_bucket_widths_and_zeros_values() {
        let mut hist = DurationHistogram::new(0);
        hist.accrue(1000, 0, 0);
        hist.accrue(5000, 2, 2);
        hist.reset(5000);
        let (reg, act) = hist.snapshot();
        assert_eq!(reg, vec![0, 0, 0]);
        assert_eq!(act, vec![0, 0, 0]);
    }

    #[test]
    fn two_successive_accruals_at_same_now_are_idempotent() {
        let mut hist = DurationHistogram::new(0);
        hist.accrue(1000, 0, 0);
        let first = hist.snapshot();
        hist.accrue(1000, 0, 0);
        let second = hist.snapshot();
        assert_eq!(first, second);
    }
}
