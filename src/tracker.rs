// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! The keepalive lifecycle state machine and its public hook surface.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::caps::NetworkCapabilities;
use crate::carrier::CarrierLifetimeTable;
use crate::clock::Clock;
use crate::context::DispatcherToken;
use crate::error::TrackerError;
use crate::histogram::DurationHistogram;
use crate::registration::{CarrierKey, NetworkId, Record, RegistrationKey, RegistrationTable};
use crate::report::{DailyReport, DurationPerNumOfKeepalive, KeepaliveLifetimePerCarrier};

/// Event-driven accounting engine for keepalive offload lifecycle metrics.
///
/// All mutating methods and the `build*` methods must be called from the
/// thread this tracker was constructed on; any other caller gets back
/// [`TrackerError::WrongContext`] before any state is touched.
#[derive(Debug)]
pub struct KeepaliveStatsTracker {
    clock: Arc<dyn Clock>,
    token: DispatcherToken,
    registrations: RegistrationTable,
    histogram: DurationHistogram,
    carriers: CarrierLifetimeTable,
}

impl KeepaliveStatsTracker {
    /// Creates a tracker bound to the calling thread.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_dispatcher_token(clock, DispatcherToken::current())
    }

    /// Creates a tracker bound to an explicit dispatcher token.
    ///
    /// Useful for tests that construct the tracker on one thread but want to
    /// assert `WrongContext` is returned from a different one, or that want
    /// to simulate the dispatcher thread without actually switching threads.
    #[must_use]
    pub fn with_dispatcher_token(clock: Arc<dyn Clock>, token: DispatcherToken) -> Self {
        let now = clock.now_ms();
        Self {
            histogram: DurationHistogram::new(now),
            clock,
            token,
            registrations: RegistrationTable::new(),
            carriers: CarrierLifetimeTable::new(),
        }
    }

    fn assert_on_context(&self) -> Result<(), TrackerError> {
        if self.token.is_current() {
            Ok(())
        } else {
            warn!("keepalive tracker invoked off its dispatcher thread");
            Err(TrackerError::WrongContext)
        }
    }

    fn n_registered(&self) -> usize {
        self.registrations.len()
    }

    fn n_active(&self) -> usize {
        self.registrations.active_count()
    }

    /// Registers a new keepalive.
    pub fn on_start_keepalive(
        &mut self,
        network: NetworkId,
        slot: u32,
        caps: &NetworkCapabilities,
        interval_seconds: u32,
    ) -> Result<(), TrackerError> {
        self.assert_on_context()?;
        let key = RegistrationKey { network, slot };

        if self.registrations.get(&key).is_some() {
            warn!(?network, slot, "keepalive slot already in use");
            return Err(TrackerError::SlotInUse { network, slot });
        }

        let now = self.clock.now_ms();
        self.histogram.accrue(now, self.n_registered(), self.n_active());

        let carrier_key = CarrierKey {
            carrier_id: caps.carrier_id(),
            transport_bitmask: caps.transport_bitmask(),
            interval_ms: u64::from(interval_seconds) * 1000,
        };
        let record = Record {
            carrier_key,
            started_at_ms: now,
            last_transition_ms: now,
            paused: false,
        };
        let inserted = self.registrations.insert(key, record);
        debug_assert!(inserted, "slot liveness was just checked above");
        debug!(?network, slot, now, "keepalive started");
        Ok(())
    }

    /// Pauses a live keepalive.
    pub fn on_pause_keepalive(
        &mut self,
        network: NetworkId,
        slot: u32,
    ) -> Result<(), TrackerError> {
        self.assert_on_context()?;
        let key = RegistrationKey { network, slot };

        match self.registrations.get(&key) {
            None => {
                warn!(?network, slot, "pause on unknown keepalive registration");
                return Err(TrackerError::UnknownRegistration { network, slot });
            }
            Some(record) if record.paused => {
                warn!(?network, slot, "pause on already-paused keepalive");
                return Err(TrackerError::IllegalTransition {
                    network,
                    slot,
                    transition: "pause",
                });
            }
            Some(_) => {}
        }

        let now = self.clock.now_ms();
        self.histogram.accrue(now, self.n_registered(), self.n_active());

        let record = self
            .registrations
            .get_mut(&key)
            .expect("liveness checked above");
        let delta = now.saturating_sub(record.last_transition_ms);
        let carrier_key = record.carrier_key;
        record.paused = true;
        record.last_transition_ms = now;

        self.carriers.add_registered(carrier_key, delta);
        self.carriers.add_active(carrier_key, delta);
        debug!(?network, slot, now, "keepalive paused");
        Ok(())
    }

    /// Resumes a paused keepalive.
    pub fn on_resume_keepalive(
        &mut self,
        network: NetworkId,
        slot: u32,
    ) -> Result<(), TrackerError> {
        self.assert_on_context()?;
        let key = RegistrationKey { network, slot };

        match self.registrations.get(&key) {
            None => {
                warn!(?network, slot, "resume on unknown keepalive registration");
                return Err(TrackerError::UnknownRegistration { network, slot });
            }
            Some(record) if !record.paused => {
                warn!(?network, slot, "resume on already-active keepalive");
                return Err(TrackerError::IllegalTransition {
                    network,
                    slot,
                    transition: "resume",
                });
            }
            Some(_) => {}
        }

        let now = self.clock.now_ms();
        self.histogram.accrue(now, self.n_registered(), self.n_active());

        let record = self
            .registrations
            .get_mut(&key)
            .expect("liveness checked above");
        let delta = now.saturating_sub(record.last_transition_ms);
        let carrier_key = record.carrier_key;
        record.paused = false;
        record.last_transition_ms = now;

        self.carriers.add_registered(carrier_key, delta);
        debug!(?network, slot, now, "keepalive resumed");
        Ok(())
    }

    /// Stops and removes a live keepalive.
    pub fn on_stop_keepalive(
        &mut self,
        network: NetworkId,
        slot: u32,
    ) -> Result<(), TrackerError> {
        self.assert_on_context()?;
        let key = RegistrationKey { network, slot };

        if self.registrations.get(&key).is_none() {
            warn!(?network, slot, "stop on unknown keepalive registration");
            return Err(TrackerError::UnknownRegistration { network, slot });
        }

        let now = self.clock.now_ms();
        self.histogram.accrue(now, self.n_registered(), self.n_active());

        let record = self
            .registrations
            .remove(&key)
            .expect("liveness checked above");
        let delta = now.saturating_sub(record.last_transition_ms);
        self.carriers.add_registered(record.carrier_key, delta);
        if !record.paused {
            self.carriers.add_active(record.carrier_key, delta);
        }
        debug!(?network, slot, now, "keepalive stopped");
        Ok(())
    }

    /// Snapshots the current accumulators into a report, without resetting
    /// them.
    pub fn build_keepalive_metrics(&mut self) -> Result<DailyReport, TrackerError> {
        self.assert_on_context()?;
        Ok(self.build_report(false))
    }

    /// Snapshots the current accumulators into a report, then resets the
    /// histogram and carrier tables while preserving live registrations.
    pub fn build_and_reset_metrics(&mut self) -> Result<DailyReport, TrackerError> {
        self.assert_on_context()?;
        let report = self.build_report(true);
        info!("keepalive metrics built and reset");
        Ok(report)
    }

    /// Shared implementation of `build`/`build_and_reset`.
    ///
    /// Folds the open tail of every live record into a *temporary* copy of
    /// the carrier table for reporting purposes, advancing each record's
    /// `last_transition_ms` to `now` so the fold is never double-counted by
    /// a subsequent build. The permanent carrier table is only mutated here
    /// if `reset` is requested, and then only by clearing it — per-record
    /// tails are folded into it permanently solely on Pause/Resume/Stop.
    fn build_report(&mut self, reset: bool) -> DailyReport {
        let now = self.clock.now_ms();
        self.histogram.accrue(now, self.n_registered(), self.n_active());

        let mut carrier_snapshot: std::collections::HashMap<CarrierKey, (u64, u64)> = self
            .carriers
            .snapshot()
            .into_iter()
            .map(|(k, v)| (k, (v.registered_ms, v.active_ms)))
            .collect();

        for (_, record) in self.registrations.iter_mut() {
            let tail = now.saturating_sub(record.last_transition_ms);
            let entry = carrier_snapshot.entry(record.carrier_key).or_default();
            entry.0 += tail;
            if !record.paused {
                entry.1 += tail;
            }
            record.last_transition_ms = now;
        }

        let (reg_dur, act_dur) = self.histogram.snapshot();
        let duration_per_num_of_keepalive = reg_dur
            .into_iter()
            .zip(act_dur)
            .enumerate()
            .map(
                |(k, (registered_ms, active_ms))| DurationPerNumOfKeepalive {
                    num_of_keepalive: k as u32,
                    keepalive_registered_durations_msec: registered_ms,
                    keepalive_active_durations_msec: active_ms,
                },
            )
            .collect();

        let keepalive_lifetime_per_carrier = carrier_snapshot
            .into_iter()
            .map(
                |(key, (registered_ms, active_ms))| KeepaliveLifetimePerCarrier {
                    carrier_id: key.carrier_id,
                    transport_types: key.transport_bitmask,
                    intervals_msec: key.interval_ms,
                    lifetime_msec: registered_ms,
                    active_lifetime_msec: active_ms,
                },
            )
            .collect();

        if reset {
            self.histogram.reset(now);
            self.carriers.reset();
        }

        DailyReport {
            duration_per_num_of_keepalive,
            keepalive_lifetime_per_carrier,
            keepalive_requests: None,
            automatic_keepalive_requests: None,
            distinct_user_count: None,
            uid_list: Vec::new(),
        }
    }
}
