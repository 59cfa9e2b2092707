// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Output schema produced by the report builder.

use serde::{Deserialize, Serialize};

/// One row of the duration-per-concurrency-count histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPerNumOfKeepalive {
    /// The concurrency level *k* this row describes.
    pub num_of_keepalive: u32,
    /// Milliseconds during which exactly `num_of_keepalive` keepalives were
    /// registered.
    pub keepalive_registered_durations_msec: u64,
    /// Milliseconds during which exactly `num_of_keepalive` keepalives were
    /// active (registered and not paused).
    pub keepalive_active_durations_msec: u64,
}

/// One row of the per-carrier lifetime aggregation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepaliveLifetimePerCarrier {
    /// Carrier id snapshotted at `Start` time, or the unknown-carrier
    /// sentinel.
    pub carrier_id: i32,
    /// Transport bitmask snapshotted at `Start` time.
    pub transport_types: u32,
    /// Keepalive interval, in milliseconds, snapshotted at `Start` time.
    pub intervals_msec: u64,
    /// Total registered lifetime, in milliseconds, summed across every
    /// keepalive that ever shared this key since the last reset.
    pub lifetime_msec: u64,
    /// Total active lifetime, in milliseconds, summed the same way.
    pub active_lifetime_msec: u64,
}

/// Daily keepalive statistics snapshot, suitable for telemetry upload.
///
/// `keepalive_requests`, `automatic_keepalive_requests`, and
/// `distinct_user_count` are reserved fields the core never populates;
/// `uid_list` is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DailyReport {
    /// Duration-per-concurrency-count rows, indexed `0..L-1`.
    pub duration_per_num_of_keepalive: Vec<DurationPerNumOfKeepalive>,
    /// Per-carrier lifetime rows, unordered.
    pub keepalive_lifetime_per_carrier: Vec<KeepaliveLifetimePerCarrier>,
    /// Reserved: count of user-initiated keepalive requests. Always `None`.
    pub keepalive_requests: Option<u32>,
    /// Reserved: count of automatic keepalive requests. Always `None`.
    pub automatic_keepalive_requests: Option<u32>,
    /// Reserved: count of distinct users. Always `None`.
    pub distinct_user_count: Option<u32>,
    /// Reserved: list of uids. Always empty.
    pub uid_list: Vec<i32>,
}
