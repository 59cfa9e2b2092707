// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Keepalive identity table.

use std::collections::HashMap;

/// Opaque identity of a network, keyed by structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkId(pub u64);

/// Key identifying a live registration: a network and a slot within its
/// namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationKey {
    /// The network the slot belongs to.
    pub network: NetworkId,
    /// The slot index within the network's namespace.
    pub slot: u32,
}

/// Carrier key a record contributes its lifetime into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarrierKey {
    /// Carrier id snapshotted at `Start` time.
    pub carrier_id: i32,
    /// Transport bitmask snapshotted at `Start` time.
    pub transport_bitmask: u32,
    /// Interval, in milliseconds, snapshotted at `Start` time.
    pub interval_ms: u64,
}

/// A live keepalive registration.
#[derive(Debug, Clone)]
pub struct Record {
    /// The carrier key this record aggregates lifetime into.
    pub carrier_key: CarrierKey,
    /// Monotonic timestamp of the `Start` event.
    pub started_at_ms: u64,
    /// Timestamp of the most recent state transition affecting this record.
    pub last_transition_ms: u64,
    /// Whether the keepalive is currently paused.
    pub paused: bool,
}

/// Maps `(network, slot)` to the live registration record.
///
/// The key is unique among live records; a `Start` against a live key fails;
/// a `Start` against a key whose prior record was removed succeeds and
/// creates a fresh, independently aggregating record.
#[derive(Debug, Default)]
pub struct RegistrationTable {
    records: HashMap<RegistrationKey, Record>,
}

impl RegistrationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new record for `key`.
    ///
    /// Returns `false` without modifying the table if `key` already has a
    /// live record.
    #[must_use]
    pub fn insert(&mut self, key: RegistrationKey, record: Record) -> bool {
        if self.records.contains_key(&key) {
            return false;
        }
        let _ = self.records.insert(key, record);
        true
    }

    /// Returns the live record for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &RegistrationKey) -> Option<&Record> {
        self.records.get(key)
    }

    /// Returns a mutable reference to the live record for `key`, if any.
    #[must_use]
    pub fn get_mut(&mut self, key: &RegistrationKey) -> Option<&mut Record> {
        self.records.get_mut(key)
    }

    /// Removes and returns the live record for `key`, if any.
    pub fn remove(&mut self, key: &RegistrationKey) -> Option<Record> {
        self.records.remove(key)
    }

    /// Returns the number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no live records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of live records that are not paused.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.records.values().filter(|r| !r.paused).count()
    }

    /// Iterates over all live `(key, record)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&RegistrationKey, &Record)> {
        self.records.iter()
    }

    /// Iterates mutably over all live `(key, record)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&RegistrationKey, &mut Record)> {
        self.records.iter_mut()
    }
}
