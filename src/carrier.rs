// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Carrier lifetime table.

use crate::registration::CarrierKey;
use std::collections::HashMap;

/// Accumulated registered/active lifetime for one carrier key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarrierLifetime {
    /// Total registered milliseconds contributed under this key.
    pub registered_ms: u64,
    /// Total active milliseconds contributed under this key.
    pub active_ms: u64,
}

/// Maps `(carrier_id, transport_bitmask, interval_ms)` to accumulated
/// lifetime. Rows are created lazily on first contribution and never
/// removed.
#[derive(Debug, Default)]
pub struct CarrierLifetimeTable {
    rows: HashMap<CarrierKey, CarrierLifetime>,
}

impl CarrierLifetimeTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta_ms` to the registered-lifetime accumulator for `key`.
    pub fn add_registered(&mut self, key: CarrierKey, delta_ms: u64) {
        self.rows.entry(key).or_default().registered_ms += delta_ms;
    }

    /// Adds `delta_ms` to the active-lifetime accumulator for `key`.
    pub fn add_active(&mut self, key: CarrierKey, delta_ms: u64) {
        self.rows.entry(key).or_default().active_ms += delta_ms;
    }

    /// Returns all rows as `(key, lifetime)` pairs, in no particular order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(CarrierKey, CarrierLifetime)> {
        self.rows.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// Clears all rows.
    pub fn reset(&mut self) {
        self.rows.clear();
    }
}
