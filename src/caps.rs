// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Network capability snapshot types.
//!
//! These are the values captured at `Start` time and never re-derived as
//! a registration's lifecycle continues.

use bitflags::bitflags;

/// Sentinel carrier id used when the carrier cannot be determined.
///
/// Forwarded verbatim by the tracker rather than rejected or defaulted away.
pub const CARRIER_ID_UNKNOWN: i32 = -1;

bitflags! {
    /// Transport types a keepalive's network may be carried over.
    ///
    /// Bit *i* set iff transport *i* is present in the capability set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct TransportType: u32 {
        /// Cellular transport.
        const CELLULAR = 1 << 0;
        /// Wi-Fi transport.
        const WIFI = 1 << 1;
        /// Bluetooth transport.
        const BLUETOOTH = 1 << 2;
        /// Ethernet transport.
        const ETHERNET = 1 << 3;
        /// VPN transport.
        const VPN = 1 << 4;
        /// Wi-Fi Aware transport.
        const WIFI_AWARE = 1 << 5;
        /// Low-power wide-area network transport.
        const LOWPAN = 1 << 6;
    }
}

/// Snapshot of a network's capabilities at the moment a keepalive starts.
#[derive(Debug, Clone)]
pub struct NetworkCapabilities {
    carrier_id: i32,
    transports: TransportType,
}

impl NetworkCapabilities {
    /// Creates a capability set with the unknown carrier id and no
    /// transports set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            carrier_id: CARRIER_ID_UNKNOWN,
            transports: TransportType::empty(),
        }
    }

    /// Sets the carrier id.
    #[must_use]
    pub fn with_carrier_id(mut self, carrier_id: i32) -> Self {
        self.carrier_id = carrier_id;
        self
    }

    /// Sets the transport set.
    #[must_use]
    pub fn with_transports(mut self, transports: TransportType) -> Self {
        self.transports = transports;
        self
    }

    /// The carrier id, or [`CARRIER_ID_UNKNOWN`] if not set.
    #[must_use]
    pub fn carrier_id(&self) -> i32 {
        self.carrier_id
    }

    /// The transport bitmask.
    #[must_use]
    pub fn transport_bitmask(&self) -> u32 {
        self.transports.bits()
    }
}

impl Default for NetworkCapabilities {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_unknown_carrier_and_no_transports() {
        let caps = NetworkCapabilities::new();
        assert_eq!(caps.carrier_id(), CARRIER_ID_UNKNOWN);
        assert_eq!(caps.transport_bitmask(), 0);
    }

    #[test]
    fn builder_sets_fields() {
        let caps = NetworkCapabilities::new()
            .with_carrier_id(42)
            .with_transports(TransportType::CELLULAR | TransportType::WIFI);
        assert_eq!(caps.carrier_id(), 42);
        assert_eq!(
            caps.transport_bitmask(),
            TransportType::CELLULAR.bits() | TransportType::WIFI.bits()
        );
    }
}
