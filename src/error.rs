// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by the keepalive statistics tracker.
//!
//! All variants here are programming errors from the caller's perspective —
//! none of them are recoverable by the tracker itself. Whenever one of these
//! is returned, the tracker's internal state is guaranteed unchanged.

use crate::registration::NetworkId;

/// All errors that can occur while driving the keepalive statistics tracker.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// The call was made from a thread other than the tracker's designated
    /// dispatcher thread.
    #[error("operation invoked off the tracker's dispatcher thread")]
    WrongContext,

    /// A `Start` event was raised against a `(network, slot)` pair that
    /// already has a live registration.
    #[error("slot {slot} on network {network:?} already has a live keepalive registration")]
    SlotInUse {
        /// The network the slot belongs to.
        network: NetworkId,
        /// The slot index within the network's namespace.
        slot: u32,
    },

    /// A `Pause`/`Resume`/`Stop` event was raised against a `(network, slot)`
    /// pair with no live registration.
    #[error("no live keepalive registration for slot {slot} on network {network:?}")]
    UnknownRegistration {
        /// The network the slot belongs to.
        network: NetworkId,
        /// The slot index within the network's namespace.
        slot: u32,
    },

    /// A `Pause` was raised against an already-paused record, or a `Resume`
    /// against an already-active one.
    #[error("illegal {transition} transition for slot {slot} on network {network:?}")]
    IllegalTransition {
        /// The network the slot belongs to.
        network: NetworkId,
        /// The slot index within the network's namespace.
        slot: u32,
        /// Which transition was rejected (`"pause"` or `"resume"`).
        transition: &'static str,
    },
}
