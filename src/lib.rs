// Copyright The OpenTelemetry Authors
// SPDX-License-Identifier: Apache-2.0

//! Event-driven accounting engine for TCP/UDP keepalive offload lifecycle
//! metrics.
//!
//! A [`tracker::KeepaliveStatsTracker`] is fed `Start`/`Pause`/`Resume`/`Stop`
//! hooks as a device's keepalive offloads come and go. Internally it
//! partitions wall-clock time by how many keepalives were concurrently
//! registered or active into a pair of duration histograms, and separately
//! aggregates each keepalive's lifetime into a table keyed by carrier,
//! transport set, and interval. Call [`tracker::KeepaliveStatsTracker::build_keepalive_metrics`]
//! or [`tracker::KeepaliveStatsTracker::build_and_reset_metrics`] to snapshot
//! that state into a [`report::DailyReport`] suitable for telemetry upload.
//!
//! The tracker is not thread-safe on purpose: it is meant to live on a
//! single, externally managed serial execution context (a dispatcher
//! thread, an event loop), and every public method asserts it is being
//! called from the thread it was constructed on.
//!
//! ```
//! use std::sync::Arc;
//! use keepalive_stats_tracker::{
//!     clock::SystemClock, caps::NetworkCapabilities, registration::NetworkId,
//!     tracker::KeepaliveStatsTracker,
//! };
//!
//! let mut tracker = KeepaliveStatsTracker::new(Arc::new(SystemClock::new()));
//! tracker
//!     .on_start_keepalive(NetworkId(1), 0, &NetworkCapabilities::new(), 10)
//!     .unwrap();
//! let report = tracker.build_keepalive_metrics().unwrap();
//! assert!(!report.duration_per_num_of_keepalive.is_empty());
//! ```

#![warn(missing_docs)]

pub mod caps;
pub mod carrier;
pub mod clock;
pub mod context;
pub mod error;
pub mod histogram;
pub mod registration;
pub mod report;
pub mod tracker;

pub use caps::{NetworkCapabilities, TransportType, CARRIER_ID_UNKNOWN};
pub use clock::{Clock, SystemClock};
pub use context::DispatcherToken;
pub use error::TrackerError;
pub use registration::NetworkId;
pub use report::{DailyReport, DurationPerNumOfKeepalive, KeepaliveLifetimePerCarrier};
pub use tracker::KeepaliveStatsTracker;
