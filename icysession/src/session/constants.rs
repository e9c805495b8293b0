//! Constants for the playback session orchestration layer.
//!
//! These values govern how aggressively the session polls the status
//! endpoint and how its internal channels are sized.

use std::time::Duration;

// ============================================================================
// Polling Cadence
// ============================================================================

/// Fast polling interval (seconds)
///
/// Used whenever at least one observer is attached: somebody is looking at
/// a UI surface, so title/listener updates and URL changes should land
/// quickly.
///
/// Value: 3 seconds
pub const POLL_INTERVAL_FAST_SECS: u64 = 3;

/// Slow polling interval (seconds)
///
/// Used while no observer is attached. Playback may still be running
/// unattended, and the loop keeps polling at this cadence so a
/// server-side stream URL change is picked up eventually.
///
/// Value: 15 seconds
pub const POLL_INTERVAL_SLOW_SECS: u64 = 15;

/// Helper to get the fast polling interval as a Duration
pub fn fast_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_FAST_SECS)
}

/// Helper to get the slow polling interval as a Duration
pub fn slow_interval() -> Duration {
    Duration::from_secs(POLL_INTERVAL_SLOW_SECS)
}

// ============================================================================
// Channel Capacities
// ============================================================================

/// Capacity of the command channel between handles and the worker
pub const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Capacity of the backend event channel
pub const BACKEND_EVENT_CHANNEL_CAPACITY: usize = 32;
