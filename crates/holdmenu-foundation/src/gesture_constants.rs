//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels and milliseconds.

/// Movement in logical pixels after which a pending long press fails.
///
/// Matches the slop used by drag/scroll recognisers so a list can start
/// scrolling without a hold also firing.
pub const LONG_PRESS_SLOP: f32 = 8.0;

/// Default hold time before a long press is recognised.
pub const LONG_PRESS_TIMEOUT_MILLIS: u64 = 500;

/// Maximum distance between press and release for a tap.
///
/// A release farther than this from its press is a drag or scroll and must
/// not dismiss an open overlay.
pub const TAP_SLOP: f32 = 10.0;
