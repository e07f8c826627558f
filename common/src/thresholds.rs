//! Centralized threshold configuration for the status strip.
//!
//! All thresholds are compile-time constants with validation assertions, so a
//! misordered pair (e.g. `LOW >= FULL`) fails the build instead of producing a
//! confusing color at runtime.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{BLACK, GREEN, RED};

// =============================================================================
// Battery Level Thresholds (percent)
// =============================================================================

/// Battery level at or above which the reading is shown GREEN.
pub const BATTERY_FULL: f32 = 95.0;

/// Battery level at or below which the reading is shown RED.
pub const BATTERY_LOW: f32 = 20.0;

const _: () = assert!(BATTERY_LOW < BATTERY_FULL);

/// Color for a battery percentage.
///
/// GREEN when `>= BATTERY_FULL`, RED when `<= BATTERY_LOW`, BLACK otherwise.
#[inline]
pub fn battery_color(percent: f32) -> Rgb565 {
    if percent >= BATTERY_FULL {
        GREEN
    } else if is_low_battery(percent) {
        RED
    } else {
        BLACK
    }
}

/// Check if the battery level is low (at or below [`BATTERY_LOW`]).
#[inline]
pub fn is_low_battery(percent: f32) -> bool { percent <= BATTERY_LOW }

// =============================================================================
// Unit Tests
// =============================================================================
