//! Color constants for the telemetry dashboard.
//!
//! # Using Built-in `RgbColor` Trait Constants
//!
//! Where `embedded_graphics` already defines a color through the `RgbColor`
//! trait we use that constant instead of constructing `Rgb565::new(r, g, b)`.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! The robot's browser interface colors are converted by
//! scaling each 8-bit channel down to its 5/6-bit range.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black (0, 0, 0). Default log text color and status text.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Canvas background for every surface.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). `ERROR` log lines and low battery.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Full battery.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure blue (0, 0, 31). Point-cloud markers.
pub const BLUE: Rgb565 = Rgb565::BLUE;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Orange-red (#FF3300). `WARNING` log lines.
/// RGB565: (31, 12, 0).
pub const ORANGE_RED: Rgb565 = Rgb565::new(31, 12, 0);

/// Dark red (#800000). `FATAL` log lines.
/// RGB565: (16, 0, 0).
pub const DARK_RED: Rgb565 = Rgb565::new(16, 0, 0);

/// Muted olive (#A3A375). Placeholder text on empty surfaces.
/// RGB565: (20, 40, 14).
pub const OLIVE: Rgb565 = Rgb565::new(20, 40, 14);

/// Light gray for the plotter origin cross and status strip divider.
/// RGB565: (24, 48, 24) - roughly 75% brightness.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(24, 48, 24);

/// Background every widget erases to.
pub const BACKGROUND: Rgb565 = WHITE;
