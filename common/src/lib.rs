//! Rendering and state core for the robot telemetry dashboard.
//!
//! Platform-agnostic code shared by the desktop host and any other front end
//! that can provide an RGB565 draw target:
//!
//! - [`colors`]: RGB565 color constants
//! - [`config`]: Layout, spacing and polling constants
//! - [`styles`]: Pre-computed text styles and fonts
//! - [`thresholds`]: Battery color thresholds
//! - [`log`]: Log messages, severities and line formatting
//! - [`scan`]: One LIDAR sweep indexed by angle
//! - [`polar`]: Polar-to-pixel mapping for the point cloud
//! - [`activation`]: LIDAR activation state machine
//! - [`polling`]: Per-feed poll scheduling
//! - [`widgets`]: Log viewport, point-cloud plotter and status strip
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests. Fixed-capacity `heapless`
//! containers replace heap collections and time is always passed in by the
//! caller.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod activation;
pub mod colors;
pub mod config;
pub mod log;
pub mod polar;
pub mod polling;
pub mod scan;
pub mod styles;
pub mod thresholds;
pub mod widgets;

#[cfg(test)]
mod test_surface;

// Re-export commonly used items
pub use activation::{ActivationMachine, LidarActivation, Transition};
pub use log::{LogMessage, Severity, TimeOfDay};
pub use polling::{Feed, PollSchedule};
pub use scan::{RangeScan, ScanPoint};
