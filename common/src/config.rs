//! Layout and timing configuration constants.
//!
//! # Pre-computed Layout Constants
//!
//! Fixed surface sizes and spacings are `const`, so the drawing code never
//! repeats the arithmetic. Only the log canvas height is a runtime value: it is
//! derived once from the viewport size when the dashboard is constructed (see
//! [`crate::widgets::ViewportConfig::bottom_anchored`]).

// =============================================================================
// Log Viewport Configuration
// =============================================================================

/// Log canvas width in pixels.
pub const LOG_SURFACE_WIDTH: u32 = 500;

/// Vertical distance between two consecutive log lines (one scroll step).
pub const LOG_LINE_STEP: i32 = 18;

/// Distance from the anchored edge to the anchor baseline.
/// Leaves room for descenders below the newest line.
pub const LOG_ANCHOR_MARGIN: i32 = 9;

/// Upper bound on simultaneously visible log lines.
/// Sizes the element queue; tall canvases are capped at this many lines.
pub const LOG_MAX_LINES: usize = 64;

/// Maximum characters kept per formatted log line.
/// The canvas clips anything beyond its width, so longer lines are truncated.
pub const LOG_LINE_LEN: usize = 128;

/// Placeholder shown when the log viewport has nothing to display.
pub const LOG_PLACEHOLDER: &str = "No Messages.";

const _: () = assert!(LOG_LINE_STEP > 0);
const _: () = assert!(LOG_MAX_LINES > 1);

// =============================================================================
// Point-Cloud Plotter Configuration
// =============================================================================

/// Plotter canvas edge length in pixels (square surface).
pub const PLOT_SURFACE_SIZE: u32 = 400;

/// Radius of the filled marker drawn for each scan point.
pub const POINT_RADIUS: u32 = 2;

/// Half-length of the origin cross arms.
pub const ORIGIN_CROSS_ARM: i32 = 4;

/// Top-left anchor baseline of the scale annotation.
pub const SCALE_ANCHOR_X: i32 = 6;

/// Baseline of the scale annotation.
pub const SCALE_ANCHOR_Y: i32 = 14;

/// Placeholder shown while the LIDAR is inactive.
pub const PLOT_PLACEHOLDER: &str = "LIDAR off";

/// Second placeholder line telling the user how to activate the sensor.
pub const PLOT_PLACEHOLDER_HINT: &str = "Click to activate";

/// Number of angle slots in one scan sweep (one per degree).
pub const SCAN_ANGLES: usize = 360;

// =============================================================================
// Status Strip Configuration
// =============================================================================

/// Status strip height in pixels.
pub const STATUS_HEIGHT: u32 = 26;

// =============================================================================
// Window Layout
// =============================================================================

/// Window width: log canvas and plotter side by side.
pub const WINDOW_WIDTH: u32 = LOG_SURFACE_WIDTH + PLOT_SURFACE_SIZE;

/// Smallest window height that still fits the status strip and two log lines.
pub const MIN_WINDOW_HEIGHT: u32 = STATUS_HEIGHT + 2 * LOG_LINE_STEP as u32 + LOG_ANCHOR_MARGIN as u32;

// =============================================================================
// Polling Intervals
// =============================================================================

/// Battery level poll interval (slow-changing).
pub const BATTERY_POLL_MS: u32 = 10_000;

/// Charging flag poll interval (slow-changing).
pub const CHARGING_POLL_MS: u32 = 10_000;

/// Log message poll interval.
pub const LOG_POLL_MS: u32 = 1_000;

/// LIDAR activation check (and packet fetch while active) interval.
pub const LIDAR_POLL_MS: u32 = 500;

const _: () = assert!(LOG_POLL_MS <= BATTERY_POLL_MS);
const _: () = assert!(LIDAR_POLL_MS <= BATTERY_POLL_MS);
