//! Timing constants and wall-clock helpers for the host.
//!
//! These use `std::time` and `chrono`, which the `no_std` core cannot, so they
//! live here rather than in `telemetry_common::config`.

use std::time::Duration;

use chrono::{Local, Timelike};
use telemetry_common::TimeOfDay;

/// Target frame time (~50 FPS). The main loop sleeps if the frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Simulated round-trip latency of the demo backend.
pub const DEMO_LATENCY: Duration = Duration::from_millis(30);

/// Time of day of any `chrono` timestamp, for stamping log lines.
pub fn time_of_day<T: Timelike>(now: &T) -> TimeOfDay {
    TimeOfDay::new(now.hour() as u8, now.minute() as u8, now.second() as u8)
}

/// Current local time of day.
pub fn local_time_of_day() -> TimeOfDay { time_of_day(&Local::now()) }
