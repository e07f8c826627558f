//! In-process stand-in for the robot web interface.
//!
//! Used when no backend URL is configured. Responses are deterministic and
//! exercise every widget:
//!
//! - battery follows a slow discharge/charge wave through both color
//!   thresholds, and the charging flag is set while it rises
//! - logs cycle through canned traffic at every severity
//! - the scan is a rectangular room seen by a slowly turning robot, with a few
//!   errored readings
//! - the LIDAR turns on when activation is posted and switches itself off
//!   again after a fixed number of active polls

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde_json::{Map, Value, json};

use crate::backend::{Backend, Endpoint};
use crate::error::FetchError;
use crate::timing::DEMO_LATENCY;

/// Active polls (at the LIDAR poll rate) before the demo sensor stops itself.
const ACTIVE_POLL_LIMIT: u32 = 40;

/// Half extents of the simulated room, in millimetres.
const ROOM_HALF_WIDTH: f32 = 2400.0;
const ROOM_HALF_DEPTH: f32 = 1600.0;

/// Heading change between consecutive sweeps, in degrees.
const TURN_PER_SWEEP: u32 = 3;

/// Every Nth angle reports a read error.
const ERROR_EVERY: u32 = 23;

const BATTERY_FREQ: f32 = 0.15;

const CANNED_LOGS: [(&str, &str, &str); 8] = [
    ("INFO", "starter", "Started program control."),
    ("INFO", "sensors", "LIDAR serial link open."),
    ("DEBUG", "navigation", "Replanning around obstacle."),
    ("WARNING", "safety", "Obstacle closer than 300 mm."),
    ("INFO", "control", "Heading 90 degrees."),
    ("ERROR", "motors", "Left wheel stalled, retrying."),
    ("WARNING", "robot_status", "Battery voltage sagging under load."),
    ("FATAL", "watchdog", "Control loop missed deadline."),
];

#[derive(Debug, Default)]
struct DemoState {
    battery_polls: u32,
    charging_polls: u32,
    log_polls: u32,
    log_cursor: usize,
    sweeps: u32,
    lidar_active: bool,
    active_polls: u32,
}

#[derive(Debug)]
pub struct DemoBackend {
    state: Mutex<DemoState>,
    latency: Duration,
}

impl DemoBackend {
    pub fn new() -> Self { Self::with_latency(DEMO_LATENCY) }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            state: Mutex::new(DemoState::default()),
            latency,
        }
    }

    fn respond(
        &self,
        endpoint: Endpoint,
    ) -> String {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match endpoint {
            Endpoint::Battery => {
                let t = state.battery_polls as f32;
                state.battery_polls += 1;
                format!("{:.1}", fake_signal(t, 10.0, 100.0, BATTERY_FREQ))
            }
            Endpoint::Charging => {
                let t = state.charging_polls as f32;
                state.charging_polls += 1;
                let rising = (t * BATTERY_FREQ).cos() > 0.0;
                flag(rising)
            }
            Endpoint::Logging => {
                // 0, 1 or 2 messages per poll
                let batch = (state.log_polls % 3) as usize;
                state.log_polls += 1;
                let mut entries = Vec::with_capacity(batch);
                for _ in 0..batch {
                    let (label, source, body) = CANNED_LOGS[state.log_cursor % CANNED_LOGS.len()];
                    state.log_cursor += 1;
                    entries.push(json!([label, source, body]));
                }
                Value::Array(entries).to_string()
            }
            Endpoint::LidarActive => {
                if state.lidar_active {
                    state.active_polls += 1;
                    if state.active_polls > ACTIVE_POLL_LIMIT {
                        state.lidar_active = false;
                    }
                }
                flag(state.lidar_active)
            }
            Endpoint::LidarActivate => {
                if !state.lidar_active {
                    state.lidar_active = true;
                    state.active_polls = 0;
                }
                String::new()
            }
            Endpoint::LidarScan => {
                let heading = (state.sweeps * TURN_PER_SWEEP) % 360;
                let speed = 5.0 + 0.1 * (state.sweeps % 5) as f32;
                state.sweeps += 1;
                room_sweep(heading, speed).to_string()
            }
        }
    }
}

impl Default for DemoBackend {
    fn default() -> Self { Self::new() }
}

impl Backend for DemoBackend {
    async fn request(
        &self,
        endpoint: Endpoint,
    ) -> Result<String, FetchError> {
        let body = self.respond(endpoint);
        tokio::time::sleep(self.latency).await;
        Ok(body)
    }
}

fn flag(value: bool) -> String { String::from(if value { "1" } else { "0" }) }

fn fake_signal(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

/// Distance from the room center to its wall along `angle_deg`.
fn wall_distance(angle_deg: f32) -> f32 {
    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let to_side = if cos.abs() > f32::EPSILON {
        ROOM_HALF_WIDTH / cos.abs()
    } else {
        f32::INFINITY
    };
    let to_end = if sin.abs() > f32::EPSILON {
        ROOM_HALF_DEPTH / sin.abs()
    } else {
        f32::INFINITY
    };
    to_side.min(to_end)
}

fn room_sweep(
    heading: u32,
    rotation_speed: f32,
) -> Value {
    let mut object = Map::new();
    for angle in 0..360u32 {
        let error = u32::from((angle + heading) % ERROR_EVERY == 0);
        let distance = wall_distance(((angle + heading) % 360) as f32).round();
        let intensity = (4000.0 / (1.0 + distance / 1000.0)).round();
        object.insert(angle.to_string(), json!([distance, intensity, error]));
    }
    object.insert("ROTATION_SPEED".to_owned(), json!(rotation_speed));
    Value::Object(object)
}
