//! Robot telemetry dashboard.
//!
//! Desktop window showing the robot's log stream, a live LIDAR point cloud and
//! its battery status. Rendering and widget state live in `telemetry_common`;
//! this binary owns the window, the background requests and the routing of
//! their results.
//!
//! # Threading
//!
//! All drawing and widget state changes happen on the main (window) thread.
//! Requests run on a small tokio runtime and report back over a channel that
//! the main loop drains once per frame, so completions are applied one at a
//! time, in arrival order.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod backend;
mod config;
mod dashboard;
mod demo;
mod error;
mod payload;
mod timing;

use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics_simulator::sdl2::MouseButton;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use telemetry_common::PollSchedule;
use tokio::runtime::{Handle, Runtime};
use tracing::{error, info};

use crate::backend::{Backend, Endpoint, HttpBackend, Poller};
use crate::config::HostConfig;
use crate::dashboard::{Dashboard, Layout};
use crate::demo::DemoBackend;
use crate::timing::{FRAME_TIME, local_time_of_day};

const WINDOW_TITLE: &str = "Robot Telemetry";
const WORKER_THREADS: usize = 2;

fn main() {
    tracing_subscriber::fmt::init();

    let config = match HostConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return;
        }
    };

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to start request runtime");
            return;
        }
    };

    match config.backend_url.as_deref() {
        Some(url) => match HttpBackend::new(url, config.request_timeout) {
            Ok(backend) => {
                info!(url, timeout_ms = config.request_timeout.as_millis() as u64, "using robot backend");
                run(&config, runtime.handle(), backend);
            }
            Err(e) => error!(error = %e, "failed to create HTTP backend"),
        },
        None => {
            info!("TELEMETRY_BACKEND_URL not set, using demo backend");
            run(&config, runtime.handle(), DemoBackend::new());
        }
    }
}

fn build_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(WORKER_THREADS)
        .thread_name("telemetry-io")
        .enable_all()
        .build()
}

fn run<B: Backend>(
    config: &HostConfig,
    runtime: &Handle,
    backend: B,
) {
    let layout = Layout::for_height(config.window_height);
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(layout.window_size());
    let output_settings = OutputSettingsBuilder::new().scale(config.window_scale).build();
    let mut window = Window::new(WINDOW_TITLE, &output_settings);

    let (tx, rx) = mpsc::channel();
    let poller = Poller::new(backend, runtime.clone(), tx);
    let mut dashboard = Dashboard::new(&mut display, config.window_height);
    let mut schedule = PollSchedule::new();
    let started = Instant::now();

    window.update(&display);

    loop {
        let frame_start = Instant::now();

        // Handle events
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => {
                    info!(
                        log_lines = dashboard.log().len(),
                        lidar = ?dashboard.plotter().activation().state(),
                        battery = ?dashboard.status().battery(),
                        "window closed"
                    );
                    return;
                }
                SimulatorEvent::MouseButtonUp {
                    mouse_btn: MouseButton::Left,
                    point,
                } => {
                    if let Some(endpoint) = dashboard.on_click(point) {
                        poller.request(endpoint);
                    }
                }
                _ => {}
            }
        }

        // Start whatever is due this frame
        let now_ms = started.elapsed().as_millis() as u64;
        for feed in schedule.due(now_ms) {
            poller.request(Endpoint::for_feed(feed));
        }

        // Apply finished requests
        let time = local_time_of_day();
        while let Ok(completion) = rx.try_recv() {
            if let Some(follow_up) = dashboard.apply(&mut display, completion, time) {
                poller.request(follow_up);
            }
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
    }
}
