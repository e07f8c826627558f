//! Window layout and completion routing.
//!
//! ```text
//! ┌───────────────────────── status strip ─────────────────────────┐
//! ├──────────────────────────────────┬─────────────────────────────┤
//! │                                  │                             │
//! │   log viewport (500 px wide)     │   point-cloud plotter       │
//! │   newest line at the bottom      │   (400 × 400)               │
//! │                                  │                             │
//! └──────────────────────────────────┴─────────────────────────────┘
//! ```
//!
//! Each widget draws through a cropped view of the window, so its own
//! coordinates start at (0, 0). A cropped view only translates; the widgets
//! clip every draw to the view's bounds, which keeps them off a neighbour's
//! pixels.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use telemetry_common::TimeOfDay;
use telemetry_common::colors::BACKGROUND;
use telemetry_common::config::{LOG_SURFACE_WIDTH, PLOT_SURFACE_SIZE, STATUS_HEIGHT, WINDOW_WIDTH};
use telemetry_common::widgets::{PointCloudPlotter, ScrollViewport, StatusStrip, ViewportConfig};
use tracing::{debug, info, trace, warn};

use crate::backend::{Completion, Endpoint};
use crate::error::PayloadError;
use crate::payload::{parse_flag, parse_logs, parse_number, parse_scan};

/// Window regions, in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub status: Rectangle,
    pub log: Rectangle,
    pub plot: Rectangle,
}

impl Layout {
    /// Split a window of the given height. The plotter stays square and
    /// shrinks if the window is shorter than its nominal size.
    pub fn for_height(window_height: u32) -> Self {
        let body_top = STATUS_HEIGHT as i32;
        let body_height = window_height.saturating_sub(STATUS_HEIGHT);
        let plot_size = PLOT_SURFACE_SIZE.min(body_height);

        Self {
            status: Rectangle::new(Point::zero(), Size::new(WINDOW_WIDTH, STATUS_HEIGHT)),
            log: Rectangle::new(Point::new(0, body_top), Size::new(LOG_SURFACE_WIDTH, body_height)),
            plot: Rectangle::new(
                Point::new(LOG_SURFACE_WIDTH as i32, body_top),
                Size::new(plot_size, plot_size),
            ),
        }
    }

    pub const fn window_size(&self) -> Size {
        Size::new(WINDOW_WIDTH, self.status.size.height + self.log.size.height)
    }
}

/// All widgets plus the layout they are drawn into.
pub struct Dashboard {
    layout: Layout,
    status: StatusStrip,
    log: ScrollViewport,
    plotter: PointCloudPlotter,
}

impl Dashboard {
    /// Clear the window and draw the initial state. The log capacity is
    /// computed once here from the log region height.
    pub fn new<D>(
        display: &mut D,
        window_height: u32,
    ) -> Self
    where
        D: DrawTarget<Color = Rgb565>,
    {
        display.clear(BACKGROUND).ok();

        let layout = Layout::for_height(window_height);
        let log_config = ViewportConfig::bottom_anchored(layout.log.size.height);
        info!(
            window_height,
            log_lines = log_config.capacity,
            plot_size = layout.plot.size.width,
            "dashboard layout"
        );

        let log = ScrollViewport::new(&mut display.cropped(&layout.log), log_config);
        let mut dashboard = Self {
            layout,
            status: StatusStrip::new(),
            log,
            plotter: PointCloudPlotter::new(),
        };
        dashboard.draw_status(display);
        dashboard
    }

    #[inline]
    pub const fn status(&self) -> &StatusStrip { &self.status }

    #[inline]
    pub const fn log(&self) -> &ScrollViewport { &self.log }

    #[inline]
    pub const fn plotter(&self) -> &PointCloudPlotter { &self.plotter }

    /// Route a click in window coordinates. Returns the request to send, if any.
    pub fn on_click(
        &mut self,
        point: Point,
    ) -> Option<Endpoint> {
        if !self.layout.plot.contains(point) {
            return None;
        }
        if self.plotter.click() {
            info!("LIDAR activation requested");
            Some(Endpoint::LidarActivate)
        } else {
            trace!(?point, "plotter click ignored");
            None
        }
    }

    /// Apply one completed request. Returns a follow-up request, if any.
    ///
    /// Transport and payload failures are logged and leave the widget as it was.
    pub fn apply<D>(
        &mut self,
        display: &mut D,
        completion: Completion,
        time: TimeOfDay,
    ) -> Option<Endpoint>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Completion { endpoint, result } = completion;
        let body = match result {
            Ok(body) => body,
            Err(error) => {
                debug!(%endpoint, %error, "request failed, skipping update");
                return None;
            }
        };

        let follow_up = match self.route(display, endpoint, &body, time) {
            Ok(follow_up) => follow_up,
            Err(error) => {
                warn!(%endpoint, %error, "malformed payload dropped");
                None
            }
        };
        self.draw_status(display);
        follow_up
    }

    /// Redraw the status strip if a reading changed.
    pub fn draw_status<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.status.draw_if_dirty(&mut display.cropped(&self.layout.status));
    }

    fn route<D>(
        &mut self,
        display: &mut D,
        endpoint: Endpoint,
        body: &str,
        time: TimeOfDay,
    ) -> Result<Option<Endpoint>, PayloadError>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match endpoint {
            Endpoint::Battery => self.status.set_battery(parse_number(body)?),
            Endpoint::Charging => self.status.set_charging(parse_flag(body)?),
            Endpoint::Logging => {
                let messages = parse_logs(body)?;
                let mut region = display.cropped(&self.layout.log);
                for message in &messages {
                    let outcome = self.log.add_message(&mut region, message, time);
                    trace!(evicted = outcome.evicted, "log line appended");
                }
            }
            Endpoint::LidarActive => {
                let active = parse_flag(body)?;
                let transition = self
                    .plotter
                    .apply_activation(&mut display.cropped(&self.layout.plot), active);
                if let Some(state) = transition.entered {
                    info!(?state, "LIDAR state confirmed");
                }
                if self.plotter.wants_packet() {
                    return Ok(Some(Endpoint::LidarScan));
                }
            }
            Endpoint::LidarScan => {
                let scan = parse_scan(body)?;
                match self.plotter.apply_packet(&mut display.cropped(&self.layout.plot), &scan) {
                    Some(report) if report.is_no_data() => debug!("scan had no usable readings"),
                    Some(report) => trace!(points = report.points_drawn, span = report.scale_span, "scan drawn"),
                    None => debug!("scan arrived after LIDAR stopped, dropped"),
                }
            }
            Endpoint::LidarActivate => debug!("activation request acknowledged"),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;
    use telemetry_common::LidarActivation;
    use telemetry_common::config::{LOG_LINE_LEN, LOG_LINE_STEP};
    use telemetry_common::log::{BODY_LEN, SOURCE_LEN};

    use super::*;
    use crate::config::DEFAULT_WINDOW_HEIGHT;
    use crate::error::FetchError;

    const NOON: TimeOfDay = TimeOfDay::new(12, 0, 0);

    fn setup() -> (SimulatorDisplay<Rgb565>, Dashboard) {
        let layout = Layout::for_height(DEFAULT_WINDOW_HEIGHT);
        let mut display = SimulatorDisplay::new(layout.window_size());
        let dashboard = Dashboard::new(&mut display, DEFAULT_WINDOW_HEIGHT);
        (display, dashboard)
    }

    fn ok(
        endpoint: Endpoint,
        body: &str,
    ) -> Completion {
        Completion {
            endpoint,
            result: Ok(body.to_owned()),
        }
    }

    #[test]
    fn test_layout_regions_do_not_overlap() {
        let layout = Layout::for_height(DEFAULT_WINDOW_HEIGHT);
        assert!(layout.status.intersection(&layout.log).is_zero_sized());
        assert!(layout.status.intersection(&layout.plot).is_zero_sized());
        assert!(layout.log.intersection(&layout.plot).is_zero_sized());
        assert_eq!(layout.plot.size, Size::new(PLOT_SURFACE_SIZE, PLOT_SURFACE_SIZE));
        assert_eq!(layout.window_size(), Size::new(WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));
    }

    #[test]
    fn test_short_window_shrinks_plot() {
        let layout = Layout::for_height(200);
        assert_eq!(layout.plot.size, Size::new(200 - STATUS_HEIGHT, 200 - STATUS_HEIGHT));
    }

    #[test]
    fn test_log_capacity_from_height() {
        let (_, dashboard) = setup();
        let config = dashboard.log().config();
        let expected_span = config.anchor_baseline - config.eviction_baseline;
        assert_eq!(expected_span, LOG_LINE_STEP * (config.capacity as i32 - 1));
        assert!(dashboard.log().is_showing_placeholder());
    }

    #[test]
    fn test_scalars_update_status() {
        let (mut display, mut dashboard) = setup();
        assert_eq!(dashboard.apply(&mut display, ok(Endpoint::Battery, "42.0"), NOON), None);
        dashboard.apply(&mut display, ok(Endpoint::Charging, "1"), NOON);

        assert_eq!(dashboard.status().battery(), Some(42.0));
        assert_eq!(dashboard.status().charging(), Some(true));
        assert!(!dashboard.status().is_dirty(), "Strip redrawn after the update");
    }

    #[test]
    fn test_logs_append_in_order() {
        let (mut display, mut dashboard) = setup();
        let body = r#"[["INFO","a","one"],["WARNING","b","two"],["ERROR","c","three"]]"#;
        dashboard.apply(&mut display, ok(Endpoint::Logging, body), NOON);

        let lines: Vec<&str> = dashboard.log().iter().map(|l| l.text()).collect();
        assert_eq!(lines, ["[a@12:00:00] INFO: one", "[b@12:00:00] WARNING: two", "[c@12:00:00] ERROR: three"]);
        assert!(!dashboard.log().is_showing_placeholder());
    }

    #[test]
    fn test_failures_leave_widgets_untouched() {
        let (mut display, mut dashboard) = setup();
        dashboard.apply(&mut display, ok(Endpoint::Battery, "80"), NOON);

        dashboard.apply(&mut display, ok(Endpoint::Battery, "garbage"), NOON);
        assert_eq!(dashboard.status().battery(), Some(80.0), "Malformed body ignored");

        let failed = Completion {
            endpoint: Endpoint::Logging,
            result: Err(FetchError::Status {
                endpoint: Endpoint::Logging,
                status: 500,
            }),
        };
        assert_eq!(dashboard.apply(&mut display, failed, NOON), None);
        assert!(dashboard.log().is_empty(), "Transport failure skips the tick");
    }

    #[test]
    fn test_active_check_requests_scan() {
        let (mut display, mut dashboard) = setup();

        assert_eq!(dashboard.apply(&mut display, ok(Endpoint::LidarActive, "0"), NOON), None);
        assert_eq!(dashboard.plotter().activation().state(), Some(LidarActivation::Inactive));

        let next = dashboard.apply(&mut display, ok(Endpoint::LidarActive, "1"), NOON);
        assert_eq!(next, Some(Endpoint::LidarScan), "Scan fetched only after confirmation");

        dashboard.apply(&mut display, ok(Endpoint::LidarScan, r#"{"0":[1000,10,0],"90":[500,10,0]}"#), NOON);
        let frame = dashboard.plotter().last_frame().unwrap();
        assert_eq!(frame.points_drawn, 2);
        assert_eq!(frame.scale_span, 2000.0);
    }

    #[test]
    fn test_stale_scan_dropped_after_stop() {
        let (mut display, mut dashboard) = setup();
        dashboard.apply(&mut display, ok(Endpoint::LidarActive, "1"), NOON);
        dashboard.apply(&mut display, ok(Endpoint::LidarActive, "0"), NOON);

        dashboard.apply(&mut display, ok(Endpoint::LidarScan, r#"{"0":[1000,10,0]}"#), NOON);
        assert_eq!(dashboard.plotter().last_frame(), None, "Placeholder kept");
    }

    #[test]
    fn test_click_routing() {
        let (mut display, mut dashboard) = setup();
        let layout = Layout::for_height(DEFAULT_WINDOW_HEIGHT);
        let inside = layout.plot.center();
        let outside = layout.log.center();

        assert_eq!(dashboard.on_click(inside), None, "No handler before the first check");

        dashboard.apply(&mut display, ok(Endpoint::LidarActive, "0"), NOON);
        assert_eq!(dashboard.on_click(outside), None, "Clicks outside the plotter ignored");
        assert_eq!(dashboard.on_click(inside), Some(Endpoint::LidarActivate));
        assert_eq!(dashboard.on_click(inside), None, "Duplicate click suppressed while pending");

        dashboard.apply(&mut display, ok(Endpoint::LidarActive, "0"), NOON);
        assert_eq!(dashboard.on_click(inside), Some(Endpoint::LidarActivate), "Retry after an ignored request");
    }

    #[test]
    fn test_longest_log_line_stays_in_log_region() {
        let layout = Layout::for_height(DEFAULT_WINDOW_HEIGHT);
        let mut window = Recorder::new(layout.window_size());
        let mut dashboard = Dashboard::new(&mut window, DEFAULT_WINDOW_HEIGHT);
        window.writes.clear();

        let body = format!(r#"[["INFO","{}","{}"]]"#, "s".repeat(SOURCE_LEN), "x".repeat(BODY_LEN));
        dashboard.apply(&mut window, ok(Endpoint::Logging, &body), NOON);
        assert_eq!(dashboard.log().iter().last().map(|l| l.text().len()), Some(LOG_LINE_LEN));

        let filler = r#"[["INFO","a","short"]]"#;
        for _ in 0..dashboard.log().config().capacity {
            dashboard.apply(&mut window, ok(Endpoint::Logging, filler), NOON);
        }

        assert!(!window.writes.is_empty());
        for p in &window.writes {
            assert!(layout.log.contains(*p), "Log update wrote {p:?} outside the log region");
        }
    }

    #[test]
    fn test_scan_frames_stay_in_plot_region() {
        let layout = Layout::for_height(DEFAULT_WINDOW_HEIGHT);
        let mut window = Recorder::new(layout.window_size());
        let mut dashboard = Dashboard::new(&mut window, DEFAULT_WINDOW_HEIGHT);
        window.writes.clear();

        dashboard.apply(&mut window, ok(Endpoint::LidarActive, "0"), NOON);
        dashboard.apply(&mut window, ok(Endpoint::LidarActive, "1"), NOON);
        let sweep = r#"{"0":[1000,1,0],"90":[1000,1,0],"180":[1000,1,0],"270":[1000,1,0],"ROTATION_SPEED":5.0}"#;
        dashboard.apply(&mut window, ok(Endpoint::LidarScan, sweep), NOON);
        dashboard.apply(&mut window, ok(Endpoint::LidarScan, "{}"), NOON);

        assert_eq!(dashboard.plotter().last_frame().map(|f| f.points_drawn), Some(0));
        for p in &window.writes {
            assert!(layout.plot.contains(*p), "Plotter wrote {p:?} outside the plot region");
        }
    }

    /// Window-sized target that records every write, including ones a real
    /// display would drop past its edges.
    struct Recorder {
        size: Size,
        writes: Vec<Point>,
    }

    impl Recorder {
        fn new(size: Size) -> Self {
            Self {
                size,
                writes: Vec::new(),
            }
        }
    }

    impl OriginDimensions for Recorder {
        fn size(&self) -> Size { self.size }
    }

    impl DrawTarget for Recorder {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.writes.extend(pixels.into_iter().map(|Pixel(point, _)| point));
            Ok(())
        }
    }
}
