//! LIDAR point-cloud plotter.
//!
//! While the sensor is inactive the surface shows a placeholder and a click asks
//! the backend to start the sensor. While active, each scan packet is drawn as a
//! point cloud normalized to the packet's own maximum distance, with a scale
//! annotation in the top-left corner.
//!
//! # Frame Layout
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ 4800 mm  5.1 Hz              │ ◄ scale annotation (2 × max distance)
//! │        .  . .                │
//! │     .          .             │
//! │    .     +      .            │ ◄ origin cross (robot position)
//! │     .          .             │
//! │        . .  .                │
//! └──────────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::activation::{ActivationMachine, LidarActivation, Transition};
use crate::colors::{BACKGROUND, BLUE, LIGHT_GRAY};
use crate::config::{
    ORIGIN_CROSS_ARM,
    PLOT_PLACEHOLDER,
    PLOT_PLACEHOLDER_HINT,
    POINT_RADIUS,
    SCALE_ANCHOR_X,
    SCALE_ANCHOR_Y,
};
use crate::polar::PolarMapping;
use crate::scan::RangeScan;
use crate::styles::{ANNOTATION_STYLE, CENTERED, HINT_STYLE, LEFT_ALIGNED, PLACEHOLDER_STYLE};

const SCALE_ANCHOR: Point = Point::new(SCALE_ANCHOR_X, SCALE_ANCHOR_Y);
const MARKER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLUE);
const CROSS_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(LIGHT_GRAY, 1);
const HINT_OFFSET: Point = Point::new(0, 22);

/// What one rendered packet contained.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameReport {
    /// Markers drawn.
    pub points_drawn: usize,
    /// Largest present distance (`None` for an empty scan).
    pub max_distance: Option<f32>,
    /// Value shown in the scale annotation (twice the max distance, or zero).
    pub scale_span: f32,
}

impl FrameReport {
    /// Whether the frame had nothing to normalize against.
    pub fn is_no_data(&self) -> bool { self.max_distance.is_none_or(|d| d <= 0.0) }
}

/// Draw a scan packet as a normalized point cloud.
///
/// Clears the surface, fits the largest present distance to half the
/// surface's shorter side less one marker radius, draws one filled marker per
/// reading and the scale annotation. Everything is clipped to the surface. A scan with no usable maximum (empty, or every distance zero)
/// draws only the annotation and reports a no-data frame.
pub fn render_packet<D>(
    display: &mut D,
    scan: &RangeScan,
) -> FrameReport
where
    D: DrawTarget<Color = Rgb565>,
{
    let area = display.bounding_box();
    let mut surface = display.clipped(&area);
    let display = &mut surface;
    display.clear(BACKGROUND).ok();

    let center = area.center();
    draw_origin_cross(display, center);

    let max_distance = scan.max_distance();
    // The outermost marker must fit whole
    let half_extent = (area.size.width.min(area.size.height) / 2).saturating_sub(POINT_RADIUS + 1) as f32;
    let mut report = FrameReport {
        points_drawn: 0,
        max_distance,
        scale_span: scan.scale_span(),
    };

    if let Some(mapping) = max_distance.and_then(|max| PolarMapping::fit(center, half_extent, max)) {
        let diameter = POINT_RADIUS * 2 + 1;
        for (angle, point) in scan.iter() {
            let pixel = mapping.to_pixel(angle as f32, point.distance);
            Circle::with_center(pixel, diameter)
                .into_styled(MARKER_STYLE)
                .draw(display)
                .ok();
            report.points_drawn += 1;
        }
    }

    draw_scale_annotation(display, report.scale_span, scan.rotation_speed);
    report
}

/// Clear the surface and draw the inactive-sensor placeholder.
pub fn draw_placeholder<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    let area = display.bounding_box();
    let mut surface = display.clipped(&area);
    let display = &mut surface;
    display.clear(BACKGROUND).ok();

    let center = area.center();
    Text::with_text_style(PLOT_PLACEHOLDER, center, PLACEHOLDER_STYLE, CENTERED)
        .draw(display)
        .ok();
    Text::with_text_style(PLOT_PLACEHOLDER_HINT, center + HINT_OFFSET, HINT_STYLE, CENTERED)
        .draw(display)
        .ok();
}

fn draw_origin_cross<D>(
    display: &mut D,
    center: Point,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(
        center - Point::new(ORIGIN_CROSS_ARM, 0),
        center + Point::new(ORIGIN_CROSS_ARM, 0),
    )
    .into_styled(CROSS_STYLE)
    .draw(display)
    .ok();
    Line::new(
        center - Point::new(0, ORIGIN_CROSS_ARM),
        center + Point::new(0, ORIGIN_CROSS_ARM),
    )
    .into_styled(CROSS_STYLE)
    .draw(display)
    .ok();
}

/// Format the annotation: `"<span> mm"`, plus the rotation speed when known.
pub fn scale_annotation(
    scale_span: f32,
    rotation_speed: Option<f32>,
) -> String<32> {
    let mut label: String<32> = String::new();
    let _ = write!(label, "{scale_span:.0} mm");
    if let Some(speed) = rotation_speed {
        let _ = write!(label, "  {speed:.1} Hz");
    }
    label
}

fn draw_scale_annotation<D>(
    display: &mut D,
    scale_span: f32,
    rotation_speed: Option<f32>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let label = scale_annotation(scale_span, rotation_speed);
    Text::with_text_style(&label, SCALE_ANCHOR, ANNOTATION_STYLE, LEFT_ALIGNED)
        .draw(display)
        .ok();
}

/// Plotter widget: activation state plus rendering.
#[derive(Debug, Default)]
pub struct PointCloudPlotter {
    activation: ActivationMachine,
    last_frame: Option<FrameReport>,
}

impl PointCloudPlotter {
    /// Create a plotter in the unknown state. Nothing is drawn until the first
    /// activation check.
    pub const fn new() -> Self {
        Self {
            activation: ActivationMachine::new(),
            last_frame: None,
        }
    }

    /// Activation state machine (read-only).
    #[inline]
    pub const fn activation(&self) -> &ActivationMachine { &self.activation }

    /// Report for the most recently rendered packet.
    #[inline]
    pub const fn last_frame(&self) -> Option<FrameReport> { self.last_frame }

    /// Whether the next tick should also fetch a scan packet.
    #[inline]
    pub fn wants_packet(&self) -> bool { self.activation.is_active() }

    /// Apply an activation check result.
    ///
    /// Entering `Inactive` draws the placeholder. Entering `Active` clears it,
    /// leaving an empty surface until the first packet arrives.
    pub fn apply_activation<D>(
        &mut self,
        display: &mut D,
        active: bool,
    ) -> Transition
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let transition = self.activation.confirm(active);
        match transition.entered {
            Some(LidarActivation::Inactive) => {
                self.last_frame = None;
                draw_placeholder(display);
            }
            Some(LidarActivation::Active) => {
                display.clear(BACKGROUND).ok();
            }
            None => {}
        }
        transition
    }

    /// Render a packet if the sensor is confirmed active.
    ///
    /// Packets that arrive after the sensor was confirmed inactive are
    /// dropped, so the placeholder is never overwritten by a stale sweep.
    pub fn apply_packet<D>(
        &mut self,
        display: &mut D,
        scan: &RangeScan,
    ) -> Option<FrameReport>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.activation.is_active() {
            return None;
        }
        let report = render_packet(display, scan);
        self.last_frame = Some(report);
        Some(report)
    }

    /// Handle a click on the plotter surface. Returns `true` when an
    /// activation request should be posted.
    #[inline]
    pub fn click(&mut self) -> bool { self.activation.click() }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::colors::OLIVE;
    use crate::config::PLOT_SURFACE_SIZE;
    use crate::scan::ScanPoint;
    use crate::test_surface::Framebuffer;

    fn surface() -> Framebuffer { Framebuffer::new(PLOT_SURFACE_SIZE, PLOT_SURFACE_SIZE) }

    fn reading(distance: f32) -> ScanPoint {
        ScanPoint {
            distance,
            intensity: 500,
        }
    }

    fn square_room() -> RangeScan {
        let mut scan = RangeScan::new();
        scan.insert(0, reading(1000.0));
        scan.insert(90, reading(2000.0));
        scan.insert(180, reading(1500.0));
        scan.insert(270, reading(500.0));
        scan
    }

    #[test]
    fn test_render_reports_scale_span() {
        let mut fb = surface();
        let report = render_packet(&mut fb, &square_room());

        assert_eq!(report.points_drawn, 4);
        assert_eq!(report.max_distance, Some(2000.0));
        assert_eq!(report.scale_span, 4000.0, "Annotation is twice the max distance");
        assert!(!report.is_no_data());
    }

    #[test]
    fn test_render_places_markers() {
        let mut fb = surface();
        render_packet(&mut fb, &square_room());

        // Max distance (2000 at 90°) lands one marker radius below the top edge.
        let half = PLOT_SURFACE_SIZE as i32 / 2;
        let top = POINT_RADIUS as i32 + 1;
        assert_eq!(fb.pixel(half, top), Some(BLUE), "90° reading drawn above center");
        assert_eq!(fb.pixel(half, 0), Some(BACKGROUND), "Marker does not reach the edge row");
        // 1000 at 0° is half the max: halfway to the right edge.
        assert_eq!(fb.pixel(half + half / 2, half), Some(BLUE), "0° reading drawn right of center");
        // 500 at 270° is a quarter of the max: below center.
        assert_eq!(fb.pixel(half, half + half / 4), Some(BLUE), "270° reading drawn below center");
    }

    #[test]
    fn test_marker_count_matches_readings() {
        let mut fb = surface();
        let mut scan = RangeScan::new();
        scan.insert(45, reading(800.0));
        let report = render_packet(&mut fb, &scan);

        assert_eq!(report.points_drawn, 1);
        let mut reference = Framebuffer::new(20, 20);
        Circle::with_center(Point::new(10, 10), POINT_RADIUS * 2 + 1)
            .into_styled(MARKER_STYLE)
            .draw(&mut reference)
            .ok();
        assert_eq!(fb.count(BLUE), reference.count(BLUE), "One filled marker, not clipped");
    }

    #[test]
    fn test_empty_scan_is_no_data_frame() {
        let mut fb = surface();
        let report = render_packet(&mut fb, &RangeScan::new());

        assert_eq!(report.points_drawn, 0);
        assert_eq!(report.max_distance, None);
        assert_eq!(report.scale_span, 0.0);
        assert!(report.is_no_data());
        assert_eq!(fb.count(BLUE), 0);
        assert_eq!(scale_annotation(report.scale_span, None).as_str(), "0 mm");
    }

    #[test]
    fn test_all_zero_distances_skip_points() {
        let mut fb = surface();
        let mut scan = RangeScan::new();
        scan.insert(10, reading(0.0));
        scan.insert(20, reading(0.0));
        let report = render_packet(&mut fb, &scan);

        assert!(report.is_no_data(), "Zero max distance must not divide");
        assert_eq!(report.points_drawn, 0);
        assert_eq!(fb.count(BLUE), 0);
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let mut fb = surface();
        render_packet(&mut fb, &square_room());

        let mut single = RangeScan::new();
        single.insert(0, reading(10.0));
        render_packet(&mut fb, &single);

        let half = PLOT_SURFACE_SIZE as i32 / 2;
        assert_eq!(fb.pixel(half, POINT_RADIUS as i32 + 1), Some(BACKGROUND), "Old 90° marker removed");
    }

    #[test]
    fn test_outermost_markers_drawn_whole() {
        let mut fb = surface();
        let mut scan = RangeScan::new();
        for angle in [0, 90, 180, 270] {
            scan.insert(angle, reading(1000.0));
        }
        render_packet(&mut fb, &scan);

        let mut reference = Framebuffer::new(20, 20);
        Circle::with_center(Point::new(10, 10), POINT_RADIUS * 2 + 1)
            .into_styled(MARKER_STYLE)
            .draw(&mut reference)
            .ok();
        assert_eq!(fb.count(BLUE), 4 * reference.count(BLUE), "No marker cut by the surface edge");
    }

    #[test]
    fn test_render_stays_inside_cropped_region() {
        // Plot region placed as in the window: right of the log, below the status strip
        let mut fb = Framebuffer::new(900, 426);
        let region = Rectangle::new(Point::new(500, 26), Size::new(PLOT_SURFACE_SIZE, PLOT_SURFACE_SIZE));
        let mut scan = RangeScan::new();
        scan.insert(90, reading(1000.0));
        scan.insert(180, reading(1000.0));

        let report = render_packet(&mut fb.cropped(&region), &scan);
        assert_eq!(report.points_drawn, 2);
        assert!(fb.count(BLUE) > 0);
        for p in fb.touched() {
            assert!(region.contains(p), "Frame wrote {p:?} outside the plot region");
        }

        render_packet(&mut fb.cropped(&region), &RangeScan::new());
        assert_eq!(fb.count(BLUE), 0, "Next frame leaves no marker residue");
    }

    #[test]
    fn test_placeholder_stays_inside_cropped_region() {
        let mut fb = Framebuffer::new(900, 426);
        let region = Rectangle::new(Point::new(500, 26), Size::new(120, 80));
        let mut plotter = PointCloudPlotter::new();

        plotter.apply_activation(&mut fb.cropped(&region), false);
        assert!(fb.count(OLIVE) > 0);
        for p in fb.touched() {
            assert!(region.contains(p), "Placeholder wrote {p:?} outside the plot region");
        }
    }

    #[test]
    fn test_scale_annotation_format() {
        assert_eq!(scale_annotation(4000.0, None).as_str(), "4000 mm");
        assert_eq!(scale_annotation(1234.4, Some(5.08)).as_str(), "1234 mm  5.1 Hz");
    }

    #[test]
    fn test_plotter_draws_placeholder_when_inactive() {
        let mut fb = surface();
        let mut plotter = PointCloudPlotter::new();
        assert_eq!(fb.count(OLIVE), 0, "Nothing drawn before first check");

        let t = plotter.apply_activation(&mut fb, false);
        assert!(t.attached);
        assert!(fb.count(OLIVE) > 0, "Placeholder drawn on entering inactive");
        assert!(!plotter.wants_packet());
    }

    #[test]
    fn test_plotter_drops_packets_while_inactive() {
        let mut fb = surface();
        let mut plotter = PointCloudPlotter::new();
        plotter.apply_activation(&mut fb, false);
        let placeholder = fb.count(OLIVE);

        assert!(plotter.apply_packet(&mut fb, &square_room()).is_none());
        assert_eq!(fb.count(OLIVE), placeholder, "Placeholder untouched");
        assert_eq!(fb.count(BLUE), 0);
    }

    #[test]
    fn test_plotter_click_requires_confirmation() {
        let mut fb = surface();
        let mut plotter = PointCloudPlotter::new();
        plotter.apply_activation(&mut fb, false);

        assert!(plotter.click(), "Click while inactive requests activation");
        assert!(!plotter.wants_packet(), "Still inactive until confirmed");
        assert!(plotter.apply_packet(&mut fb, &square_room()).is_none());

        let t = plotter.apply_activation(&mut fb, true);
        assert!(t.detached);
        assert_eq!(fb.count(OLIVE), 0, "Placeholder cleared on activation");
        assert!(plotter.wants_packet());

        let report = plotter.apply_packet(&mut fb, &square_room()).unwrap();
        assert_eq!(report.points_drawn, 4);
        assert_eq!(plotter.last_frame(), Some(report));
    }

    #[test]
    fn test_plotter_returns_to_placeholder() {
        let mut fb = surface();
        let mut plotter = PointCloudPlotter::new();
        plotter.apply_activation(&mut fb, true);
        plotter.apply_packet(&mut fb, &square_room());
        assert!(fb.count(BLUE) > 0);

        plotter.apply_activation(&mut fb, false);
        assert_eq!(fb.count(BLUE), 0, "Point cloud wiped");
        assert!(fb.count(OLIVE) > 0);
        assert_eq!(plotter.last_frame(), None);
        assert!(plotter.activation().click_attached());
    }
}
