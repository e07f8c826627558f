//! Polar to screen mapping for the point-cloud plotter.
//!
//! Readings arrive as `(angle in degrees, distance)`. Screen coordinates grow
//! downward, so the Y component is negated after scaling: increasing angle then
//! sweeps counter-clockwise on screen, as on a conventional upward-Y plot.
//!
//! ```text
//!             90°
//!              |
//!   180° ------+------ 0°      (+ = surface center)
//!              |
//!            270°
//! ```

use embedded_graphics::prelude::Point;
#[allow(unused_imports)] // Inherent float methods shadow these when std is linked (tests)
use micromath::F32Ext;

/// Maps plot-space distances onto one surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarMapping {
    /// Pixel position of the plot origin.
    pub center: Point,
    /// Pixels per distance unit.
    pub scale: f32,
}

impl PolarMapping {
    /// Mapping that fits `max_distance` into `half_extent` pixels around `center`.
    ///
    /// Returns `None` when `max_distance` is zero, negative or not finite: there
    /// is no meaningful scale for such a frame.
    pub fn fit(
        center: Point,
        half_extent: f32,
        max_distance: f32,
    ) -> Option<Self> {
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return None;
        }
        Some(Self {
            center,
            scale: half_extent / max_distance,
        })
    }

    /// Screen pixel for a reading at `angle_deg` and `distance`.
    pub fn to_pixel(
        &self,
        angle_deg: f32,
        distance: f32,
    ) -> Point {
        let theta = angle_deg.to_radians();
        let x = distance * theta.cos() * self.scale;
        let y = distance * theta.sin() * self.scale;
        Point::new(
            self.center.x + x.round() as i32,
            self.center.y - y.round() as i32,
        )
    }

    /// Inverse of [`to_pixel`](Self::to_pixel): `(angle_deg in [0, 360), distance)`.
    ///
    /// Exact up to the pixel rounding done by the forward mapping.
    pub fn from_pixel(
        &self,
        pixel: Point,
    ) -> (f32, f32) {
        let x = (pixel.x - self.center.x) as f32;
        let y = (self.center.y - pixel.y) as f32;
        let distance = (x * x + y * y).sqrt() / self.scale;
        let mut angle = y.atan2(x).to_degrees();
        if angle < 0.0 {
            angle += 360.0;
        }
        (angle, distance)
    }
}
