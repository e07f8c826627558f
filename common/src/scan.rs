//! LIDAR range-scan snapshots.
//!
//! A scan holds at most one reading per whole degree. Angles with no return are
//! absent rather than zero, so they never skew the normalization in
//! [`RangeScan::max_distance`].

use crate::config::SCAN_ANGLES;

/// One range reading at a given angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanPoint {
    /// Distance to the return, in millimetres.
    pub distance: f32,
    /// Signal strength reported by the sensor.
    pub intensity: u16,
}

/// One sampled sweep of readings indexed by angle (0..360 degrees).
#[derive(Clone, Debug, PartialEq)]
pub struct RangeScan {
    points: [Option<ScanPoint>; SCAN_ANGLES],
    /// Sensor rotation speed reported with the sweep, if any.
    pub rotation_speed: Option<f32>,
}

impl RangeScan {
    /// Create an empty scan (every angle absent).
    pub const fn new() -> Self {
        Self {
            points: [None; SCAN_ANGLES],
            rotation_speed: None,
        }
    }

    /// Record a reading. Returns `false` (and stores nothing) for angles
    /// outside `0..SCAN_ANGLES` or non-finite/negative distances.
    pub fn insert(
        &mut self,
        angle: usize,
        point: ScanPoint,
    ) -> bool {
        if angle >= SCAN_ANGLES || !point.distance.is_finite() || point.distance < 0.0 {
            return false;
        }
        self.points[angle] = Some(point);
        true
    }

    /// Reading at `angle`, if present.
    #[inline]
    pub fn get(
        &self,
        angle: usize,
    ) -> Option<&ScanPoint> {
        self.points.get(angle).and_then(Option::as_ref)
    }

    /// Iterate over present readings as `(angle_degrees, point)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ScanPoint)> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(angle, point)| point.as_ref().map(|p| (angle, p)))
    }

    /// Number of present readings.
    pub fn len(&self) -> usize { self.points.iter().filter(|p| p.is_some()).count() }

    /// Check if no angle has a reading.
    pub fn is_empty(&self) -> bool { self.points.iter().all(Option::is_none) }

    /// Largest present distance, or `None` when the scan is empty.
    pub fn max_distance(&self) -> Option<f32> {
        self.iter()
            .map(|(_, p)| p.distance)
            .fold(None, |max, d| Some(max.map_or(d, |m: f32| m.max(d))))
    }

    /// Width of the area the normalized plot spans: twice the max distance,
    /// or zero for an empty scan.
    pub fn scale_span(&self) -> f32 { self.max_distance().map_or(0.0, |d| 2.0 * d) }
}

impl Default for RangeScan {
    fn default() -> Self { Self::new() }
}
