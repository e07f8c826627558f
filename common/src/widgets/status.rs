//! Status strip: battery level and charging flag.
//!
//! Spans the top of the window above the log and plotter surfaces. Battery is
//! polled every 10 s and charging on the same cadence, so the strip is
//! redrawn only when a new value actually differs from the one on screen.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Battery: 87%                                     On battery │
//! ├─────────────────────────────────────────────────────────────┤ ◄ divider
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::colors::{BACKGROUND, BLACK, LIGHT_GRAY, OLIVE};
use crate::styles::{LEFT_ALIGNED, RIGHT_ALIGNED, STATUS_FONT};
use crate::thresholds::battery_color;

const TEXT_MARGIN: i32 = 6;
const TEXT_BASELINE: i32 = 18;
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(LIGHT_GRAY, 1);

/// Battery text, e.g. `"Battery: 87%"`. Unknown levels show `"Battery: --"`.
pub fn battery_label(percent: Option<f32>) -> String<24> {
    let mut label: String<24> = String::new();
    match percent {
        Some(p) => {
            let _ = write!(label, "Battery: {p:.0}%");
        }
        None => {
            let _ = label.push_str("Battery: --");
        }
    }
    label
}

/// Charging text for the right side of the strip.
pub const fn charging_label(charging: Option<bool>) -> &'static str {
    match charging {
        Some(true) => "Charging",
        Some(false) => "On battery",
        None => "",
    }
}

/// Latest battery and charging readings plus a redraw flag.
#[derive(Debug)]
pub struct StatusStrip {
    battery: Option<f32>,
    charging: Option<bool>,
    dirty: bool,
}

impl StatusStrip {
    /// Strip with no readings yet. Draws once on the first [`draw_if_dirty`](Self::draw_if_dirty).
    pub const fn new() -> Self {
        Self {
            battery: None,
            charging: None,
            dirty: true,
        }
    }

    #[inline]
    pub const fn battery(&self) -> Option<f32> { self.battery }

    #[inline]
    pub const fn charging(&self) -> Option<bool> { self.charging }

    #[inline]
    pub const fn is_dirty(&self) -> bool { self.dirty }

    /// Record a battery reading. Non-finite values are ignored.
    pub fn set_battery(
        &mut self,
        percent: f32,
    ) {
        if !percent.is_finite() {
            return;
        }
        let percent = percent.clamp(0.0, 100.0);
        if self.battery != Some(percent) {
            self.battery = Some(percent);
            self.dirty = true;
        }
    }

    /// Record a charging reading.
    pub fn set_charging(
        &mut self,
        charging: bool,
    ) {
        if self.charging != Some(charging) {
            self.charging = Some(charging);
            self.dirty = true;
        }
    }

    /// Redraw the strip if a reading changed. Returns whether anything was drawn.
    pub fn draw_if_dirty<D>(
        &mut self,
        display: &mut D,
    ) -> bool
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.dirty {
            return false;
        }
        self.draw(display);
        self.dirty = false;
        true
    }

    fn draw<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = display.bounding_box();
        let mut surface = display.clipped(&area);
        let display = &mut surface;
        display.clear(BACKGROUND).ok();
        let width = area.size.width as i32;
        let bottom = area.size.height as i32 - 1;

        let battery_style = MonoTextStyle::new(STATUS_FONT, self.battery.map_or(OLIVE, battery_color));
        let label = battery_label(self.battery);
        Text::with_text_style(&label, Point::new(TEXT_MARGIN, TEXT_BASELINE), battery_style, LEFT_ALIGNED)
            .draw(display)
            .ok();

        let charging_style = MonoTextStyle::new(STATUS_FONT, BLACK);
        Text::with_text_style(
            charging_label(self.charging),
            Point::new(width - TEXT_MARGIN, TEXT_BASELINE),
            charging_style,
            RIGHT_ALIGNED,
        )
        .draw(display)
        .ok();

        Line::new(Point::new(0, bottom), Point::new(width - 1, bottom))
            .into_styled(DIVIDER_STYLE)
            .draw(display)
            .ok();
    }
}

impl Default for StatusStrip {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::colors::{GREEN, RED};
    use crate::config::STATUS_HEIGHT;
    use crate::test_surface::Framebuffer;

    fn surface() -> Framebuffer { Framebuffer::new(900, STATUS_HEIGHT) }

    #[test]
    fn test_labels() {
        assert_eq!(battery_label(Some(87.4)).as_str(), "Battery: 87%");
        assert_eq!(battery_label(None).as_str(), "Battery: --");
        assert_eq!(charging_label(Some(true)), "Charging");
        assert_eq!(charging_label(Some(false)), "On battery");
        assert_eq!(charging_label(None), "");
    }

    #[test]
    fn test_first_draw_then_clean() {
        let mut fb = surface();
        let mut strip = StatusStrip::new();

        assert!(strip.draw_if_dirty(&mut fb), "Initial draw");
        assert!(fb.count(OLIVE) > 0, "Unknown battery shown in placeholder color");
        assert!(!strip.draw_if_dirty(&mut fb), "Nothing changed");
    }

    #[test]
    fn test_unchanged_reading_does_not_redraw() {
        let mut fb = surface();
        let mut strip = StatusStrip::new();
        strip.set_battery(50.0);
        strip.draw_if_dirty(&mut fb);

        strip.set_battery(50.0);
        assert!(!strip.is_dirty());
        strip.set_charging(true);
        assert!(strip.is_dirty());
    }

    #[test]
    fn test_battery_colors() {
        let mut fb = surface();
        let mut strip = StatusStrip::new();

        strip.set_battery(98.0);
        strip.draw_if_dirty(&mut fb);
        assert!(fb.count(GREEN) > 0, "Full battery drawn green");
        assert_eq!(fb.count(RED), 0);

        strip.set_battery(12.0);
        strip.draw_if_dirty(&mut fb);
        assert!(fb.count(RED) > 0, "Low battery drawn red");
        assert_eq!(fb.count(GREEN), 0, "Previous reading cleared");
    }

    #[test]
    fn test_rejects_non_finite_and_clamps() {
        let mut strip = StatusStrip::new();
        strip.set_battery(f32::NAN);
        assert_eq!(strip.battery(), None);

        strip.set_battery(140.0);
        assert_eq!(strip.battery(), Some(100.0));
    }

    #[test]
    fn test_divider_along_bottom_edge() {
        let mut fb = surface();
        let mut strip = StatusStrip::new();
        strip.draw_if_dirty(&mut fb);

        let bottom = STATUS_HEIGHT as i32 - 1;
        assert_eq!(fb.pixel(0, bottom), Some(LIGHT_GRAY));
        assert_eq!(fb.pixel(899, bottom), Some(LIGHT_GRAY));
    }

    #[test]
    fn test_draw_stays_inside_cropped_strip() {
        // Strip region as in the window, with the log and plotter below it
        let mut fb = Framebuffer::new(900, 120);
        let region = Rectangle::new(Point::zero(), Size::new(900, STATUS_HEIGHT));
        let mut strip = StatusStrip::new();
        strip.set_battery(12.0);
        strip.set_charging(false);

        strip.draw_if_dirty(&mut fb.cropped(&region));
        assert!(fb.count(RED) > 0);
        for p in fb.touched() {
            assert!(region.contains(p), "Strip wrote {p:?} outside its region");
        }
    }

    #[test]
    fn test_narrow_strip_clips_labels() {
        let mut fb = Framebuffer::new(200, 60);
        let region = Rectangle::new(Point::new(40, 10), Size::new(60, STATUS_HEIGHT));
        let mut strip = StatusStrip::new();
        strip.set_charging(true);

        strip.draw_if_dirty(&mut fb.cropped(&region));
        for p in fb.touched() {
            assert!(region.contains(p), "Label pixel {p:?} spilled past a narrow strip");
        }
    }
}
