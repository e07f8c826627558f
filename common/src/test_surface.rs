//! In-memory RGB565 surface for widget tests.
//!
//! Behaves like a display framebuffer: writes outside the surface are dropped,
//! `fill_solid` is clipped to the surface. Every written pixel is also recorded
//! so tests can check which regions a widget touched.

use std::collections::BTreeSet;
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::BACKGROUND;

pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb565>,
    touched: BTreeSet<(i32, i32)>,
}

impl Framebuffer {
    /// Surface of the given size, filled with the background color.
    pub fn new(
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; (width * height) as usize],
            touched: BTreeSet::new(),
        }
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> Option<Rgb565> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }

    /// Points whose color differs from the background.
    pub fn foreground(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.pixel(x, y) != Some(BACKGROUND) {
                    points.push(Point::new(x, y));
                }
            }
        }
        points
    }

    /// Number of pixels of exactly `color`.
    pub fn count(
        &self,
        color: Rgb565,
    ) -> usize {
        self.pixels.iter().filter(|c| **c == color).count()
    }

    /// Whether any pixel inside `area` differs from the background.
    pub fn has_foreground_in(
        &self,
        area: &Rectangle,
    ) -> bool {
        area.points().any(|p| self.pixel(p.x, p.y).is_some_and(|c| c != BACKGROUND))
    }

    /// Forget recorded writes.
    pub fn reset_touched(&mut self) { self.touched.clear(); }

    /// Pixels written since the last [`reset_touched`](Self::reset_touched).
    pub fn touched(&self) -> impl Iterator<Item = Point> + '_ { self.touched.iter().map(|&(x, y)| Point::new(x, y)) }

    fn set_pixel(
        &mut self,
        point: Point,
        color: Rgb565,
    ) {
        if point.x < 0 || point.y < 0 || point.x >= self.width as i32 || point.y >= self.height as i32 {
            return;
        }
        let idx = (point.y as u32 * self.width + point.x as u32) as usize;
        self.pixels[idx] = color;
        self.touched.insert((point.x, point.y));
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size { Size::new(self.width, self.height) }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }
        for point in drawable_area.points() {
            self.set_pixel(point, color);
        }
        Ok(())
    }
}
