//! Positioned text that can erase exactly what it drew.
//!
//! A [`DrawableText`] remembers the bounding box of its last draw. Every mutation
//! first fills that box with the background color, then redraws and records the
//! new box. Nothing outside the element's own glyph region is ever touched, so
//! elements can move past each other without flicker or leftover pixels.
//!
//! Glyphs are clipped to the surface and the recorded box is clamped to it, so
//! a line wider than its surface never writes past the edge. This matters on
//! `cropped()` views, which translate but do not clip.
//!
//! The element does not hold on to the surface: every operation takes the
//! display it was created on.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::String;

use crate::colors::BACKGROUND;
use crate::config::LOG_LINE_LEN;
use crate::log::truncated;
use crate::styles::{LEFT_ALIGNED, LOG_FONT};

/// Fill `area` with the background color, clipped to the surface.
///
/// Regions partly or entirely outside the surface are clipped; an empty
/// intersection is a no-op.
pub fn clear_region<D>(
    display: &mut D,
    area: &Rectangle,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let visible = area.intersection(&display.bounding_box());
    if visible.is_zero_sized() {
        return;
    }
    display.fill_solid(&visible, BACKGROUND).ok();
}

/// A single line of colored text with exact erase/redraw semantics.
#[derive(Clone)]
pub struct DrawableText {
    content: String<LOG_LINE_LEN>,
    color: Rgb565,
    font: &'static MonoFont<'static>,
    /// Left edge and alphabetic baseline.
    position: Point,
    /// Glyph region covered by the last draw.
    bounding_box: Rectangle,
}

impl DrawableText {
    /// Create an element at `(x, baseline_y)` and draw it immediately.
    pub fn create<D>(
        display: &mut D,
        text: &str,
        color: Rgb565,
        x: i32,
        baseline_y: i32,
    ) -> Self
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut element = Self {
            content: truncated(text),
            color,
            font: LOG_FONT,
            position: Point::new(x, baseline_y),
            bounding_box: Rectangle::zero(),
        };
        element.draw(display);
        element
    }

    /// Current text.
    #[inline]
    pub fn text(&self) -> &str { &self.content }

    /// Current color.
    #[inline]
    pub const fn color(&self) -> Rgb565 { self.color }

    /// Current baseline Y coordinate.
    #[inline]
    pub const fn baseline_y(&self) -> i32 { self.position.y }

    /// Region covered by the last draw.
    #[inline]
    pub const fn bounding_box(&self) -> Rectangle { self.bounding_box }

    /// Replace the text.
    pub fn set_text<D>(
        &mut self,
        display: &mut D,
        text: &str,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.erase(display);
        self.content = truncated(text);
        self.draw(display);
    }

    /// Change the text color.
    pub fn set_color<D>(
        &mut self,
        display: &mut D,
        color: Rgb565,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.erase(display);
        self.color = color;
        self.draw(display);
    }

    /// Change the font. The bounding box follows the new glyph metrics.
    pub fn set_font<D>(
        &mut self,
        display: &mut D,
        font: &'static MonoFont<'static>,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.erase(display);
        self.font = font;
        self.draw(display);
    }

    /// Move the element `delta` pixels down (negative moves up).
    ///
    /// Erases at the old position before the baseline and box shift, then
    /// redraws at the new one.
    pub fn translate_vertical<D>(
        &mut self,
        display: &mut D,
        delta: i32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.erase(display);
        self.position.y += delta;
        self.bounding_box.top_left.y += delta;
        self.draw(display);
    }

    /// Clear the element's region without redrawing.
    pub fn erase<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        clear_region(display, &self.bounding_box);
    }

    fn draw<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let surface = display.bounding_box();
        let style = MonoTextStyle::new(self.font, self.color);
        let text = Text::with_text_style(&self.content, self.position, style, LEFT_ALIGNED);
        self.bounding_box = text.bounding_box().intersection(&surface);
        text.draw(&mut display.clipped(&surface)).ok();
    }
}
