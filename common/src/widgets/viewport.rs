//! Scrolling, color-coded log viewport.
//!
//! New lines enter at a fixed anchor baseline. Every older line moves one step
//! away from the anchor, and lines that reached the eviction baseline are erased
//! and dropped (oldest first). Only element bounding boxes are ever repainted;
//! the full surface is cleared only when switching between the placeholder and
//! real content.
//!
//! # Layout (bottom-anchored, upward growth)
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ [nav@10:00:01] INFO: started             │ ◄ eviction baseline (oldest)
//! │ [nav@10:00:02] WARNING: low battery      │
//! │ [nav@10:00:03] ERROR: disk full          │ ◄ anchor baseline (newest)
//! └──────────────────────────────────────────┘
//! ```
//!
//! A top-anchored viewport is the mirror image: new lines at the top, older
//! lines pushed downward.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::Deque;

use crate::colors::BACKGROUND;
use crate::config::{LOG_ANCHOR_MARGIN, LOG_LINE_STEP, LOG_MAX_LINES, LOG_PLACEHOLDER};
use crate::log::{LogMessage, TimeOfDay};
use crate::styles::{CENTERED, LOG_FONT, PLACEHOLDER_STYLE};
use crate::widgets::text::DrawableText;

/// Direction in which older lines move as new ones arrive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Growth {
    /// Newest line at the bottom, older lines scroll up.
    Upward,
    /// Newest line at the top, older lines scroll down.
    Downward,
}

/// Geometry of a scrolling viewport.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ViewportConfig {
    pub growth: Growth,
    /// Left edge of every line.
    pub left: i32,
    /// Baseline where new lines are placed.
    pub anchor_baseline: i32,
    /// Distance between consecutive baselines (always positive).
    pub line_step: i32,
    /// Lines at or beyond this baseline are evicted on the next append.
    pub eviction_baseline: i32,
    /// Number of lines that fit between anchor and eviction baseline.
    pub capacity: usize,
}

impl ViewportConfig {
    /// Newest line at the bottom of a surface `height` pixels tall.
    ///
    /// The topmost line is the highest slot whose glyphs are still fully
    /// visible; it becomes the eviction baseline.
    pub fn bottom_anchored(height: u32) -> Self {
        let ascent = LOG_FONT.baseline as i32;
        let anchor = height as i32 - LOG_ANCHOR_MARGIN;
        let capacity = slots_between(anchor - ascent);
        Self {
            growth: Growth::Upward,
            left: 0,
            anchor_baseline: anchor,
            line_step: LOG_LINE_STEP,
            eviction_baseline: anchor - LOG_LINE_STEP * (capacity as i32 - 1),
            capacity,
        }
    }

    /// Newest line at the top of a surface `height` pixels tall.
    pub fn top_anchored(height: u32) -> Self {
        let ascent = LOG_FONT.baseline as i32;
        let descent = LOG_FONT.character_size.height as i32 - ascent;
        let anchor = ascent + LOG_ANCHOR_MARGIN - descent;
        let lowest = height as i32 - descent;
        let capacity = slots_between(lowest - anchor);
        Self {
            growth: Growth::Downward,
            left: 0,
            anchor_baseline: anchor,
            line_step: LOG_LINE_STEP,
            eviction_baseline: anchor + LOG_LINE_STEP * (capacity as i32 - 1),
            capacity,
        }
    }

    /// Signed offset applied to surviving lines on each append.
    #[inline]
    pub const fn scroll_delta(&self) -> i32 {
        match self.growth {
            Growth::Upward => -self.line_step,
            Growth::Downward => self.line_step,
        }
    }

    /// Whether a line at `baseline` has reached the eviction baseline.
    #[inline]
    pub const fn is_evictable(
        &self,
        baseline: i32,
    ) -> bool {
        match self.growth {
            Growth::Upward => baseline <= self.eviction_baseline,
            Growth::Downward => baseline >= self.eviction_baseline,
        }
    }
}

/// Number of line slots that fit in `span` pixels of baseline travel,
/// clamped to `1..=LOG_MAX_LINES`.
fn slots_between(span: i32) -> usize {
    if span < 0 {
        return 1;
    }
    ((span / LOG_LINE_STEP) as usize + 1).min(LOG_MAX_LINES)
}

/// Result of appending one line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct AddOutcome {
    /// Lines evicted by this append.
    pub evicted: usize,
    /// Whether the placeholder was cleared by this append.
    pub cleared_placeholder: bool,
}

/// Ordered run of the most recent log lines.
pub struct ScrollViewport {
    config: ViewportConfig,
    /// Oldest at the front, newest at the back.
    elements: Deque<DrawableText, LOG_MAX_LINES>,
    showing_placeholder: bool,
}

impl ScrollViewport {
    /// Create a viewport and draw its placeholder.
    pub fn new<D>(
        display: &mut D,
        config: ViewportConfig,
    ) -> Self
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut viewport = Self {
            config,
            elements: Deque::new(),
            showing_placeholder: false,
        };
        viewport.clear(display);
        viewport
    }

    /// Geometry in use.
    #[inline]
    pub const fn config(&self) -> &ViewportConfig { &self.config }

    /// Whether the "No Messages." placeholder is on screen.
    #[inline]
    pub const fn is_showing_placeholder(&self) -> bool { self.showing_placeholder }

    /// Number of lines on screen.
    #[inline]
    pub fn len(&self) -> usize { self.elements.len() }

    /// Check if no lines are on screen.
    #[inline]
    pub fn is_empty(&self) -> bool { self.elements.is_empty() }

    /// Lines on screen, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DrawableText> { self.elements.iter() }

    /// Wipe the whole surface, drop every line and show the placeholder.
    pub fn clear<D>(
        &mut self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.elements.clear();
        let area = display.bounding_box();
        let mut surface = display.clipped(&area);
        surface.clear(BACKGROUND).ok();

        Text::with_text_style(LOG_PLACEHOLDER, area.center(), PLACEHOLDER_STYLE, CENTERED)
            .draw(&mut surface)
            .ok();

        self.showing_placeholder = true;
    }

    /// Format a log message with its wall-clock time and append it.
    pub fn add_message<D>(
        &mut self,
        display: &mut D,
        message: &LogMessage,
        time: TimeOfDay,
    ) -> AddOutcome
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let line = message.format_line(time);
        self.add_line(display, &line, message.color())
    }

    /// Scroll existing lines one step and append `text` at the anchor.
    pub fn add_line<D>(
        &mut self,
        display: &mut D,
        text: &str,
        color: Rgb565,
    ) -> AddOutcome
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut outcome = AddOutcome::default();

        if self.showing_placeholder {
            display.clear(BACKGROUND).ok();
            self.showing_placeholder = false;
            outcome.cleared_placeholder = true;
        }

        // Lines are evenly spaced and ordered by age, so the evictable ones
        // always form a prefix of the queue.
        let delta = self.config.scroll_delta();
        for element in &mut self.elements {
            if self.config.is_evictable(element.baseline_y()) {
                element.erase(display);
                outcome.evicted += 1;
            } else {
                element.translate_vertical(display, delta);
            }
        }
        for _ in 0..outcome.evicted {
            self.elements.pop_front();
        }

        // Only reachable with a config whose capacity exceeds the queue.
        if self.elements.is_full()
            && let Some(oldest) = self.elements.pop_front()
        {
            oldest.erase(display);
            outcome.evicted += 1;
        }

        let element = DrawableText::create(
            display,
            text,
            color,
            self.config.left,
            self.config.anchor_baseline,
        );
        // Room was made above.
        let _ = self.elements.push_back(element);

        outcome
    }
}
